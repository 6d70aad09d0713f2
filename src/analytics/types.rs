use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::constants::{DATE_FORMAT, DEFAULT_DATE_RANGE_DAYS};

/// Instant with the UTC offset it was recorded in.
pub type Timestamp = DateTime<FixedOffset>;

/// One row of the usage log. Built once by the loader and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub created_at: Timestamp,
    pub company_id: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub content: String,
    pub attribute: String,
    pub updated_at: Timestamp,
    pub original_timestamp: Timestamp,
    pub value: Option<String>,
}

impl Event {
    /// Calendar day, in the event's own offset, the event is bucketed under.
    pub fn day(&self) -> NaiveDate {
        self.created_at.date_naive()
    }
}

/// Already-validated query. Empty strings are stored as `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryParams {
    pub date_range: u32,
    pub company_id: Option<String>,
    pub search: Option<String>,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            date_range: DEFAULT_DATE_RANGE_DAYS,
            company_id: None,
            search: None,
            from_date: None,
            to_date: None,
        }
    }
}

impl QueryParams {
    pub fn with_date_range(mut self, days: u32) -> Self {
        self.date_range = days;
        self
    }

    pub fn with_company(mut self, company_id: impl Into<String>) -> Self {
        self.company_id = non_empty(company_id.into());
        self
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = non_empty(term.into());
        self
    }

    pub fn with_from_date(mut self, date: impl Into<String>) -> Self {
        self.from_date = non_empty(date.into());
        self
    }

    pub fn with_to_date(mut self, date: impl Into<String>) -> Self {
        self.to_date = non_empty(date.into());
        self
    }

    pub fn company(&self) -> Option<&str> {
        self.company_id.as_deref().filter(|s| !s.is_empty())
    }

    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref().filter(|s| !s.is_empty())
    }

    pub fn raw_from_date(&self) -> Option<&str> {
        self.from_date.as_deref().filter(|s| !s.is_empty())
    }

    pub fn raw_to_date(&self) -> Option<&str> {
        self.to_date.as_deref().filter(|s| !s.is_empty())
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: String,
    pub name: String,
    pub event_count: u64,
    pub active_users: u64,
    pub last_activity: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserActivity {
    pub email: String,
    pub event_count: u64,
    pub company_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: String,
    pub events: u64,
}

impl TrendPoint {
    pub fn new(date: NaiveDate, events: u64) -> Self {
        Self {
            date: date.format(DATE_FORMAT).to_string(),
            events,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageTrends {
    /// Series key (camelCase company display name) to its zero-filled daily points.
    pub trends: BTreeMap<String, Vec<TrendPoint>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_events: u64,
    pub total_companies: u64,
    /// `YYYY-MM-DD`, or empty when there are no events.
    pub peak_usage_day: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub summary: DashboardSummary,
    pub trends: UsageTrends,
    pub companies: Vec<Company>,
    pub top_users: Vec<UserActivity>,
}
