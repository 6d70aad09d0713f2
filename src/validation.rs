//! Turns raw `/api/analytics` query strings into [`QueryParams`].
//!
//! Malformed values degrade to defaults. Oversized free text and date windows
//! longer than a year are rejected.

use serde::Deserialize;

use crate::analytics::types::QueryParams;
use crate::analytics::window::{parse_day, DateWindow};
use crate::constants::{DEFAULT_DATE_RANGE_DAYS, MAX_DATE_RANGE_DAYS, MAX_QUERY_TEXT_LEN};

/// Query string exactly as sent; every field is optional text.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAnalyticsQuery {
    pub date_range: Option<String>,
    pub company_id: Option<String>,
    pub search: Option<String>,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
}

/// `dateRange` in days: missing, non-numeric or outside 1..=365 becomes 30.
pub fn parse_date_range(raw: Option<&str>) -> u32 {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|days| (1..=i64::from(MAX_DATE_RANGE_DAYS)).contains(days))
        .and_then(|days| u32::try_from(days).ok())
        .unwrap_or(DEFAULT_DATE_RANGE_DAYS)
}

fn too_long(value: &str) -> bool {
    value.chars().count() > MAX_QUERY_TEXT_LEN
}

/// Windows wider than `MAX_DATE_RANGE_DAYS` days would zero-fill one point per
/// day per company, so they are refused up front.
pub fn check_window_span(window: &DateWindow) -> Result<(), &'static str> {
    match window.span_days() {
        Some(days) if days > u64::from(MAX_DATE_RANGE_DAYS) => {
            Err("date window exceeds 365 days")
        }
        _ => Ok(()),
    }
}

fn trimmed(value: Option<String>) -> String {
    value.map(|s| s.trim().to_string()).unwrap_or_default()
}

pub fn normalize_query(raw: RawAnalyticsQuery) -> Result<QueryParams, &'static str> {
    let company_id = trimmed(raw.company_id);
    let search = trimmed(raw.search);
    if too_long(&company_id) {
        return Err("companyId exceeds 256 characters");
    }
    if too_long(&search) {
        return Err("search exceeds 256 characters");
    }

    let from_date = trimmed(raw.from_date);
    let to_date = trimmed(raw.to_date);
    // Unparsable dates stay as they are; the window resolver degrades them.
    if let (Some(from), Some(to)) = (parse_day(&from_date), parse_day(&to_date)) {
        check_window_span(&DateWindow::Bounded { from, to })?;
    }

    Ok(QueryParams::default()
        .with_date_range(parse_date_range(raw.date_range.as_deref()))
        .with_company(company_id)
        .with_search(search)
        .with_from_date(from_date)
        .with_to_date(to_date))
}
