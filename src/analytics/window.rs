use chrono::{Datelike, Days, NaiveDate, Utc};

use super::types::{QueryParams, Timestamp};
use crate::constants::{DATE_FORMAT, FALLBACK_WINDOW_DAYS};

/// Source of the reference "today" that relative windows end on.
pub trait ReferenceClock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Wall-clock month and day, optionally moved into a pinned year so that a
/// historical dataset keeps lining up with "the last N days".
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    pub pinned_year: Option<i32>,
}

impl SystemClock {
    pub fn new(pinned_year: Option<i32>) -> Self {
        Self { pinned_year }
    }
}

impl ReferenceClock for SystemClock {
    fn today(&self) -> NaiveDate {
        let today = Utc::now().date_naive();
        match self.pinned_year {
            Some(year) => pin_year(today, year),
            None => today,
        }
    }
}

/// Always answers the same day.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl ReferenceClock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Moves `date` into `year`. Feb 29 lands on Feb 28 when `year` is not a leap year.
pub fn pin_year(date: NaiveDate, year: i32) -> NaiveDate {
    date.with_year(year)
        .or_else(|| NaiveDate::from_ymd_opt(year, date.month(), 28))
        .unwrap_or(date)
}

/// Inclusive calendar-day window shared by filtering and trend bucketing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateWindow {
    /// No date restriction.
    Unbounded,
    Bounded { from: NaiveDate, to: NaiveDate },
}

impl DateWindow {
    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        match *self {
            DateWindow::Unbounded => None,
            DateWindow::Bounded { from, to } => Some((from, to)),
        }
    }

    /// Whole-day test on the calendar day of `instant` in its own offset,
    /// the same day trend series bucket it under.
    pub fn contains(&self, instant: &Timestamp) -> bool {
        self.contains_day(instant.date_naive())
    }

    pub fn contains_day(&self, day: NaiveDate) -> bool {
        match self.bounds() {
            None => true,
            Some((from, to)) => from <= day && day <= to,
        }
    }

    /// Number of days the window spans; `None` when unbounded, 0 when inverted.
    pub fn span_days(&self) -> Option<u64> {
        let (from, to) = self.bounds()?;
        let days = to.signed_duration_since(from).num_days() + 1;
        Some(u64::try_from(days).unwrap_or(0))
    }

    /// Every day of the window in ascending order. Empty when unbounded or inverted.
    pub fn days(&self) -> Vec<NaiveDate> {
        match self.bounds() {
            Some((from, to)) if from <= to => from.iter_days().take_while(|d| *d <= to).collect(),
            _ => Vec::new(),
        }
    }
}

pub fn parse_day(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

/// Resolves the query's date parameters against `today`.
///
/// Priority: explicit from+to, from only (ends today), trailing `date_range`
/// days, from with an unreadable to (`date_range` or 30 days forward). An
/// unreadable from disables date filtering entirely.
pub fn resolve_window(params: &QueryParams, today: NaiveDate) -> DateWindow {
    let range = params.date_range;

    let Some(raw_from) = params.raw_from_date() else {
        if range == 0 {
            return DateWindow::Unbounded;
        }
        let from = today
            .checked_sub_days(Days::new(u64::from(range - 1)))
            .unwrap_or(NaiveDate::MIN);
        return DateWindow::Bounded { from, to: today };
    };

    let Some(from) = parse_day(raw_from) else {
        tracing::debug!(from_date = raw_from, "Unparsable fromDate, date filter disabled");
        return DateWindow::Unbounded;
    };

    let to = match params.raw_to_date() {
        None => today,
        Some(raw_to) => match parse_day(raw_to) {
            Some(to) => to,
            None => {
                let span = if range > 0 { range } else { FALLBACK_WINDOW_DAYS };
                from.checked_add_days(Days::new(u64::from(span - 1)))
                    .unwrap_or(NaiveDate::MAX)
            }
        },
    };

    DateWindow::Bounded { from, to }
}
