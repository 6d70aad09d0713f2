use chrono::NaiveDate;

use super::aggregate::{company_metrics, company_trends, summarize, top_users};
use super::filter::filter_events;
use super::text::CompanyNames;
use super::types::{Event, QueryParams, Report, UsageTrends};
use super::window::resolve_window;

/// Filters once, then runs every aggregator over the same subset.
pub fn generate_report(events: &[Event], params: &QueryParams, today: NaiveDate) -> Report {
    let window = resolve_window(params, today);
    let filtered = filter_events(events, params, &window);
    let names = CompanyNames::from_events(filtered.iter().copied());

    Report {
        summary: summarize(&filtered),
        trends: UsageTrends {
            trends: company_trends(&filtered, &window, &names, params.company()),
        },
        companies: company_metrics(&filtered, &names),
        top_users: top_users(&filtered, &names),
    }
}
