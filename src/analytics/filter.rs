use chrono::NaiveDate;

use super::text::extract_user_email;
use super::types::{Event, QueryParams};
use super::window::{resolve_window, DateWindow};

/// Applies the company, search and date stages in that order, keeping input order.
pub fn filter_events<'a>(
    events: &'a [Event],
    params: &QueryParams,
    window: &DateWindow,
) -> Vec<&'a Event> {
    let mut filtered: Vec<&Event> = events.iter().collect();

    if let Some(company_id) = params.company() {
        filtered.retain(|event| event.company_id == company_id);
    }

    if let Some(term) = params.search_term() {
        if !filtered.is_empty() {
            let needle = term.to_lowercase();
            filtered.retain(|event| matches_search(event, &needle));
        }
    }

    if !filtered.is_empty() && *window != DateWindow::Unbounded {
        filtered.retain(|event| window.contains(&event.created_at));
    }

    filtered
}

/// Resolves the query window against `today`, then filters.
pub fn filter_for_query<'a>(
    events: &'a [Event],
    params: &QueryParams,
    today: NaiveDate,
) -> Vec<&'a Event> {
    filter_events(events, params, &resolve_window(params, today))
}

/// Case-insensitive match of a lowercased needle against content, company id or user email.
fn matches_search(event: &Event, needle: &str) -> bool {
    event.content.to_lowercase().contains(needle)
        || event.company_id.to_lowercase().contains(needle)
        || extract_user_email(&event.content)
            .to_lowercase()
            .contains(needle)
}
