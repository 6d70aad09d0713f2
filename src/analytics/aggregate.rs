//! Reducers over an already-filtered event subset.
//!
//! Ties never depend on hash-map iteration: the peak day prefers the earliest
//! date, companies fall back to id order and users to email order.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::NaiveDate;

use super::text::{extract_user_email, series_key, CompanyNames};
use super::types::{Company, DashboardSummary, Event, Timestamp, TrendPoint, UserActivity};
use super::window::DateWindow;
use crate::constants::{DATE_FORMAT, TOP_USERS_LIMIT};

pub fn summarize(events: &[&Event]) -> DashboardSummary {
    if events.is_empty() {
        return DashboardSummary::default();
    }

    let mut companies = HashSet::new();
    let mut per_day: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for event in events {
        companies.insert(event.company_id.as_str());
        *per_day.entry(event.day()).or_insert(0) += 1;
    }

    let mut peak: Option<(NaiveDate, u64)> = None;
    for (day, count) in per_day {
        if peak.map_or(true, |(_, best)| count > best) {
            peak = Some((day, count));
        }
    }

    DashboardSummary {
        total_events: events.len() as u64,
        total_companies: companies.len() as u64,
        peak_usage_day: peak
            .map(|(day, _)| day.format(DATE_FORMAT).to_string())
            .unwrap_or_default(),
    }
}

/// Days a trend series spans. Bounded windows use their own days; an unbounded
/// window covers the first through the last day that has events.
pub fn series_days(events: &[&Event], window: &DateWindow) -> Vec<NaiveDate> {
    if window.bounds().is_some() {
        return window.days();
    }
    let first = events.iter().map(|e| e.day()).min();
    let last = events.iter().map(|e| e.day()).max();
    match (first, last) {
        (Some(from), Some(to)) => DateWindow::Bounded { from, to }.days(),
        _ => Vec::new(),
    }
}

fn count_per_day(events: &[&Event], window: &DateWindow, days: &[NaiveDate]) -> Vec<TrendPoint> {
    let mut counts: BTreeMap<NaiveDate, u64> = days.iter().map(|day| (*day, 0)).collect();
    for event in events {
        if !window.contains(&event.created_at) {
            continue;
        }
        if let Some(count) = counts.get_mut(&event.day()) {
            *count += 1;
        }
    }
    counts
        .into_iter()
        .map(|(day, events)| TrendPoint::new(day, events))
        .collect()
}

/// Zero-filled daily counts over the window, ascending by date.
pub fn daily_trend(events: &[&Event], window: &DateWindow) -> Vec<TrendPoint> {
    if events.is_empty() {
        return Vec::new();
    }
    let days = series_days(events, window);
    count_per_day(events, window, &days)
}

/// One zero-filled series per company, keyed by the camelCase display name.
///
/// With `company_filter` set only that company's series is produced. Companies
/// whose names collapse to the same key are summed day by day.
pub fn company_trends(
    events: &[&Event],
    window: &DateWindow,
    names: &CompanyNames,
    company_filter: Option<&str>,
) -> BTreeMap<String, Vec<TrendPoint>> {
    let mut trends = BTreeMap::new();
    if events.is_empty() {
        return trends;
    }

    if let Some(company_id) = company_filter {
        let own: Vec<&Event> = events
            .iter()
            .copied()
            .filter(|e| e.company_id == company_id)
            .collect();
        trends.insert(
            series_key(names.get(company_id)),
            daily_trend(&own, window),
        );
        return trends;
    }

    let days = series_days(events, window);
    let mut by_company: BTreeMap<&str, Vec<&Event>> = BTreeMap::new();
    for event in events {
        by_company
            .entry(event.company_id.as_str())
            .or_default()
            .push(*event);
    }

    for (company_id, company_events) in by_company {
        let series = count_per_day(&company_events, window, &days);
        let key = series_key(names.get(company_id));
        match trends.get_mut(&key) {
            None => {
                trends.insert(key, series);
            }
            Some(existing) => merge_series(existing, &series),
        }
    }

    trends
}

fn merge_series(into: &mut [TrendPoint], other: &[TrendPoint]) {
    for (point, extra) in into.iter_mut().zip(other) {
        point.events += extra.events;
    }
}

struct CompanyAccumulator<'a> {
    event_count: u64,
    last_activity: Timestamp,
    users: HashSet<&'a str>,
}

/// Per-company counts, busiest first.
pub fn company_metrics(events: &[&Event], names: &CompanyNames) -> Vec<Company> {
    let mut acc: HashMap<&str, CompanyAccumulator> = HashMap::new();

    for event in events {
        let entry = acc
            .entry(event.company_id.as_str())
            .or_insert_with(|| CompanyAccumulator {
                event_count: 0,
                last_activity: event.created_at,
                users: HashSet::new(),
            });
        entry.event_count += 1;
        if event.created_at > entry.last_activity {
            entry.last_activity = event.created_at;
        }
        let email = extract_user_email(&event.content);
        if !email.is_empty() {
            entry.users.insert(email);
        }
    }

    let mut companies: Vec<Company> = acc
        .into_iter()
        .map(|(id, a)| Company {
            id: id.to_string(),
            name: names.get(id).to_string(),
            event_count: a.event_count,
            active_users: a.users.len() as u64,
            last_activity: a.last_activity,
        })
        .collect();

    companies.sort_by(|a, b| {
        b.event_count
            .cmp(&a.event_count)
            .then_with(|| a.id.cmp(&b.id))
    });
    companies
}

/// The ten most active users. Events without an email are skipped; a user's
/// company is the last one seen for them.
pub fn top_users(events: &[&Event], names: &CompanyNames) -> Vec<UserActivity> {
    let mut acc: HashMap<&str, (u64, &str)> = HashMap::new();

    for event in events {
        let email = extract_user_email(&event.content);
        if email.is_empty() {
            continue;
        }
        let entry = acc.entry(email).or_insert((0, event.company_id.as_str()));
        entry.0 += 1;
        entry.1 = event.company_id.as_str();
    }

    let mut users: Vec<UserActivity> = acc
        .into_iter()
        .map(|(email, (count, company_id))| UserActivity {
            email: email.to_string(),
            event_count: count,
            company_name: names.get(company_id).to_string(),
        })
        .collect();

    users.sort_by(|a, b| {
        b.event_count
            .cmp(&a.event_count)
            .then_with(|| a.email.cmp(&b.email))
    });
    users.truncate(TOP_USERS_LIMIT);
    users
}
