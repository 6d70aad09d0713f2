use chrono::{NaiveDate, TimeZone, Utc};

use usage_analytics::analytics::types::Event;

pub const ACME: &str = "C1";
pub const BETA: &str = "C2";

pub fn reference_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 10).expect("valid date")
}

pub fn event_at(
    id: &str,
    company_id: &str,
    (month, day, hour): (u32, u32, u32),
    content: &str,
) -> Event {
    let at = Utc
        .with_ymd_and_hms(2025, month, day, hour, 0, 0)
        .single()
        .expect("valid timestamp")
        .fixed_offset();
    Event {
        id: id.to_string(),
        created_at: at,
        company_id: company_id.to_string(),
        event_type: "activity".to_string(),
        content: content.to_string(),
        attribute: "page".to_string(),
        updated_at: at,
        original_timestamp: at,
        value: None,
    }
}

pub fn acme(user: &str, verb: &str) -> String {
    format!("User {verb} CMMS - Acme Corp {user}@acme.com /dashboard")
}

pub fn beta(user: &str, verb: &str) -> String {
    format!("User {verb} CMMS - Beta Industries {user}@beta.io /reports")
}

/// Two companies across early March 2025 plus one January straggler.
///
/// Inside the default 30-day window ending 2025-03-10:
/// Acme has 4 events from alice (3) and carol (1); Beta has 3 events from bob
/// (2) and one system row without an email. 2025-03-09 is the busiest day (3).
pub fn sample_events() -> Vec<Event> {
    vec![
        event_at("e1", ACME, (3, 8, 10), &acme("alice", "active")),
        event_at("e2", BETA, (3, 1, 8), &beta("bob", "viewed")),
        event_at("e3", ACME, (3, 9, 11), &acme("alice", "viewed")),
        event_at("e4", BETA, (3, 9, 12), &beta("bob", "exported")),
        event_at("e5", ACME, (3, 10, 9), &acme("alice", "active")),
        event_at("e6", ACME, (3, 10, 15), &acme("carol", "exported")),
        event_at("e7", BETA, (3, 9, 13), "Scheduled sync - Beta Industries nightly"),
        event_at("e8", ACME, (1, 15, 9), &acme("alice", "viewed")),
    ]
}
