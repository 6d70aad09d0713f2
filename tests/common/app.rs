use std::sync::Arc;

use axum::Router;
use chrono::NaiveDate;

use usage_analytics::analytics::types::Event;
use usage_analytics::analytics::window::FixedClock;
use usage_analytics::analytics::AnalyticsService;
use usage_analytics::routes::build_router;
use usage_analytics::state::AppState;
use usage_analytics::store::EventStore;

pub struct TestApp {
    pub app: Router,
    pub state: AppState,
}

pub fn spawn_with_events(events: Vec<Event>, today: NaiveDate) -> TestApp {
    let store = Arc::new(EventStore::from_events(events));
    let analytics = AnalyticsService::new(store, Arc::new(FixedClock(today)));
    let state = AppState::new(analytics);
    let app = build_router(state.clone());

    TestApp { app, state }
}

/// Fixture dataset with "today" pinned to 2025-03-10.
pub fn spawn_test_app() -> TestApp {
    spawn_with_events(
        super::fixtures::sample_events(),
        super::fixtures::reference_today(),
    )
}
