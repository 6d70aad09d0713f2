//! Query-time aggregation over the loaded event log.

pub mod aggregate;
pub mod filter;
pub mod report;
pub mod text;
pub mod types;
pub mod window;

use std::sync::Arc;

use crate::store::EventStore;
use report::generate_report;
use types::{QueryParams, Report};
use window::{resolve_window, DateWindow, ReferenceClock};

/// Answers report queries against an immutable event store.
#[derive(Clone)]
pub struct AnalyticsService {
    store: Arc<EventStore>,
    clock: Arc<dyn ReferenceClock>,
}

impl AnalyticsService {
    pub fn new(store: Arc<EventStore>, clock: Arc<dyn ReferenceClock>) -> Self {
        Self { store, clock }
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    /// The window `params` resolves to against this service's clock.
    pub fn window_for(&self, params: &QueryParams) -> DateWindow {
        resolve_window(params, self.clock.today())
    }

    pub fn generate_report(&self, params: &QueryParams) -> Report {
        let today = self.clock.today();
        let report = generate_report(self.store.events(), params, today);
        tracing::debug!(
            today = %today,
            total_events = report.summary.total_events,
            companies = report.companies.len(),
            "Report generated"
        );
        report
    }
}
