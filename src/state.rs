use std::sync::Arc;
use std::time::Instant;

use crate::analytics::AnalyticsService;
use crate::store::EventStore;

#[derive(Clone)]
pub struct AppState {
    analytics: Arc<AnalyticsService>,
    started_at: Instant,
}

impl AppState {
    pub fn new(analytics: AnalyticsService) -> Self {
        Self {
            analytics: Arc::new(analytics),
            started_at: Instant::now(),
        }
    }

    pub fn analytics(&self) -> &Arc<AnalyticsService> {
        &self.analytics
    }

    pub fn store(&self) -> &EventStore {
        self.analytics.store()
    }

    pub fn started_at(&self) -> Instant {
        self.started_at
    }
}
