use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::constants::SERVICE_NAME;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(health_check))
        .route("/live", get(liveness))
        .route("/ready", get(readiness))
}

pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": SERVICE_NAME,
        "events": state.store().len(),
        "uptimeSecs": state.started_at().elapsed().as_secs(),
    }))
}

pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// The store is loaded before the listener binds, so serving implies ready.
pub async fn readiness() -> StatusCode {
    StatusCode::OK
}
