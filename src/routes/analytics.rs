use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;

use crate::extractors::QueryArgs;
use crate::response::{json, AppError};
use crate::state::AppState;
use crate::validation::{check_window_span, normalize_query, RawAnalyticsQuery};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_report))
}

/// `GET /api/analytics?dateRange=&companyId=&search=&fromDate=&toDate=`
async fn get_report(
    State(state): State<AppState>,
    QueryArgs(raw): QueryArgs<RawAnalyticsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let params = normalize_query(raw).map_err(AppError::validation)?;
    // fromDate alone runs to today, so its span is only known once resolved
    check_window_span(&state.analytics().window_for(&params)).map_err(AppError::validation)?;

    let analytics = state.analytics().clone();
    let report = tokio::task::spawn_blocking(move || analytics.generate_report(&params))
        .await
        .map_err(|e| AppError::internal(&format!("report task failed: {e}")))?;
    Ok(json(report))
}
