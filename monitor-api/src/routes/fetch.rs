//! Manual fetch trigger

use axum::{extract::State, response::Json, routing::post, Router};
use tracing::info;

use monitor_services::CycleReport;

use crate::AppState;

/// POST /api/fetch - run a cycle now (waits for any cycle in progress)
async fn fetch_now(State(state): State<AppState>) -> Json<CycleReport> {
    info!("Manual fetch requested");
    Json(state.monitor.fetch_now().await)
}

/// Create fetch routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/fetch", post(fetch_now))
}
