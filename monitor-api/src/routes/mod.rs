//! API route definitions

mod articles;
mod fetch;
mod health;

use axum::Router;

use crate::AppState;

/// Create all API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(articles::routes())
        .merge(fetch::routes())
        .merge(health::routes())
}
