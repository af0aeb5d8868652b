//! API route configuration.

use crate::api::handlers::{create_link_handler, link_stats_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Versioned API routes, mounted under `/api/v1`.
///
/// # Endpoints
///
/// - `POST /links`                - Create a short link
/// - `GET  /links/{code}/stats`   - Total clicks for a link
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/links", post(create_link_handler))
        .route("/links/{code}/stats", get(link_stats_handler))
}
