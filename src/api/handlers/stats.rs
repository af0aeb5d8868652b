//! Handler for link statistics endpoint.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::stats::LinkStatsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the total click count of a short link.
///
/// # Endpoint
///
/// `GET /api/v1/links/{code}/stats`
///
/// # Response
///
/// ```json
/// {
///   "short_code": "aB3xK9",
///   "long_url": "https://example.com",
///   "total_clicks": 42
/// }
/// ```
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn link_stats_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<LinkStatsResponse>, AppError> {
    let stats = state.link_service.get_stats(&code).await?;

    Ok(Json(stats.into()))
}
