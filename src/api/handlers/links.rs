//! Handler for link creation endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::links::{CreateLinkRequest, CreateLinkResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link for a long URL.
///
/// # Endpoint
///
/// `POST /api/v1/links`
///
/// # Request Body
///
/// ```json
/// { "long_url": "https://example.com/some/long/path" }
/// ```
///
/// # Response
///
/// **201 Created**
///
/// ```json
/// {
///   "short_code": "aB3xK9",
///   "long_url": "https://example.com/some/long/path",
///   "full_short_url": "http://localhost:8080/aB3xK9"
/// }
/// ```
///
/// # Errors
///
/// - **400 Bad Request**: Malformed body or invalid URL
/// - **503 Service Unavailable**: No free short code found
/// - **500 Internal Server Error**: Store or random source failure
pub async fn create_link_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateLinkRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateLinkResponse>), AppError> {
    let Json(payload) = payload.map_err(|rejection| {
        AppError::bad_request(
            "Invalid request body",
            json!({ "reason": rejection.body_text() }),
        )
    })?;

    payload.validate()?;

    let link = state.link_service.create_link(&payload.long_url).await?;
    let full_short_url = state.link_service.short_url(&link.short_code);

    Ok((
        StatusCode::CREATED,
        Json(CreateLinkResponse {
            short_code: link.short_code,
            long_url: link.long_url,
            full_short_url,
        }),
    ))
}
