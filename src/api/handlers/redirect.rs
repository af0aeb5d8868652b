//! Handler for short URL redirect.

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
};
use std::net::SocketAddr;
use tracing::debug;

use crate::domain::click_event::ClickEvent;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_addr::client_address;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Resolve the code through the link service
/// 2. Submit a click event to the pipeline (never waits)
/// 3. Return 302 Found with the long URL in `Location`
///
/// # Click Tracking
///
/// If the click queue is full the event is dropped; the redirect is served
/// either way.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
) -> Result<impl IntoResponse, AppError> {
    let link = state.link_service.get_by_short_code(&code).await?;

    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok());
    let source_address = client_address(&headers, peer, state.behind_proxy);

    state
        .click_pipeline
        .submit(ClickEvent::new(link.id, user_agent, Some(source_address)));

    debug!(code = %link.short_code, target = %link.long_url, "Redirecting");

    Ok((StatusCode::FOUND, [(header::LOCATION, link.long_url)]))
}
