//! HTTP request/response tracing middleware.

use axum::http::Request;
use tower_http::LatencyUnit;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultOnFailure, DefaultOnResponse, MakeSpan, TraceLayer};
use tracing::{Level, Span};

/// Opens the per-request span with the method and path only.
///
/// The query string is left out, so redirect spans carry just the short code.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestSpan;

impl<B> MakeSpan<B> for RequestSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        tracing::info_span!(
            "request",
            method = %request.method(),
            path = %request.uri().path(),
        )
    }
}

/// Creates a tracing layer opening one `INFO` span per request.
///
/// Responses are logged at `INFO` with status and latency in milliseconds.
/// Server errors (store outages, exhausted code space) are additionally logged
/// at `ERROR`; a 404 for an unknown code is not a failure.
///
/// ```text
/// INFO request{method=GET path=/aB3xK9}: finished processing request latency=1 ms status=302
/// ERROR request{method=POST path=/api/v1/links}: response failed classification=Status code: 503 Service Unavailable latency=2 ms
/// ```
pub fn layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>, RequestSpan> {
    TraceLayer::new_for_http()
        .make_span_with(RequestSpan)
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
        .on_failure(
            DefaultOnFailure::new()
                .level(Level::ERROR)
                .latency_unit(LatencyUnit::Millis),
        )
}
