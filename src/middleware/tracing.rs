// ABOUTME: Request tracing helpers for the tower-http trace layer
// ABOUTME: One span per request with method, path, request ID, status, and latency
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Meal Recommender Contributors

use http::{Request, Response};
use std::time::Duration;
use tracing::Span;

/// Header carrying the request ID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Create the span for an incoming request
///
/// The request-id layer runs first, so the header is normally present.
pub fn request_span<B>(request: &Request<B>) -> Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    tracing::info_span!(
        "http_request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = %request_id,
        status_code = tracing::field::Empty,
        duration_ms = tracing::field::Empty,
    )
}

/// Record status and latency on the request span and log completion
pub fn record_response<B>(response: &Response<B>, latency: Duration, span: &Span) {
    let status = response.status().as_u16();
    let duration_ms = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);
    span.record("status_code", status);
    span.record("duration_ms", duration_ms);

    if response.status().is_server_error() {
        tracing::warn!(status_code = status, duration_ms, "Request failed");
    } else {
        tracing::info!(status_code = status, duration_ms, "Request completed");
    }
}
