// ABOUTME: Converts handler panics into the JSON failure payload
// ABOUTME: Used with tower-http's CatchPanicLayer so a bad request never takes the process down
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Meal Recommender Contributors

use crate::models::AnalysisFailure;
use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use std::any::Any;

/// Build a 500 response from a panic payload
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = payload
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| payload.downcast_ref::<&str>().map(|s| (*s).to_owned()))
        .unwrap_or_else(|| "Internal server error".to_owned());

    tracing::error!(panic = %message, "Request handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(AnalysisFailure::new(message)),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[tokio::test]
    async fn test_panic_message_becomes_error_field() {
        let response = handle_panic(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "boom");
        assert_eq!(json["detected_items"], serde_json::json!([]));
        assert_eq!(json["recipes"], serde_json::json!([]));
    }
}
