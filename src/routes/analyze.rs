// ABOUTME: Food photo analysis route accepting a multipart image upload
// ABOUTME: Maps pipeline outcomes to the 200, 400, 413, and 500 response shapes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Meal Recommender Contributors

//! `POST /analyze`
//!
//! | Outcome                    | Status | Body                                        |
//! |----------------------------|--------|---------------------------------------------|
//! | success                    | 200    | `{detected_items, image_url, recipes}`      |
//! | missing or rejected upload | 400    | `{error}`                                   |
//! | body over the upload limit | 413    | `{error}`                                   |
//! | normalize/publish failure  | 500    | `{error, detected_items: [], recipes: []}`  |

use crate::constants::{messages, uploads};
use crate::errors::{AppError, AppResult};
use crate::models::{AnalysisFailure, UploadedImage};
use crate::resources::ServerResources;
use crate::services::AnalysisError;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::response::{IntoResponse, Response};
use axum::{routing::post, Json, Router};
use http::StatusCode;
use std::sync::Arc;
use tracing::{debug, error};

/// Analysis routes
pub struct AnalyzeRoutes;

impl AnalyzeRoutes {
    /// `POST /analyze` with the configured body limit
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        let body_limit = resources.config.uploads.max_bytes;
        Router::new()
            .route("/analyze", post(Self::handle_analyze))
            .layer(DefaultBodyLimit::max(body_limit))
            .with_state(resources)
    }

    async fn handle_analyze(
        State(resources): State<Arc<ServerResources>>,
        multipart: Result<Multipart, MultipartRejection>,
    ) -> Response {
        let upload = match multipart {
            Ok(multipart) => match read_image_field(multipart).await {
                Ok(upload) => upload,
                Err(e) => return e.into_response(),
            },
            Err(rejection) => {
                debug!(reason = %rejection.body_text(), "Request body is not multipart");
                None
            }
        };

        match resources.analysis.analyze(upload).await {
            Ok(result) => (StatusCode::OK, Json(result)).into_response(),
            Err(AnalysisError::Rejected(e)) => e.into_response(),
            Err(AnalysisError::Processing(e)) => {
                error!(error = %e, "Returning processing failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(AnalysisFailure::new(messages::ERROR_PROCESSING_IMAGE)),
                )
                    .into_response()
            }
        }
    }
}

/// First `image` field that carries a filename, if any
async fn read_image_field(mut multipart: Multipart) -> AppResult<Option<UploadedImage>> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(uploads::IMAGE_FIELD) {
            continue;
        }
        // a plain form value is not a file
        let Some(filename) = field.file_name().map(ToOwned::to_owned) else {
            continue;
        };
        let content_type = field.content_type().map(ToOwned::to_owned);
        let data = field.bytes().await.map_err(multipart_error)?;

        return Ok(Some(UploadedImage::new(data.to_vec(), filename, content_type)));
    }
    Ok(None)
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::payload_too_large(messages::FILE_TOO_LARGE)
    } else {
        AppError::invalid_input(e.body_text())
    }
}
