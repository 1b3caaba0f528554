// ABOUTME: Request orchestration for food photo analysis
// ABOUTME: Validate, normalize, publish, detect labels, look up recipes, assemble the result
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Meal Recommender Contributors

//! # Analysis Pipeline
//!
//! Steps run strictly in sequence. Validation, normalization, and publishing
//! failures abort the request. Label detection and recipe lookup failures
//! are logged and degrade to empty lists so the caller still gets the
//! stored image URL.

use crate::config::UploadConfig;
use crate::constants::messages;
use crate::errors::{AppError, RecipeError};
use crate::external::{BlobPublisher, LabelDetector, RecipeLookup};
use crate::imaging::ImageNormalizer;
use crate::models::{AnalysisResult, RecipeSuggestion, UploadedImage};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, instrument, warn};

/// Why an analysis request did not produce a result
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The upload was missing or not acceptable
    #[error("upload rejected: {0}")]
    Rejected(#[source] AppError),

    /// The upload could not be normalized or stored
    #[error("image processing failed: {0}")]
    Processing(#[source] AppError),
}

/// Runs the analysis pipeline against injected collaborators
#[derive(Clone)]
pub struct AnalysisService {
    uploads: UploadConfig,
    normalizer: ImageNormalizer,
    publisher: Arc<dyn BlobPublisher>,
    detector: Arc<dyn LabelDetector>,
    recipes: Arc<dyn RecipeLookup>,
}

impl AnalysisService {
    /// Create a service from its collaborators
    #[must_use]
    pub fn new(
        uploads: UploadConfig,
        normalizer: ImageNormalizer,
        publisher: Arc<dyn BlobPublisher>,
        detector: Arc<dyn LabelDetector>,
        recipes: Arc<dyn RecipeLookup>,
    ) -> Self {
        Self {
            uploads,
            normalizer,
            publisher,
            detector,
            recipes,
        }
    }

    /// Check that an upload is present, named, and has an accepted extension
    ///
    /// # Errors
    ///
    /// Returns a 400-class `AppError` carrying the client-facing message
    pub fn validate(&self, upload: Option<UploadedImage>) -> Result<UploadedImage, AppError> {
        let upload = upload.ok_or_else(|| AppError::missing_field(messages::NO_FILE_PROVIDED))?;

        if upload.filename.is_empty() {
            return Err(AppError::missing_field(messages::NO_FILE_SELECTED));
        }

        match upload.extension() {
            Some(extension) if self.uploads.is_allowed(&extension) => Ok(upload),
            _ => Err(AppError::invalid_input(messages::FILE_TYPE_NOT_ALLOWED)),
        }
    }

    /// Run the full pipeline for one upload
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::Rejected` for validation failures and
    /// `AnalysisError::Processing` when normalizing or publishing fails
    #[instrument(skip_all, fields(upload.filename = tracing::field::Empty))]
    pub async fn analyze(
        &self,
        upload: Option<UploadedImage>,
    ) -> Result<AnalysisResult, AnalysisError> {
        let upload = self.validate(upload).map_err(|e| {
            info!(reason = %e.message, "Rejected upload");
            AnalysisError::Rejected(e)
        })?;
        tracing::Span::current().record("upload.filename", upload.filename.as_str());

        let normalized = self.normalizer.normalize(upload).await.map_err(|e| {
            error!(error = %e, "Failed to normalize upload");
            AnalysisError::Processing(e.into())
        })?;

        let published = self.publisher.publish(&normalized).await.map_err(|e| {
            error!(error = %e, "Failed to publish upload");
            AnalysisError::Processing(e.into())
        })?;

        let detected_items: Vec<String> =
            match self.detector.detect_labels(&published.public_url).await {
                Ok(labels) => labels.into_iter().map(|label| label.description).collect(),
                Err(e) => {
                    warn!(
                        error = %e,
                        blob.name = %published.blob_name,
                        "Label detection failed, continuing without labels"
                    );
                    Vec::new()
                }
            };

        let recipes = self.lookup_recipes(&detected_items).await;

        info!(
            blob.name = %published.blob_name,
            labels.count = detected_items.len(),
            recipes.count = recipes.len(),
            "Analysis completed"
        );

        Ok(AnalysisResult {
            detected_items,
            image_url: published.public_url,
            recipes,
        })
    }

    async fn lookup_recipes(&self, ingredients: &[String]) -> Vec<RecipeSuggestion> {
        match self.recipes.find_by_ingredients(ingredients).await {
            Ok(recipes) => recipes,
            Err(RecipeError::NotConfigured) => {
                error!("Recipe API key is missing or a placeholder, returning no recipes");
                Vec::new()
            }
            Err(e) => {
                warn!(error = %e, "Recipe lookup failed, returning no recipes");
                Vec::new()
            }
        }
    }
}
