// ABOUTME: Label detection seam and its Google Cloud Vision REST implementation
// ABOUTME: Requests labels for a public image URL and keeps confident food-related ones
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Meal Recommender Contributors

//! Cloud Vision label detection
//!
//! Uses `POST /v1/images:annotate` with a `LABEL_DETECTION` feature and the
//! image referenced by URI, so the bytes are not sent twice.

use super::google_auth::GoogleTokenProvider;
use crate::config::VisionConfig;
use crate::errors::VisionError;
use crate::models::FoodLabel;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

/// Finds food labels for a published image
#[async_trait]
pub trait LabelDetector: Send + Sync {
    /// Food labels for the image at `image_url`, in service order
    ///
    /// # Errors
    ///
    /// Returns `VisionError` if the service cannot be reached or reports an error
    async fn detect_labels(&self, image_url: &str) -> Result<Vec<FoodLabel>, VisionError>;
}

/// Keep labels scoring at least `threshold` whose lower-cased description
/// contains one of `terms`, preserving order
///
/// Applying the filter to its own output returns the same labels.
#[must_use]
pub fn filter_food_labels<I>(labels: I, threshold: f32, terms: &[String]) -> Vec<FoodLabel>
where
    I: IntoIterator<Item = FoodLabel>,
{
    labels
        .into_iter()
        .filter(|label| label.score >= threshold)
        .filter(|label| {
            let description = label.description.to_lowercase();
            terms.iter().any(|term| description.contains(term.as_str()))
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct AnnotateResponse {
    #[serde(default)]
    responses: Vec<AnnotateImageResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnnotateImageResponse {
    #[serde(default)]
    label_annotations: Vec<EntityAnnotation>,
    error: Option<RpcStatus>,
}

#[derive(Debug, Deserialize)]
struct EntityAnnotation {
    #[serde(default)]
    description: String,
    #[serde(default)]
    score: f32,
}

#[derive(Debug, Deserialize)]
struct RpcStatus {
    #[serde(default)]
    code: i32,
    #[serde(default)]
    message: String,
}

/// Google Cloud Vision client
pub struct CloudVisionClient {
    config: VisionConfig,
    http_client: reqwest::Client,
    tokens: Arc<GoogleTokenProvider>,
}

impl CloudVisionClient {
    /// Create a client; `tokens` is used only when no API key is configured
    #[must_use]
    pub fn new(
        config: VisionConfig,
        http_client: reqwest::Client,
        tokens: Arc<GoogleTokenProvider>,
    ) -> Self {
        Self {
            config,
            http_client,
            tokens,
        }
    }

    async fn annotate(&self, image_url: &str) -> Result<Vec<FoodLabel>, VisionError> {
        let url = format!(
            "{}/v1/images:annotate",
            self.config.base_url.trim_end_matches('/')
        );
        let body = json!({
            "requests": [{
                "image": { "source": { "imageUri": image_url } },
                "features": [{ "type": "LABEL_DETECTION", "maxResults": self.config.max_results }]
            }]
        });

        let mut request = self.http_client.post(&url).json(&body);
        request = if let Some(key) = &self.config.api_key {
            request.query(&[("key", key.as_str())])
        } else {
            let token = self
                .tokens
                .access_token()
                .await
                .map_err(|e| VisionError::Credentials(e.to_string()))?;
            request.bearer_auth(token)
        };

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(VisionError::Status {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        let parsed: AnnotateResponse = response.json().await?;
        let first = parsed
            .responses
            .into_iter()
            .next()
            .ok_or_else(|| VisionError::Decode("empty responses array".to_owned()))?;

        if let Some(error) = first.error {
            return Err(VisionError::Annotation {
                code: error.code,
                message: error.message,
            });
        }

        Ok(first
            .label_annotations
            .into_iter()
            .map(|a| FoodLabel::new(a.description, a.score))
            .collect())
    }
}

#[async_trait]
impl LabelDetector for CloudVisionClient {
    async fn detect_labels(&self, image_url: &str) -> Result<Vec<FoodLabel>, VisionError> {
        let labels = self.annotate(image_url).await?;
        let total = labels.len();
        let food = filter_food_labels(
            labels,
            self.config.confidence_threshold,
            &self.config.food_terms,
        );
        debug!(labels.total = total, labels.count = food.len(), "Filtered vision labels");
        Ok(food)
    }
}
