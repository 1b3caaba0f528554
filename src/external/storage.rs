// ABOUTME: Blob publishing seam and its Google Cloud Storage JSON API implementation
// ABOUTME: Writes the object under a timestamped key, grants public read, returns its URL
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Meal Recommender Contributors

use super::google_auth::GoogleTokenProvider;
use crate::config::StorageConfig;
use crate::errors::StorageError;
use crate::models::{NormalizedImage, PublishedImageRef};
use crate::utils::filename::storage_key;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info};

/// Source of the upload timestamp used in object keys
pub type Clock = fn() -> DateTime<Utc>;

/// Stores an image and makes it publicly readable
#[async_trait]
pub trait BlobPublisher: Send + Sync {
    /// Publish `image` and return where it can be fetched
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write or the permission change fails
    async fn publish(&self, image: &NormalizedImage) -> Result<PublishedImageRef, StorageError>;
}

/// Google Cloud Storage publisher
pub struct GcsPublisher {
    http_client: reqwest::Client,
    tokens: Arc<GoogleTokenProvider>,
    bucket: String,
    base_url: String,
    clock: Clock,
}

impl GcsPublisher {
    /// Create a publisher for the configured bucket
    #[must_use]
    pub fn new(
        config: &StorageConfig,
        http_client: reqwest::Client,
        tokens: Arc<GoogleTokenProvider>,
    ) -> Self {
        Self {
            http_client,
            tokens,
            bucket: config.bucket.clone(),
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            clock: Utc::now,
        }
    }

    /// Replace the wall clock used for object keys
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// URL anyone can read `blob_name` from
    #[must_use]
    pub fn public_url(&self, blob_name: &str) -> String {
        format!("{}/{}/{blob_name}", self.base_url, self.bucket)
    }

    async fn bearer_token(&self) -> Result<String, StorageError> {
        self.tokens
            .access_token()
            .await
            .map_err(|e| StorageError::Credentials(e.to_string()))
    }

    async fn upload(
        &self,
        token: &str,
        blob_name: &str,
        image: &NormalizedImage,
    ) -> Result<(), StorageError> {
        let url = format!("{}/upload/storage/v1/b/{}/o", self.base_url, self.bucket);
        let response = self
            .http_client
            .post(&url)
            .bearer_auth(token)
            .query(&[("uploadType", "media"), ("name", blob_name)])
            .header(reqwest::header::CONTENT_TYPE, &image.content_type)
            .body(image.data.clone())
            .send()
            .await
            .map_err(|e| StorageError::transport("upload", e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StorageError::status(
                "upload",
                status.as_u16(),
                response.text().await.unwrap_or_default(),
            ));
        }
        Ok(())
    }

    async fn make_public(&self, token: &str, blob_name: &str) -> Result<(), StorageError> {
        let url = format!(
            "{}/storage/v1/b/{}/o/{}/acl",
            self.base_url,
            self.bucket,
            urlencoding::encode(blob_name)
        );
        let response = self
            .http_client
            .post(&url)
            .bearer_auth(token)
            .json(&json!({ "entity": "allUsers", "role": "READER" }))
            .send()
            .await
            .map_err(|e| StorageError::transport("make_public", e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StorageError::status(
                "make_public",
                status.as_u16(),
                response.text().await.unwrap_or_default(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl BlobPublisher for GcsPublisher {
    async fn publish(&self, image: &NormalizedImage) -> Result<PublishedImageRef, StorageError> {
        let blob_name = storage_key((self.clock)(), &image.filename);
        let token = self.bearer_token().await?;

        self.upload(&token, &blob_name, image).await?;
        debug!(blob.name = %blob_name, bytes = image.data.len(), "Uploaded object");

        self.make_public(&token, &blob_name).await?;
        info!(blob.name = %blob_name, bucket = %self.bucket, "Published upload");

        Ok(PublishedImageRef {
            public_url: self.public_url(&blob_name),
            blob_name,
        })
    }
}
