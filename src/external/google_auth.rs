// ABOUTME: Google Cloud access token provider for the storage and vision clients
// ABOUTME: Uses a static token when configured, otherwise the metadata server with caching
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Meal Recommender Contributors

//! Google access tokens
//!
//! On Cloud Run and GCE the attached service account's token comes from the
//! metadata server. Tokens are cached until shortly before they expire.

use crate::config::GoogleAuthConfig;
use crate::constants::google;
use serde::Deserialize;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::debug;

const TOKEN_PATH: &str = "/computeMetadata/v1/instance/service-accounts/default/token";

/// Failures while obtaining an access token
#[derive(Debug, Error)]
pub enum TokenError {
    /// The metadata server could not be reached
    #[error("metadata server request failed: {0}")]
    Transport(String),

    /// The metadata server answered with a non-success status
    #[error("metadata server returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body
        body: String,
    },

    /// The token response did not match the expected schema
    #[error("invalid token response: {0}")]
    Decode(String),
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: u64,
}

#[derive(Debug, Clone)]
struct CachedToken {
    token: String,
    refresh_at: Instant,
}

/// Supplies bearer tokens for Google APIs
pub struct GoogleTokenProvider {
    http_client: reqwest::Client,
    static_token: Option<String>,
    metadata_base_url: String,
    cache: RwLock<Option<CachedToken>>,
}

impl GoogleTokenProvider {
    /// Create a provider from configuration
    #[must_use]
    pub fn new(config: &GoogleAuthConfig, http_client: reqwest::Client) -> Self {
        Self {
            http_client,
            static_token: config.access_token.clone(),
            metadata_base_url: config.metadata_base_url.trim_end_matches('/').to_owned(),
            cache: RwLock::new(None),
        }
    }

    /// Current bearer token
    ///
    /// # Errors
    ///
    /// Returns `TokenError` if no static token is configured and the metadata
    /// server cannot supply one
    pub async fn access_token(&self) -> Result<String, TokenError> {
        if let Some(token) = &self.static_token {
            return Ok(token.clone());
        }

        {
            let cache = self.cache.read().await;
            if let Some(cached) = cache.as_ref() {
                if Instant::now() < cached.refresh_at {
                    return Ok(cached.token.clone());
                }
            }
        }

        let mut cache = self.cache.write().await;
        // another task may have refreshed while we waited for the lock
        if let Some(cached) = cache.as_ref() {
            if Instant::now() < cached.refresh_at {
                return Ok(cached.token.clone());
            }
        }

        let fetched = self.fetch_token().await?;
        let lifetime = fetched
            .expires_in
            .saturating_sub(google::TOKEN_REFRESH_MARGIN_SECS);
        debug!(expires_in = fetched.expires_in, "Fetched metadata server token");

        *cache = Some(CachedToken {
            token: fetched.access_token.clone(),
            refresh_at: Instant::now() + Duration::from_secs(lifetime),
        });

        Ok(fetched.access_token)
    }

    async fn fetch_token(&self) -> Result<TokenResponse, TokenError> {
        let url = format!("{}{TOKEN_PATH}", self.metadata_base_url);
        let response = self
            .http_client
            .get(&url)
            .header("Metadata-Flavor", "Google")
            .send()
            .await
            .map_err(|e| TokenError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TokenError::Status {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        response
            .json()
            .await
            .map_err(|e| TokenError::Decode(e.to_string()))
    }
}
