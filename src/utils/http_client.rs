// ABOUTME: Outbound HTTP client construction with connection pooling and timeouts
// ABOUTME: One client is built at startup and cloned into every collaborator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Meal Recommender Contributors

use crate::config::HttpClientConfig;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// `User-Agent` sent on every outbound request
pub const USER_AGENT: &str = concat!("meal-recommender/", env!("CARGO_PKG_VERSION"));

/// Create an HTTP client with the configured timeouts
///
/// Falls back to a default client if the builder fails (e.g. TLS backend init).
#[must_use]
pub fn client_from_config(config: &HttpClientConfig) -> Client {
    create_client_with_timeout(config.timeout_secs, config.connect_timeout_secs)
}

/// Create an HTTP client with explicit timeouts in seconds
#[must_use]
pub fn create_client_with_timeout(timeout_secs: u64, connect_timeout_secs: u64) -> Client {
    ClientBuilder::new()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(connect_timeout_secs))
        .user_agent(USER_AGENT)
        .build()
        .unwrap_or_else(|_| Client::new())
}
