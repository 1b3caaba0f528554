// ABOUTME: Configuration management module for server settings and collaborator endpoints
// ABOUTME: Loads environment configuration and re-exports the typed sub-configurations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Meal Recommender Contributors

//! Configuration module
//!
//! - **Environment**: `ServerConfig` and its per-collaborator sections
//! - **Network**: outbound HTTP client timeouts and CORS origins

/// Environment and server configuration
pub mod environment;
/// Network configuration for outbound clients and CORS
pub mod network;

pub use environment::{
    Environment, GoogleAuthConfig, RecipeApiConfig, ServerConfig, StorageConfig, UploadConfig,
    VisionConfig,
};
pub use network::{CorsConfig, HttpClientConfig};
