// ABOUTME: Environment-based server configuration loaded from process variables and .env
// ABOUTME: Ports, upload limits, and endpoint/credential settings for storage, vision, and recipes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Meal Recommender Contributors

//! Environment-based configuration management

use super::network::{CorsConfig, HttpClientConfig};
use crate::constants::{food, google, limits, recipes, uploads};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use tracing::{info, warn};

/// Deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development (default)
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Upload acceptance rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Maximum request body size in bytes
    pub max_bytes: usize,
    /// Accepted filename extensions, lower-case
    pub allowed_extensions: Vec<String>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_bytes: limits::MAX_UPLOAD_BYTES,
            allowed_extensions: uploads::ALLOWED_EXTENSIONS
                .iter()
                .map(|&ext| ext.to_owned())
                .collect(),
        }
    }
}

impl UploadConfig {
    /// Whether `extension` (any case) is accepted
    #[must_use]
    pub fn is_allowed(&self, extension: &str) -> bool {
        let extension = extension.to_lowercase();
        self.allowed_extensions.iter().any(|ext| *ext == extension)
    }
}

/// Recipe search service settings
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeApiConfig {
    /// API base URL
    pub base_url: String,
    /// API key sent as the `apiKey` query parameter
    pub api_key: String,
    /// Maximum recipes requested per lookup
    pub result_limit: u32,
}

impl Default for RecipeApiConfig {
    fn default() -> Self {
        Self {
            base_url: recipes::DEFAULT_API_BASE_URL.to_owned(),
            api_key: String::new(),
            result_limit: limits::RECIPE_RESULT_LIMIT,
        }
    }
}

impl RecipeApiConfig {
    /// Whether a usable key is present (not empty, not the sample placeholder)
    #[must_use]
    pub fn has_usable_key(&self) -> bool {
        let key = self.api_key.trim();
        !key.is_empty() && key != recipes::PLACEHOLDER_API_KEY
    }
}

impl fmt::Debug for RecipeApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecipeApiConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("result_limit", &self.result_limit)
            .finish()
    }
}

/// Blob storage settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Bucket receiving uploads
    pub bucket: String,
    /// Storage API base URL, also used to build public object URLs
    pub base_url: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            bucket: google::DEFAULT_BUCKET.to_owned(),
            base_url: google::DEFAULT_STORAGE_BASE_URL.to_owned(),
        }
    }
}

/// Label detection settings
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct VisionConfig {
    /// Vision API base URL
    pub base_url: String,
    /// API key; when absent the request carries a bearer token instead
    pub api_key: Option<String>,
    /// Labels requested per image
    pub max_results: u32,
    /// Minimum score a label needs to be kept
    pub confidence_threshold: f32,
    /// Lower-case terms a kept label must contain
    pub food_terms: Vec<String>,
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            base_url: google::DEFAULT_VISION_BASE_URL.to_owned(),
            api_key: None,
            max_results: limits::VISION_MAX_RESULTS,
            confidence_threshold: limits::LABEL_CONFIDENCE_THRESHOLD,
            food_terms: food::FOOD_TERMS.iter().map(|&t| t.to_owned()).collect(),
        }
    }
}

impl fmt::Debug for VisionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VisionConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("max_results", &self.max_results)
            .field("confidence_threshold", &self.confidence_threshold)
            .field("food_terms", &self.food_terms)
            .finish()
    }
}

/// Google access token sources
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoogleAuthConfig {
    /// Static bearer token; skips the metadata server when set
    pub access_token: Option<String>,
    /// Metadata server base URL
    pub metadata_base_url: String,
}

impl Default for GoogleAuthConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            metadata_base_url: google::DEFAULT_METADATA_BASE_URL.to_owned(),
        }
    }
}

impl fmt::Debug for GoogleAuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleAuthConfig")
            .field("access_token", &self.access_token.as_ref().map(|_| "[REDACTED]"))
            .field("metadata_base_url", &self.metadata_base_url)
            .finish()
    }
}

/// Main server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP listen port
    pub http_port: u16,
    /// HTTP listen address
    pub host: String,
    /// Deployment environment
    pub environment: Environment,
    /// Upload acceptance rules
    pub uploads: UploadConfig,
    /// Recipe search service
    pub recipe_api: RecipeApiConfig,
    /// Blob storage
    pub storage: StorageConfig,
    /// Label detection
    pub vision: VisionConfig,
    /// Google access token sources
    pub google_auth: GoogleAuthConfig,
    /// Outbound HTTP client timeouts
    pub http_client: HttpClientConfig,
    /// Allowed browser origins
    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: 8080,
            host: "0.0.0.0".to_owned(),
            environment: Environment::default(),
            uploads: UploadConfig::default(),
            recipe_api: RecipeApiConfig::default(),
            storage: StorageConfig::default(),
            vision: VisionConfig::default(),
            google_auth: GoogleAuthConfig::default(),
            http_client: HttpClientConfig::default(),
            cors: CorsConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if `SPOONACULAR_API_KEY` is unset, a numeric variable
    /// fails to parse, or validation fails
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        if let Err(e) = dotenvy::dotenv() {
            warn!("No .env file found or failed to load: {}", e);
        }

        let http_port = match env::var("PORT") {
            Ok(port) => port,
            Err(_) => env_var_or("HTTP_PORT", "8080")?,
        }
        .parse()
        .context("Invalid PORT/HTTP_PORT value")?;

        let api_key = env::var("SPOONACULAR_API_KEY")
            .context("SPOONACULAR_API_KEY environment variable is required")?;

        let config = Self {
            http_port,
            host: env_var_or("HOST", "0.0.0.0")?,
            environment: Environment::from_str_or_default(&env_var_or(
                "ENVIRONMENT",
                "development",
            )?),
            uploads: UploadConfig {
                max_bytes: parse_env("MAX_UPLOAD_BYTES", limits::MAX_UPLOAD_BYTES)?,
                ..UploadConfig::default()
            },
            recipe_api: RecipeApiConfig {
                base_url: env_var_or("SPOONACULAR_BASE_URL", recipes::DEFAULT_API_BASE_URL)?,
                api_key,
                result_limit: parse_env("RECIPE_RESULT_LIMIT", limits::RECIPE_RESULT_LIMIT)?,
            },
            storage: StorageConfig {
                bucket: env_var_or("GCS_BUCKET", google::DEFAULT_BUCKET)?,
                base_url: env_var_or("GCS_API_BASE", google::DEFAULT_STORAGE_BASE_URL)?,
            },
            vision: VisionConfig {
                base_url: env_var_or("VISION_API_BASE", google::DEFAULT_VISION_BASE_URL)?,
                api_key: optional_env("GOOGLE_API_KEY"),
                max_results: parse_env("VISION_MAX_RESULTS", limits::VISION_MAX_RESULTS)?,
                confidence_threshold: parse_env(
                    "LABEL_CONFIDENCE_THRESHOLD",
                    limits::LABEL_CONFIDENCE_THRESHOLD,
                )?,
                ..VisionConfig::default()
            },
            google_auth: GoogleAuthConfig {
                access_token: optional_env("GOOGLE_OAUTH_ACCESS_TOKEN"),
                metadata_base_url: env_var_or(
                    "GCE_METADATA_HOST_URL",
                    google::DEFAULT_METADATA_BASE_URL,
                )?,
            },
            http_client: HttpClientConfig::from_env(),
            cors: CorsConfig::from_env(),
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error when a limit is zero, the threshold is outside `[0, 1]`,
    /// or the bucket name is empty
    pub fn validate(&self) -> Result<()> {
        if self.uploads.max_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_UPLOAD_BYTES must be greater than zero"));
        }

        if !(0.0..=1.0).contains(&self.vision.confidence_threshold) {
            return Err(anyhow::anyhow!(
                "LABEL_CONFIDENCE_THRESHOLD must be between 0 and 1, got {}",
                self.vision.confidence_threshold
            ));
        }

        if self.recipe_api.result_limit == 0 {
            return Err(anyhow::anyhow!("RECIPE_RESULT_LIMIT must be greater than zero"));
        }

        if self.storage.bucket.trim().is_empty() {
            return Err(anyhow::anyhow!("GCS_BUCKET cannot be empty"));
        }

        if !self.recipe_api.has_usable_key() {
            warn!("SPOONACULAR_API_KEY is empty or a placeholder; recipe lookups will return no results");
        }

        Ok(())
    }

    /// Human-readable configuration summary without secrets
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Meal Recommender Configuration:\n\
             - Listen: {}:{}\n\
             - Environment: {}\n\
             - Max Upload: {} bytes\n\
             - Bucket: {}\n\
             - Vision API: {} ({})\n\
             - Recipe API: {} (key {})\n\
             - Label Threshold: {}\n\
             - Recipe Limit: {}\n\
             - CORS Origins: {}",
            self.host,
            self.http_port,
            self.environment,
            self.uploads.max_bytes,
            self.storage.bucket,
            self.vision.base_url,
            if self.vision.api_key.is_some() {
                "api key"
            } else {
                "bearer token"
            },
            self.recipe_api.base_url,
            if self.recipe_api.has_usable_key() {
                "configured"
            } else {
                "missing"
            },
            self.vision.confidence_threshold,
            self.recipe_api.result_limit,
            self.cors.allowed_origins,
        )
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> Result<String> {
    Ok(env::var(key).unwrap_or_else(|_| default.to_owned()))
}

/// Non-empty environment variable, if set
fn optional_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Parse an environment variable, falling back to `default` when unset
fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid {key} value: {raw}")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_service_contract() {
        let config = ServerConfig::default();
        assert_eq!(config.uploads.max_bytes, 16 * 1024 * 1024);
        assert!(config.uploads.is_allowed("HEIC"));
        assert!(config.uploads.is_allowed("jpeg"));
        assert!(!config.uploads.is_allowed("gif"));
        assert!((config.vision.confidence_threshold - 0.7).abs() < f32::EPSILON);
        assert_eq!(config.recipe_api.result_limit, 5);
        assert_eq!(config.storage.bucket, "meal-recommender-uploads-kitchenapp");
    }

    #[test]
    fn test_placeholder_key_is_not_usable() {
        let mut recipe_api = RecipeApiConfig::default();
        assert!(!recipe_api.has_usable_key());

        recipe_api.api_key = "YOUR_API_KEY_HERE".to_owned();
        assert!(!recipe_api.has_usable_key());

        recipe_api.api_key = "abc123".to_owned();
        assert!(recipe_api.has_usable_key());
    }

    #[test]
    fn test_validate_rejects_bad_limits() {
        let mut config = ServerConfig::default();
        config.vision.confidence_threshold = 1.5;
        assert!(config.validate().is_err());

        let mut config = ServerConfig::default();
        config.recipe_api.result_limit = 0;
        assert!(config.validate().is_err());

        let mut config = ServerConfig::default();
        config.storage.bucket = "  ".to_owned();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_summary_hides_secrets() {
        let mut config = ServerConfig::default();
        config.recipe_api.api_key = "super-secret".to_owned();
        config.vision.api_key = Some("vision-secret".to_owned());

        let summary = config.summary();
        assert!(!summary.contains("super-secret"));
        assert!(!summary.contains("vision-secret"));
        assert!(summary.contains("key configured"));

        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(!debug.contains("vision-secret"));
    }
}
