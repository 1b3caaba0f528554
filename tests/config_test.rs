// ABOUTME: Integration tests for environment-based server configuration
// ABOUTME: Serialized because they mutate process environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Meal Recommender Contributors

#![allow(clippy::unwrap_used, clippy::expect_used)]

use meal_recommender::config::{Environment, ServerConfig};
use meal_recommender::logging::{LogFormat, LoggingConfig};
use serial_test::serial;
use std::env;

const VARS: &[&str] = &[
    "PORT",
    "HTTP_PORT",
    "HOST",
    "SPOONACULAR_API_KEY",
    "SPOONACULAR_BASE_URL",
    "GCS_BUCKET",
    "GCS_API_BASE",
    "VISION_API_BASE",
    "GOOGLE_API_KEY",
    "GOOGLE_OAUTH_ACCESS_TOKEN",
    "MAX_UPLOAD_BYTES",
    "LABEL_CONFIDENCE_THRESHOLD",
    "RECIPE_RESULT_LIMIT",
    "VISION_MAX_RESULTS",
    "CORS_ALLOWED_ORIGINS",
    "ENVIRONMENT",
    "LOG_FORMAT",
    "LOG_INCLUDE_LOCATION",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_missing_api_key_fails_startup() {
    clear_env();

    let error = ServerConfig::from_env().unwrap_err();
    assert!(error.to_string().contains("SPOONACULAR_API_KEY"));
}

#[test]
#[serial]
fn test_defaults_with_only_api_key() {
    clear_env();
    env::set_var("SPOONACULAR_API_KEY", "abc123");

    let config = ServerConfig::from_env().unwrap();
    assert_eq!(config.http_port, 8080);
    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.recipe_api.base_url, "https://api.spoonacular.com");
    assert_eq!(config.storage.bucket, "meal-recommender-uploads-kitchenapp");
    assert_eq!(config.uploads.max_bytes, 16 * 1024 * 1024);
    assert_eq!(config.recipe_api.result_limit, 5);
    assert_eq!(config.vision.max_results, 10);
    assert!(config.vision.api_key.is_none());

    clear_env();
}

#[test]
#[serial]
fn test_overrides_are_applied() {
    clear_env();
    env::set_var("SPOONACULAR_API_KEY", "abc123");
    env::set_var("PORT", "9090");
    env::set_var("HTTP_PORT", "7070");
    env::set_var("GCS_BUCKET", "other-bucket");
    env::set_var("GOOGLE_API_KEY", "vision-key");
    env::set_var("LABEL_CONFIDENCE_THRESHOLD", "0.85");
    env::set_var("RECIPE_RESULT_LIMIT", "3");

    let config = ServerConfig::from_env().unwrap();
    assert_eq!(config.http_port, 9090);
    assert_eq!(config.storage.bucket, "other-bucket");
    assert_eq!(config.vision.api_key.as_deref(), Some("vision-key"));
    assert!((config.vision.confidence_threshold - 0.85).abs() < f32::EPSILON);
    assert_eq!(config.recipe_api.result_limit, 3);

    clear_env();
}

#[test]
#[serial]
fn test_invalid_numbers_are_rejected() {
    clear_env();
    env::set_var("SPOONACULAR_API_KEY", "abc123");
    env::set_var("MAX_UPLOAD_BYTES", "lots");

    assert!(ServerConfig::from_env().is_err());

    env::set_var("MAX_UPLOAD_BYTES", "1024");
    env::set_var("LABEL_CONFIDENCE_THRESHOLD", "2.0");
    assert!(ServerConfig::from_env().is_err());

    clear_env();
}

#[test]
#[serial]
fn test_placeholder_key_still_starts() {
    clear_env();
    env::set_var("SPOONACULAR_API_KEY", "YOUR_API_KEY_HERE");

    let config = ServerConfig::from_env().unwrap();
    assert!(!config.recipe_api.has_usable_key());

    clear_env();
}

#[test]
#[serial]
fn test_production_environment_selects_json_logs() {
    clear_env();
    env::set_var("ENVIRONMENT", "production");

    let logging = LoggingConfig::from_env();
    assert_eq!(logging.environment, Environment::Production);
    assert_eq!(logging.format, LogFormat::Json);
    assert!(logging.include_location);

    env::set_var("LOG_FORMAT", "compact");
    assert_eq!(LoggingConfig::from_env().format, LogFormat::Compact);

    env::set_var("ENVIRONMENT", "development");
    env::remove_var("LOG_FORMAT");
    let logging = LoggingConfig::from_env();
    assert_eq!(logging.format, LogFormat::Pretty);
    assert!(!logging.include_location);
}
