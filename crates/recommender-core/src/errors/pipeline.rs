// ABOUTME: Error enums for each external collaborator in the analysis pipeline
// ABOUTME: Image codec, blob storage, label detection, and recipe search failure kinds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Meal Recommender Contributors

//! # Pipeline Error Types
//!
//! One enum per collaborator so the orchestrator can match on the failure
//! kind. Conversions into `AppError` live in the parent module.

use thiserror::Error;

/// Failures while normalizing an uploaded image
#[derive(Debug, Error)]
pub enum ImageError {
    /// The bytes could not be decoded in the declared format
    #[error("failed to decode {format} image: {reason}")]
    Decode {
        /// Format the decoder expected
        format: &'static str,
        /// Decoder message
        reason: String,
    },

    /// The decoded bitmap could not be re-encoded
    #[error("failed to encode JPEG: {0}")]
    Encode(String),

    /// The binary was built without a HEIC decoder
    #[error("HEIC decoding is not available in this build")]
    HeicUnsupported,

    /// The blocking decode task was cancelled or panicked
    #[error("image processing task failed: {0}")]
    Task(String),
}

impl ImageError {
    /// Create a decode error
    #[must_use]
    pub fn decode(format: &'static str, reason: impl Into<String>) -> Self {
        Self::Decode {
            format,
            reason: reason.into(),
        }
    }
}

/// Failures while publishing an object to blob storage
#[derive(Debug, Error)]
pub enum StorageError {
    /// The request never produced a response
    #[error("storage {operation} request failed: {reason}")]
    Transport {
        /// `upload` or `make_public`
        operation: &'static str,
        /// Transport error message
        reason: String,
    },

    /// The storage API answered with a non-success status
    #[error("storage {operation} returned HTTP {status}: {body}")]
    Status {
        /// `upload` or `make_public`
        operation: &'static str,
        /// HTTP status code
        status: u16,
        /// Response body, for diagnostics
        body: String,
    },

    /// No access token could be obtained
    #[error("storage credentials unavailable: {0}")]
    Credentials(String),
}

impl StorageError {
    /// Create a transport error
    #[must_use]
    pub fn transport(operation: &'static str, reason: impl Into<String>) -> Self {
        Self::Transport {
            operation,
            reason: reason.into(),
        }
    }

    /// Create a non-success status error
    #[must_use]
    pub fn status(operation: &'static str, status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            operation,
            status,
            body: body.into(),
        }
    }
}

/// Failures while requesting label detection
#[derive(Debug, Error)]
pub enum VisionError {
    /// The request never produced a response
    #[error("request failed: {0}")]
    Transport(String),

    /// Non-success HTTP status
    #[error("HTTP {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, for diagnostics
        body: String,
    },

    /// The batch call succeeded but the per-image response carries an error
    #[error("annotation error {code}: {message}")]
    Annotation {
        /// `google.rpc.Code` value
        code: i32,
        /// Error message from the service
        message: String,
    },

    /// The response body did not match the expected schema
    #[error("invalid response: {0}")]
    Decode(String),

    /// No API key or access token could be obtained
    #[error("credentials unavailable: {0}")]
    Credentials(String),
}

/// Failures while searching recipes
#[derive(Debug, Error)]
pub enum RecipeError {
    /// The request never produced a response
    #[error("request failed: {0}")]
    Transport(String),

    /// Non-success HTTP status
    #[error("HTTP {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, for diagnostics
        body: String,
    },

    /// The response body did not match the expected schema
    #[error("invalid response: {0}")]
    Decode(String),

    /// The API key is missing or still the sample placeholder
    #[error("API key not configured")]
    NotConfigured,
}

#[cfg(feature = "provider-errors")]
impl From<reqwest::Error> for VisionError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            Self::Decode(error.to_string())
        } else {
            Self::Transport(error.to_string())
        }
    }
}

#[cfg(feature = "provider-errors")]
impl From<reqwest::Error> for RecipeError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            Self::Decode(error.to_string())
        } else {
            Self::Transport(error.to_string())
        }
    }
}
