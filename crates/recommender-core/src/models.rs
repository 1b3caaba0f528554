// ABOUTME: Request-scoped domain models for the food photo analysis pipeline
// ABOUTME: Uploaded image, published reference, food labels, recipe suggestions, and the response aggregate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Meal Recommender Contributors

//! Domain models
//!
//! Nothing here is persisted. Every value is created while handling one
//! `/analyze` request and dropped when the response is sent.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Image bytes received in the `image` multipart field
#[derive(Clone, PartialEq, Eq)]
pub struct UploadedImage {
    /// Raw request bytes
    pub data: Vec<u8>,
    /// Filename declared by the client
    pub filename: String,
    /// Content type declared by the client, if any
    pub content_type: Option<String>,
}

impl UploadedImage {
    /// Create an upload from its parts
    pub fn new(
        data: impl Into<Vec<u8>>,
        filename: impl Into<String>,
        content_type: Option<String>,
    ) -> Self {
        Self {
            data: data.into(),
            filename: filename.into(),
            content_type,
        }
    }

    /// Lower-cased extension after the last `.`, if the filename has one
    #[must_use]
    pub fn extension(&self) -> Option<String> {
        file_extension(&self.filename)
    }
}

impl fmt::Debug for UploadedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadedImage")
            .field("filename", &self.filename)
            .field("content_type", &self.content_type)
            .field("bytes", &self.data.len())
            .finish()
    }
}

/// Lower-cased extension after the last `.` of `filename`
#[must_use]
pub fn file_extension(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, extension)| extension.to_lowercase())
}

/// Image bytes ready to be written to storage
#[derive(Clone, PartialEq, Eq)]
pub struct NormalizedImage {
    /// Encoded bytes
    pub data: Vec<u8>,
    /// Content type to store the object with
    pub content_type: String,
    /// Filename the object is published under
    pub filename: String,
}

impl fmt::Debug for NormalizedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NormalizedImage")
            .field("filename", &self.filename)
            .field("content_type", &self.content_type)
            .field("bytes", &self.data.len())
            .finish()
    }
}

/// A publicly readable object in blob storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishedImageRef {
    /// Object key inside the bucket
    pub blob_name: String,
    /// URL anyone can fetch the object from
    pub public_url: String,
}

/// A label returned by the vision service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodLabel {
    /// Entity description, e.g. "Fruit"
    pub description: String,
    /// Confidence in `[0, 1]`
    pub score: f32,
}

impl FoodLabel {
    /// Create a label
    pub fn new(description: impl Into<String>, score: f32) -> Self {
        Self {
            description: description.into(),
            score,
        }
    }
}

/// A recipe returned by the recipe service plus its derived detail URL
///
/// Fields the service returns beyond the ones named here are kept in
/// `extra` and serialized back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeSuggestion {
    /// Recipe identifier in the recipe service
    pub id: u64,
    /// Human-readable title
    pub title: String,
    /// Thumbnail URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Thumbnail format, e.g. "jpg"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_type: Option<String>,
    /// Number of the queried ingredients the recipe uses
    #[serde(default)]
    pub used_ingredient_count: u32,
    /// Number of ingredients the recipe needs beyond the query
    #[serde(default)]
    pub missed_ingredient_count: u32,
    /// Popularity count
    #[serde(default)]
    pub likes: u32,
    /// Public detail page, derived from `title` and `id`
    pub url: String,
    /// Remaining service fields, passed through
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Success payload of `POST /analyze`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Food label descriptions in the order the vision service returned them
    pub detected_items: Vec<String>,
    /// Public URL of the stored upload
    pub image_url: String,
    /// Recipe suggestions in the recipe service's ranking order
    pub recipes: Vec<RecipeSuggestion>,
}

/// Failure payload of `POST /analyze` for server-side errors
///
/// Carries empty `detected_items` and `recipes` so clients can read the
/// same keys as on success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisFailure {
    /// Error message shown to the client
    pub error: String,
    /// Always empty
    pub detected_items: Vec<String>,
    /// Always empty
    pub recipes: Vec<RecipeSuggestion>,
}

impl AnalysisFailure {
    /// Failure with `error` and empty result lists
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            detected_items: Vec::new(),
            recipes: Vec::new(),
        }
    }
}
