// ABOUTME: External collaborator clients for storage, label detection, and recipe search
// ABOUTME: Each collaborator is a trait with one production implementation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Meal Recommender Contributors

//! External API clients
//!
//! The request pipeline only sees the traits; tests substitute fakes.

/// Google access token provider
pub mod google_auth;
/// Spoonacular recipe search
pub mod spoonacular;
/// Google Cloud Storage publishing
pub mod storage;
/// Google Cloud Vision label detection
pub mod vision;

pub use google_auth::{GoogleTokenProvider, TokenError};
pub use spoonacular::{recipe_detail_url, RecipeLookup, SpoonacularClient};
pub use storage::{BlobPublisher, Clock, GcsPublisher};
pub use vision::{filter_food_labels, CloudVisionClient, LabelDetector};
