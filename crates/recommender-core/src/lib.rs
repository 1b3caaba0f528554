// ABOUTME: Core types and constants for the Meal Recommender service
// ABOUTME: Foundation crate with error handling, request-scoped models, and fixed vocabularies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Meal Recommender Contributors

#![deny(unsafe_code)]

//! # Recommender Core
//!
//! Foundation crate shared by the HTTP service and its collaborator clients.
//! It changes rarely, so the service crate recompiles without touching it.
//!
//! ## Modules
//!
//! - **errors**: `AppError`, `ErrorCode`, and the per-collaborator error enums
//! - **constants**: upload rules, label vocabulary, recipe-service constants
//! - **models**: request-scoped entities (`UploadedImage`, `FoodLabel`, `RecipeSuggestion`, ...)

/// Unified error handling with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Request-scoped domain models
pub mod models;
