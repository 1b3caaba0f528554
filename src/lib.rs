// ABOUTME: Meal Recommender library: food photo analysis HTTP service
// ABOUTME: Uploads are stored, labelled by a vision service, and matched to recipes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Meal Recommender Contributors

#![deny(unsafe_code)]

//! # Meal Recommender
//!
//! An HTTP service that accepts a food photo, publishes it to object
//! storage, asks a vision service which foods it shows, and suggests
//! recipes using those ingredients.
//!
//! ## Modules
//!
//! - **config**: environment-based configuration
//! - **logging**: `tracing` subscriber setup
//! - **imaging**: HEIC to JPEG normalization
//! - **external**: storage, vision, and recipe clients behind traits
//! - **services**: the analysis pipeline
//! - **routes** / **server**: HTTP surface

/// Environment-based configuration
pub mod config;
/// External collaborator clients
pub mod external;
/// Upload format normalization
pub mod imaging;
/// Structured logging setup
pub mod logging;
/// HTTP middleware
pub mod middleware;
/// Shared server resources
pub mod resources;
/// HTTP routes
pub mod routes;
/// Server assembly and lifecycle
pub mod server;
/// Request orchestration
pub mod services;
/// Shared helpers
pub mod utils;

// Re-export core crate modules so `crate::errors` etc. resolve here too
pub use recommender_core::{constants, errors, models};
