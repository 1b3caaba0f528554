// ABOUTME: Route module organization for the HTTP endpoints
// ABOUTME: Landing page, analysis upload, and health checks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Meal Recommender Contributors

//! Routes
//!
//! Each module holds route definitions and thin handlers that delegate to
//! the service layer.

/// Image analysis upload
pub mod analyze;
/// Health check and readiness routes
pub mod health;
/// Landing page and its script
pub mod home;

pub use analyze::AnalyzeRoutes;
pub use health::HealthRoutes;
pub use home::HomeRoutes;
