// ABOUTME: Service layer for request orchestration
// ABOUTME: Keeps pipeline logic out of the HTTP handlers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Meal Recommender Contributors

/// Food photo analysis pipeline
pub mod analysis;

pub use analysis::{AnalysisError, AnalysisService};
