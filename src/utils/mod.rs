// ABOUTME: Utility module grouping shared HTTP client construction and filename helpers
// ABOUTME: Used by the storage, vision, and recipe clients
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Meal Recommender Contributors

/// Upload filename sanitization and object key construction
pub mod filename;
/// Outbound HTTP client construction
pub mod http_client;
