// ABOUTME: HTTP middleware for CORS, request tracing, and panic recovery
// ABOUTME: Composed around the router in the server module
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Meal Recommender Contributors

/// CORS configuration
pub mod cors;
/// Panic recovery into JSON responses
pub mod panic;
/// Per-request spans carrying the request ID
pub mod tracing;

pub use cors::setup_cors;
pub use panic::handle_panic;
pub use self::tracing::{record_response, request_span, REQUEST_ID_HEADER};
