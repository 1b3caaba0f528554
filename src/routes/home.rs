// ABOUTME: Landing page routes serving the upload form and its script
// ABOUTME: Assets are compiled into the binary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Meal Recommender Contributors

use axum::response::{Html, IntoResponse};
use axum::{routing::get, Router};
use http::header;

const INDEX_HTML: &str = include_str!("../../static/index.html");
const MAIN_JS: &str = include_str!("../../static/js/main.js");

/// Landing page routes
pub struct HomeRoutes;

impl HomeRoutes {
    /// `GET /` and `GET /static/js/main.js`
    pub fn routes() -> Router {
        Router::new()
            .route("/", get(Self::handle_index))
            .route("/static/js/main.js", get(Self::handle_script))
    }

    async fn handle_index() -> Html<&'static str> {
        Html(INDEX_HTML)
    }

    async fn handle_script() -> impl IntoResponse {
        (
            [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
            MAIN_JS,
        )
    }
}
