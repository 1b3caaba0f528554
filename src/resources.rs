// ABOUTME: Shared server resources injected into every route
// ABOUTME: Builds the production collaborator clients from configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Meal Recommender Contributors

//! Centralized resource container for dependency injection

use crate::config::ServerConfig;
use crate::external::{
    BlobPublisher, CloudVisionClient, GcsPublisher, GoogleTokenProvider, LabelDetector,
    RecipeLookup, SpoonacularClient,
};
use crate::imaging::ImageNormalizer;
use crate::services::AnalysisService;
use crate::utils::http_client::client_from_config;
use std::sync::Arc;

/// Resources shared by all requests
#[derive(Clone)]
pub struct ServerResources {
    /// Loaded configuration
    pub config: Arc<ServerConfig>,
    /// Analysis pipeline
    pub analysis: Arc<AnalysisService>,
}

impl ServerResources {
    /// Wrap an already-built pipeline
    #[must_use]
    pub fn new(config: ServerConfig, analysis: AnalysisService) -> Self {
        Self {
            config: Arc::new(config),
            analysis: Arc::new(analysis),
        }
    }

    /// Build the production clients from `config`
    #[must_use]
    pub fn from_config(config: ServerConfig) -> Self {
        let http_client = client_from_config(&config.http_client);
        let tokens = Arc::new(GoogleTokenProvider::new(
            &config.google_auth,
            http_client.clone(),
        ));

        let publisher: Arc<dyn BlobPublisher> = Arc::new(GcsPublisher::new(
            &config.storage,
            http_client.clone(),
            Arc::clone(&tokens),
        ));
        let detector: Arc<dyn LabelDetector> = Arc::new(CloudVisionClient::new(
            config.vision.clone(),
            http_client.clone(),
            tokens,
        ));
        let recipes: Arc<dyn RecipeLookup> = Arc::new(SpoonacularClient::new(
            config.recipe_api.clone(),
            http_client,
        ));

        let analysis = AnalysisService::new(
            config.uploads.clone(),
            ImageNormalizer::default(),
            publisher,
            detector,
            recipes,
        );

        Self::new(config, analysis)
    }
}
