// ABOUTME: Server binary for the Meal Recommender HTTP service
// ABOUTME: Loads configuration, initializes logging, builds clients, and serves requests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Meal Recommender Contributors

//! # Meal Recommender Server Binary

use anyhow::Result;
use clap::Parser;
use meal_recommender::{config::ServerConfig, logging, resources::ServerResources, server};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "meal-recommender")]
#[command(about = "Food photo analysis and recipe suggestion service")]
struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // .env must be loaded before logging reads LOG_FORMAT / RUST_LOG
    dotenvy::dotenv().ok();
    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    info!("{}", config.summary());

    let resources = Arc::new(ServerResources::from_config(config));

    if let Err(e) = server::run(resources).await {
        error!("Server error: {e:#}");
        return Err(e);
    }

    Ok(())
}
