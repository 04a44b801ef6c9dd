// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use age_gender_node::{
    api::{start_server, AppState},
    config::ServiceConfig,
    inference::Predictor,
    version,
};
use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServiceConfig::parse();

    info!("🚀 Starting {}", version::get_version_string());
    info!("  Age model: {}", config.age_model.display());
    info!("  Gender model: {}", config.gender_model.display());
    info!("  Max upload: {} bytes", config.max_upload_bytes);

    // Models are loaded once and shared read-only by every request
    let predictor = Predictor::load(&config.model_config()).context("Failed to load models")?;
    info!("✅ Models loaded: {:?}", predictor);

    let state = AppState::new(Arc::new(predictor), &config);
    start_server(state, config.bind_addr()).await?;

    info!("Goodbye!");
    Ok(())
}
