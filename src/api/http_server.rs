// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{Context, Result};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::health::health_handler;
use super::predict::predict_handler;
use crate::config::ServiceConfig;
use crate::inference::{PipelineOptions, Predictor};

/// Shared state handed to every handler
///
/// Everything here is read-only after startup.
#[derive(Debug, Clone)]
pub struct AppState {
    pub predictor: Arc<Predictor>,
    pub pipeline_options: PipelineOptions,
}

impl AppState {
    pub fn new(predictor: Arc<Predictor>, config: &ServiceConfig) -> Self {
        Self {
            predictor,
            pipeline_options: config.pipeline_options(),
        }
    }

    /// State with default limits, for tests and embedding
    pub fn with_predictor(predictor: Predictor) -> Self {
        Self {
            predictor: Arc::new(predictor),
            pipeline_options: PipelineOptions::default(),
        }
    }
}

/// Build the router with all routes and middleware
pub fn create_app(state: Arc<AppState>) -> Router {
    // Multipart framing adds overhead on top of the image itself
    let body_limit = state.pipeline_options.max_image_bytes.saturating_add(64 * 1024);

    Router::new()
        .route("/predict", post(predict_handler))
        .route("/health", get(health_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve until Ctrl+C
pub async fn start_server(state: AppState, addr: SocketAddr) -> Result<()> {
    let app = create_app(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("API server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
