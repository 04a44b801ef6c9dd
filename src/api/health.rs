// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use std::sync::Arc;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::api::http_server::AppState;
use crate::version;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadedModels {
    pub age: String,
    pub gender: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub models: LoadedModels,
}

/// GET /health - Liveness check listing the loaded models
pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: version::VERSION_NUMBER.to_string(),
        models: LoadedModels {
            age: state.predictor.age_model_name().to_string(),
            gender: state.predictor.gender_model_name().to_string(),
        },
    })
}
