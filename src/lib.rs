// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod config;
pub mod inference;
pub mod utils;
pub mod version;
pub mod vision;

pub use api::{create_app, AppState, PredictResponse};
pub use config::ServiceConfig;
pub use inference::{Gender, ModelConfig, PredictError, Prediction, Predictor, ScalarModel};
