// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Age and gender inference
//!
//! Components:
//! - `onnx_model` - ONNX Runtime session wrapper behind the `ScalarModel` trait
//! - `predictor` - Runs both models and interprets their raw outputs
//! - `pipeline` - Full decode → normalize → infer → encode flow for one upload

pub mod onnx_model;
pub mod pipeline;
pub mod predictor;

pub use onnx_model::{OnnxScalarModel, ScalarModel};
pub use pipeline::{process_and_predict, PipelineOptions, PipelineOutput};
pub use predictor::{
    truncate_age, Gender, ModelConfig, PredictError, Prediction, Predictor, FEMALE_THRESHOLD,
};
