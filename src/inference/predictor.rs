// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Age and gender prediction from a normalized image batch

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use ndarray::Array4;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::onnx_model::{OnnxScalarModel, ScalarModel};
use crate::vision::ImageError;

/// Gender scores at or above this value are labelled female
pub const FEMALE_THRESHOLD: f32 = 0.5;

/// Gender classification result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Label a raw sigmoid score from the gender model
    ///
    /// NaN compares false against the threshold and is labelled female.
    pub fn from_score(score: f32) -> Self {
        if score < FEMALE_THRESHOLD {
            Gender::Male
        } else {
            Gender::Female
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Age and gender estimate for one image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prediction {
    pub age: i64,
    pub gender: Gender,
}

/// Errors raised while turning an upload into a prediction
#[derive(Debug, Error)]
pub enum PredictError {
    #[error(transparent)]
    Image(#[from] ImageError),

    #[error("{model} inference failed: {message}")]
    Inference { model: String, message: String },

    #[error("{model} returned {len} values, expected exactly one")]
    AmbiguousOutput { model: String, len: usize },

    #[error("Prediction task failed: {0}")]
    TaskFailed(String),
}

/// Paths and runtime options for loading both models
#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub age_model_path: PathBuf,
    pub gender_model_path: PathBuf,
    pub intra_threads: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            age_model_path: PathBuf::from("Agemodel1.onnx"),
            gender_model_path: PathBuf::from("Genmodel1.onnx"),
            intra_threads: 4,
        }
    }
}

/// Age regression plus gender classification over the same input
///
/// Built once at startup and shared read-only by every request.
#[derive(Clone)]
pub struct Predictor {
    age_model: Arc<dyn ScalarModel>,
    gender_model: Arc<dyn ScalarModel>,
}

impl std::fmt::Debug for Predictor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Predictor")
            .field("age_model", &self.age_model.name())
            .field("gender_model", &self.gender_model.name())
            .finish()
    }
}

impl Predictor {
    pub fn new(age_model: Arc<dyn ScalarModel>, gender_model: Arc<dyn ScalarModel>) -> Self {
        Self {
            age_model,
            gender_model,
        }
    }

    /// Load both ONNX models from disk
    pub fn load(config: &ModelConfig) -> anyhow::Result<Self> {
        let age_model = OnnxScalarModel::new(&config.age_model_path, config.intra_threads)
            .context("Failed to load age model")?;
        let gender_model = OnnxScalarModel::new(&config.gender_model_path, config.intra_threads)
            .context("Failed to load gender model")?;

        Ok(Self::new(Arc::new(age_model), Arc::new(gender_model)))
    }

    pub fn age_model_name(&self) -> &str {
        self.age_model.name()
    }

    pub fn gender_model_name(&self) -> &str {
        self.gender_model.name()
    }

    /// Run both models on a [1, 200, 200, 3] batch
    ///
    /// The age output is truncated toward zero, not rounded.
    pub fn predict(&self, input: &Array4<f32>) -> Result<Prediction, PredictError> {
        let raw_age = run_single(self.age_model.as_ref(), input)?;
        let raw_gender = run_single(self.gender_model.as_ref(), input)?;

        debug!("Raw model outputs - age: {}, gender: {}", raw_age, raw_gender);

        Ok(Prediction {
            age: truncate_age(raw_age),
            gender: Gender::from_score(raw_gender),
        })
    }
}

/// Truncate a regressed age toward zero (NaN maps to 0)
pub fn truncate_age(raw: f32) -> i64 {
    raw as i64
}

fn run_single(model: &dyn ScalarModel, input: &Array4<f32>) -> Result<f32, PredictError> {
    let output = model.run(input).map_err(|e| PredictError::Inference {
        model: model.name().to_string(),
        message: format!("{:#}", e),
    })?;

    match output.as_slice() {
        [value] => Ok(*value),
        _ => Err(PredictError::AmbiguousOutput {
            model: model.name().to_string(),
            len: output.len(),
        }),
    }
}
