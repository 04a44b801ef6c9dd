// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! ONNX Runtime wrapper for single-output Keras models
//!
//! The age and gender networks were trained in Keras and exported to ONNX.
//! Both take an NHWC batch of shape [1, 200, 200, 3] and produce one value per
//! batch element, so a single wrapper serves both.

use anyhow::{anyhow, Context, Result};
use ndarray::Array4;
use ort::execution_providers::CPUExecutionProvider;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::Value;
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, info};

/// A model that maps an image batch to a flat list of output values
///
/// Implementations must be safe to share across request handlers.
pub trait ScalarModel: Send + Sync {
    /// Human-readable model name, used in logs and error messages
    fn name(&self) -> &str;

    /// Run the model and return its first output tensor, flattened
    fn run(&self, input: &Array4<f32>) -> Result<Vec<f32>>;
}

/// ONNX-backed [`ScalarModel`]
///
/// Runs on CPU only. ONNX Runtime needs exclusive access to a session while
/// running, so concurrent requests take turns on the mutex.
pub struct OnnxScalarModel {
    session: Mutex<Session>,
    name: String,
    input_name: String,
    output_name: String,
}

impl std::fmt::Debug for OnnxScalarModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxScalarModel")
            .field("name", &self.name)
            .field("input_name", &self.input_name)
            .field("output_name", &self.output_name)
            .finish_non_exhaustive()
    }
}

impl OnnxScalarModel {
    /// Load a model from an `.onnx` file
    ///
    /// # Errors
    /// Returns error if:
    /// - Model file not found
    /// - ONNX Runtime initialization fails
    /// - The graph declares no inputs or outputs
    pub fn new<P: AsRef<Path>>(model_path: P, intra_threads: usize) -> Result<Self> {
        let model_path = model_path.as_ref();

        if !model_path.exists() {
            anyhow::bail!("Model file not found: {}", model_path.display());
        }

        info!("Loading ONNX model from {}", model_path.display());

        let session = Session::builder()
            .context("Failed to create session builder")?
            .with_execution_providers([CPUExecutionProvider::default().build()])
            .context("Failed to set CPU execution provider")?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .context("Failed to set optimization level")?
            .with_intra_threads(intra_threads)
            .context("Failed to set intra threads")?
            .commit_from_file(model_path)
            .with_context(|| format!("Failed to load model from {}", model_path.display()))?;

        let input_name = session
            .inputs
            .first()
            .map(|input| input.name.clone())
            .ok_or_else(|| anyhow!("Model {} declares no inputs", model_path.display()))?;

        let output_name = session
            .outputs
            .first()
            .map(|output| output.name.clone())
            .ok_or_else(|| anyhow!("Model {} declares no outputs", model_path.display()))?;

        if let Some(input) = session.inputs.first() {
            debug!("Model input type: {:?}", input.input_type);
        }

        let name = model_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| model_path.display().to_string());

        info!(
            "✅ Model {} loaded (input: {}, output: {})",
            name, input_name, output_name
        );

        Ok(Self {
            session: Mutex::new(session),
            name,
            input_name,
            output_name,
        })
    }

    pub fn input_name(&self) -> &str {
        &self.input_name
    }

    pub fn output_name(&self) -> &str {
        &self.output_name
    }
}

impl ScalarModel for OnnxScalarModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, input: &Array4<f32>) -> Result<Vec<f32>> {
        let input_value =
            Value::from_array(input.to_owned()).context("Failed to create input tensor")?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| anyhow!("Session for {} is poisoned", self.name))?;

        let outputs = session
            .run(ort::inputs![self.input_name.as_str() => input_value])
            .with_context(|| format!("{} inference failed", self.name))?;

        let output_tensor = outputs[0]
            .try_extract_array::<f32>()
            .context("Failed to extract output tensor")?;

        debug!("{} output shape: {:?}", self.name, output_tensor.shape());

        Ok(output_tensor.iter().copied().collect())
    }
}
