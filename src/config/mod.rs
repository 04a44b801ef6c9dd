// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Service configuration from command-line flags and environment variables

use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::inference::{ModelConfig, PipelineOptions};

/// Age/gender prediction service
#[derive(Parser, Debug, Clone)]
#[command(name = "age-gender-node")]
#[command(version)]
#[command(about = "HTTP service estimating age and gender from an uploaded photo", long_about = None)]
pub struct ServiceConfig {
    /// Interface to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 8000)]
    pub port: u16,

    /// Path to the age regression model (ONNX)
    #[arg(long, env = "AGE_MODEL_PATH", default_value = "Agemodel1.onnx")]
    pub age_model: PathBuf,

    /// Path to the gender classification model (ONNX)
    #[arg(long, env = "GENDER_MODEL_PATH", default_value = "Genmodel1.onnx")]
    pub gender_model: PathBuf,

    /// ONNX Runtime intra-op threads per model
    #[arg(long, env = "ORT_INTRA_THREADS", default_value_t = 4)]
    pub intra_threads: usize,

    /// Largest accepted image upload in bytes
    #[arg(long, env = "MAX_UPLOAD_BYTES", default_value_t = 16 * 1024 * 1024)]
    pub max_upload_bytes: usize,

    /// JPEG quality of the returned preview image (1-100)
    #[arg(long, env = "JPEG_QUALITY", default_value_t = 75,
          value_parser = clap::value_parser!(u8).range(1..=100))]
    pub jpeg_quality: u8,
}

impl ServiceConfig {
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn model_config(&self) -> ModelConfig {
        ModelConfig {
            age_model_path: self.age_model.clone(),
            gender_model_path: self.gender_model.clone(),
            intra_threads: self.intra_threads,
        }
    }

    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            max_image_bytes: self.max_upload_bytes,
            jpeg_quality: self.jpeg_quality,
        }
    }
}
