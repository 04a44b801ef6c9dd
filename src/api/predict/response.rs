// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Response document for POST /predict

use serde::{Deserialize, Serialize};

use crate::inference::PipelineOutput;
use crate::utils::latin1;

/// Body of every /predict response
///
/// Both variants are sent with HTTP 200; callers tell them apart by the
/// presence of the `error` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PredictResponse {
    Success {
        age: i64,
        gender: String,
        /// JPEG bytes mapped one byte per character (not base64)
        result_image: String,
    },
    Error {
        error: String,
    },
}

impl PredictResponse {
    pub fn success(output: &PipelineOutput) -> Self {
        PredictResponse::Success {
            age: output.prediction.age,
            gender: output.prediction.gender.as_str().to_string(),
            result_image: latin1::encode(&output.result_jpeg),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        PredictResponse::Error {
            error: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, PredictResponse::Error { .. })
    }

    /// Recover the JPEG bytes of a success response
    pub fn result_image_bytes(&self) -> Option<Vec<u8>> {
        match self {
            PredictResponse::Success { result_image, .. } => latin1::decode(result_image),
            PredictResponse::Error { .. } => None,
        }
    }
}
