// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Decode → normalize → infer → encode for a single upload

use tracing::debug;

use super::predictor::{PredictError, Prediction, Predictor};
use crate::vision::image_utils::{DEFAULT_JPEG_QUALITY, DEFAULT_MAX_IMAGE_SIZE};
use crate::vision::{decode_image_bytes, display_image, encode_jpeg, normalize};

/// Per-request limits and encoding options
#[derive(Debug, Clone, Copy)]
pub struct PipelineOptions {
    pub max_image_bytes: usize,
    pub jpeg_quality: u8,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            max_image_bytes: DEFAULT_MAX_IMAGE_SIZE,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

/// Prediction plus the JPEG preview sent back to the caller
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub prediction: Prediction,
    /// 300x300 JPEG of the cropped model input
    pub result_jpeg: Vec<u8>,
}

/// Run the full pipeline on raw upload bytes
///
/// CPU-bound; async callers should run this on the blocking pool.
pub fn process_and_predict(
    predictor: &Predictor,
    bytes: &[u8],
    options: &PipelineOptions,
) -> Result<PipelineOutput, PredictError> {
    let (image, info) = decode_image_bytes(bytes, options.max_image_bytes)?;
    debug!(
        "Decoded image: {}x{} {:?}, {} bytes",
        info.width, info.height, info.format, info.size_bytes
    );

    let normalized = normalize(&image)?;
    let prediction = predictor.predict(&normalized.tensor)?;

    let preview = display_image(&normalized.model_input);
    let result_jpeg = encode_jpeg(&preview, options.jpeg_quality)?;

    Ok(PipelineOutput {
        prediction,
        result_jpeg,
    })
}
