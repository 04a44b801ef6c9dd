// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Predict endpoint handler

use std::sync::Arc;

use axum::{extract::State, Json};
use axum_extra::extract::multipart::{Multipart, MultipartRejection};
use tracing::{info, warn};

use super::request::read_upload;
use super::response::PredictResponse;
use crate::api::http_server::AppState;
use crate::inference::{process_and_predict, PredictError};

/// POST /predict - Estimate age and gender from an uploaded photo
///
/// # Request
/// `multipart/form-data` with the image in a field named `file`.
///
/// # Response
/// - `age`: Estimated age, truncated to an integer
/// - `gender`: `"male"` or `"female"`
/// - `result_image`: 300x300 JPEG of the cropped input, one character per byte
///
/// # Errors
/// Always HTTP 200. Failures return `{"error": "<message>"}`:
/// - `"No file part"` when the form has no `file` upload
/// - `"No selected file"` when the upload has an empty filename
/// - the failure message for undecodable images or inference errors
pub async fn predict_handler(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Json<PredictResponse> {
    let upload = match read_upload(multipart).await {
        Ok(upload) => upload,
        Err(e) => {
            warn!("Predict upload rejected: {}", e);
            return Json(PredictResponse::error(e.to_string()));
        }
    };

    let predictor = state.predictor.clone();
    let options = state.pipeline_options;
    let bytes = upload.bytes;

    let result = tokio::task::spawn_blocking(move || {
        process_and_predict(&predictor, &bytes, &options)
    })
    .await
    .unwrap_or_else(|e| Err(PredictError::TaskFailed(e.to_string())));

    match result {
        Ok(output) => {
            info!(
                "Prediction for '{}': age={}, gender={}, preview {} bytes",
                upload.file_name,
                output.prediction.age,
                output.prediction.gender,
                output.result_jpeg.len()
            );
            Json(PredictResponse::success(&output))
        }
        Err(e) => {
            warn!("Prediction for '{}' failed: {}", upload.file_name, e);
            Json(PredictResponse::error(e.to_string()))
        }
    }
}
