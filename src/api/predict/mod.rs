// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Predict API endpoint module
//!
//! Provides POST /predict for age and gender estimation from an uploaded image.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::predict_handler;
pub use request::{read_upload, UploadedImage, FILE_FIELD};
pub use response::PredictResponse;
