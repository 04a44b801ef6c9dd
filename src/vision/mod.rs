// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Vision processing for uploaded photos
//!
//! This module provides:
//! - Decoding of uploaded image bytes and JPEG re-encoding
//! - Square cropping, resizing and normalization for the age/gender models
//!
//! All work is CPU-only and request-scoped.

pub mod image_utils;
pub mod preprocessing;

pub use image_utils::{decode_image_bytes, detect_format, encode_jpeg, ImageError, ImageInfo};
pub use preprocessing::{
    crop_region, display_image, normalize, square_crop, to_tensor, CropRegion, NormalizedImage,
    DISPLAY_SIZE, MODEL_INPUT_SIZE,
};
