// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image loading and encoding helpers for uploaded photos

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat};
use thiserror::Error;

/// Default maximum upload size (16MB)
pub const DEFAULT_MAX_IMAGE_SIZE: usize = 16 * 1024 * 1024;

/// Default JPEG quality for re-encoded result images
pub const DEFAULT_JPEG_QUALITY: u8 = 75;

/// Custom error types for image processing
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Image data is too large: {0} bytes (max: {1} bytes)")]
    TooLarge(usize, usize),

    #[error("Unsupported image format")]
    UnsupportedFormat,

    #[error("Failed to decode image: {0}")]
    DecodeFailed(String),

    #[error("Image data is empty")]
    EmptyData,

    #[error("Image has zero width or height")]
    ZeroDimensions,

    #[error("Failed to encode image: {0}")]
    EncodeFailed(String),
}

/// Image information extracted during loading
#[derive(Debug, Clone)]
pub struct ImageInfo {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Detected format
    pub format: ImageFormat,
    /// Size in bytes
    pub size_bytes: usize,
}

/// Decode raw image bytes from a multipart upload
///
/// The format is sniffed from the content, never from the filename.
///
/// # Returns
/// * `Ok((DynamicImage, ImageInfo))` - The decoded image and metadata
/// * `Err(ImageError)` - If the data is empty, too large, or not an image
pub fn decode_image_bytes(
    bytes: &[u8],
    max_size: usize,
) -> Result<(DynamicImage, ImageInfo), ImageError> {
    if bytes.is_empty() {
        return Err(ImageError::EmptyData);
    }

    if bytes.len() > max_size {
        return Err(ImageError::TooLarge(bytes.len(), max_size));
    }

    let format = detect_format(bytes)?;

    let img = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| ImageError::DecodeFailed(e.to_string()))?;

    let info = ImageInfo {
        width: img.width(),
        height: img.height(),
        format,
        size_bytes: bytes.len(),
    };

    Ok((img, info))
}

/// Detect image format from magic bytes
pub fn detect_format(bytes: &[u8]) -> Result<ImageFormat, ImageError> {
    image::guess_format(bytes).map_err(|_| ImageError::UnsupportedFormat)
}

/// Encode an image as baseline JPEG
///
/// Alpha is dropped; JPEG carries RGB only.
pub fn encode_jpeg(image: &DynamicImage, quality: u8) -> Result<Vec<u8>, ImageError> {
    let rgb = DynamicImage::ImageRgb8(image.to_rgb8());
    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100));
    rgb.write_with_encoder(encoder)
        .map_err(|e| ImageError::EncodeFailed(e.to_string()))?;
    Ok(buffer.into_inner())
}
