// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Square crop, resize and normalization for the age/gender models

use std::cmp::Ordering;

use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbImage};
use ndarray::Array4;

use super::image_utils::ImageError;

/// Side length of the square model input
pub const MODEL_INPUT_SIZE: u32 = 200;

/// Side length of the preview image returned to callers
pub const DISPLAY_SIZE: u32 = 300;

const RESAMPLE_FILTER: FilterType = FilterType::Lanczos3;

/// Square region cut out of the source image before resizing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// A preprocessed upload ready for inference
#[derive(Debug, Clone)]
pub struct NormalizedImage {
    /// NHWC tensor of shape [1, 200, 200, 3], values in [0, 1]
    pub tensor: Array4<f32>,
    /// The 200x200 RGB image the tensor was built from
    pub model_input: RgbImage,
}

/// Compute the square crop for an image of the given size
///
/// Landscape images are cropped around the horizontal center. Portrait images
/// keep the top `width` rows, anchored at the top-left corner, so faces framed
/// near the top of a tall photo survive the crop.
pub fn crop_region(width: u32, height: u32) -> CropRegion {
    match width.cmp(&height) {
        Ordering::Equal => CropRegion {
            x: 0,
            y: 0,
            width,
            height,
        },
        Ordering::Greater => CropRegion {
            x: (width - height) / 2,
            y: 0,
            width: height,
            height,
        },
        Ordering::Less => CropRegion {
            x: 0,
            y: 0,
            width,
            height: width,
        },
    }
}

/// Cut the square region returned by [`crop_region`] out of `image`
pub fn square_crop(image: &RgbImage) -> RgbImage {
    let (width, height) = image.dimensions();
    let region = crop_region(width, height);
    if region.width == width && region.height == height {
        return image.clone();
    }
    imageops::crop_imm(image, region.x, region.y, region.width, region.height).to_image()
}

/// Crop, resize and scale an image for the models
///
/// Any decoded pixel layout (grayscale, RGBA, 16-bit) is first converted to
/// 8-bit RGB.
pub fn normalize(image: &DynamicImage) -> Result<NormalizedImage, ImageError> {
    if image.width() == 0 || image.height() == 0 {
        return Err(ImageError::ZeroDimensions);
    }

    let rgb = image.to_rgb8();
    let square = square_crop(&rgb);
    let model_input = imageops::resize(&square, MODEL_INPUT_SIZE, MODEL_INPUT_SIZE, RESAMPLE_FILTER);
    let tensor = to_tensor(&model_input);

    Ok(NormalizedImage {
        tensor,
        model_input,
    })
}

/// Convert an RGB image to a single-item NHWC batch scaled to [0, 1]
pub fn to_tensor(image: &RgbImage) -> Array4<f32> {
    let (width, height) = image.dimensions();
    Array4::from_shape_fn(
        (1, height as usize, width as usize, 3),
        |(_, y, x, c)| image.get_pixel(x as u32, y as u32)[c] as f32 / 255.0,
    )
}

/// Upscale the model input to the preview size
pub fn display_image(model_input: &RgbImage) -> DynamicImage {
    DynamicImage::ImageRgb8(imageops::resize(
        model_input,
        DISPLAY_SIZE,
        DISPLAY_SIZE,
        RESAMPLE_FILTER,
    ))
}
