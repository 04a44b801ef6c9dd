// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Version information for the age/gender node

/// Semantic version number
pub const VERSION_NUMBER: &str = env!("CARGO_PKG_VERSION");

/// Full version string with feature description
pub const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"), "-onnx-cpu");

/// Supported features in this version
pub const FEATURES: &[&str] = &[
    "predict-multipart",
    "age-regression",
    "gender-classification",
    "latin1-result-image",
    "health",
];

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!("Age/Gender Node {} ({})", VERSION_NUMBER, VERSION)
}
