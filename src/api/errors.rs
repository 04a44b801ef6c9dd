// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use thiserror::Error;

/// Problems with the multipart upload itself, before any image work starts
///
/// The display strings are part of the wire contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("No file part")]
    NoFilePart,

    #[error("No selected file")]
    NoSelectedFile,

    #[error("Failed to read upload: {0}")]
    Read(String),
}
