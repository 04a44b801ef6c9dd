// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Multipart upload extraction for POST /predict

use axum::body::Bytes;
use axum_extra::extract::multipart::{Multipart, MultipartRejection};
use tracing::debug;

use crate::api::errors::UploadError;

/// Name of the form field carrying the image
pub const FILE_FIELD: &str = "file";

/// The image part of a /predict form
#[derive(Debug, Clone)]
pub struct UploadedImage {
    /// Client-supplied filename (never empty)
    pub file_name: String,
    /// Declared content type, if any
    pub content_type: Option<String>,
    /// Raw file bytes
    pub bytes: Bytes,
}

/// Pull the first `file` part that carries a filename out of the form
///
/// Parts named `file` without a filename are plain form values, not uploads,
/// and are skipped like any other field. A body that is not
/// `multipart/form-data` has no file part at all.
pub async fn read_upload(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<UploadedImage, UploadError> {
    let mut multipart = match multipart {
        Ok(multipart) => multipart,
        Err(rejection) => {
            debug!("Request is not a multipart form: {}", rejection);
            return Err(UploadError::NoFilePart);
        }
    };

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| UploadError::Read(e.to_string()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = match field.file_name() {
            Some(name) => name.to_string(),
            None => continue,
        };

        if file_name.is_empty() {
            return Err(UploadError::NoSelectedFile);
        }

        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| UploadError::Read(e.to_string()))?;

        debug!(
            "Received upload '{}' ({:?}), {} bytes",
            file_name,
            content_type,
            bytes.len()
        );

        return Ok(UploadedImage {
            file_name,
            content_type,
            bytes,
        });
    }

    Err(UploadError::NoFilePart)
}
