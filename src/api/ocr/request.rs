// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Multipart upload parsing and validation

use axum::http::StatusCode;
use axum_extra::extract::multipart::{Multipart, MultipartError};
use bytes::Bytes;

use crate::api::errors::ApiError;

/// Name of the multipart field carrying the card image
pub const FILE_FIELD: &str = "file";

/// An uploaded file as received from the client
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl UploadedImage {
    /// Check the declared content type, then the payload
    pub fn validate(&self) -> Result<(), ApiError> {
        let is_image = self
            .content_type
            .as_deref()
            .map(|ct| ct.starts_with("image/"))
            .unwrap_or(false);

        if !is_image {
            return Err(ApiError::ValidationError {
                field: FILE_FIELD.to_string(),
                message: "File must be an image (JPEG, PNG, etc.)".to_string(),
            });
        }

        if self.data.is_empty() {
            return Err(ApiError::ValidationError {
                field: FILE_FIELD.to_string(),
                message: "Uploaded file is empty".to_string(),
            });
        }

        Ok(())
    }
}

/// Pull the `file` field out of a multipart body, skipping any other fields
pub async fn read_upload(multipart: &mut Multipart) -> Result<UploadedImage, ApiError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await.map_err(multipart_error)?;

        return Ok(UploadedImage {
            file_name,
            content_type,
            data,
        });
    }

    Err(ApiError::ValidationError {
        field: FILE_FIELD.to_string(),
        message: "File is required".to_string(),
    })
}

fn multipart_error(e: MultipartError) -> ApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(e.body_text())
    } else {
        ApiError::InvalidRequest(e.body_text())
    }
}
