// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! ID card OCR endpoint handlers

use std::sync::Arc;

use axum::{extract::State, Json};
use axum_extra::extract::Multipart;
use tracing::{debug, info, warn};

use super::request::read_upload;
use super::response::{HealthResponse, RootResponse};
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::idcard::ExtractionResult;

/// POST /ocrfromidcard - Extract fields from an uploaded ID card image
///
/// # Request
/// `multipart/form-data` with a `file` field holding a JPEG/PNG/... image.
///
/// # Response
/// - `success`: always true on 200
/// - `raw_text`: OCR output
/// - `extracted_info`: parsed card fields plus `national_id_valid`
///
/// # Errors
/// - 400 Bad Request: no file, non-image content type, or empty file
/// - 413 Payload Too Large: upload over the configured limit
/// - 500 Internal Server Error: decoding, OCR or parsing failed
pub async fn ocr_from_id_card_handler(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<ExtractionResult>, ApiError> {
    let upload = read_upload(&mut multipart).await.map_err(|e| {
        warn!("ID card upload rejected: {}", e);
        e
    })?;

    debug!(
        "ID card upload received: {:?} ({:?}, {} bytes)",
        upload.file_name,
        upload.content_type,
        upload.data.len()
    );

    if let Err(e) = upload.validate() {
        warn!("ID card upload validation failed: {}", e);
        return Err(e);
    }

    let result = state
        .extractor
        .process_bytes(&upload.data)
        .await
        .map_err(|e| {
            warn!("ID card processing failed: {}", e);
            ApiError::InternalError(format!("Error processing ID card: {}", e))
        })?;

    info!(
        "ID card processed: national id {}",
        if result.extracted_info.national_id_valid {
            "valid"
        } else {
            "missing or invalid"
        }
    );

    Ok(Json(result))
}

/// GET / - Service banner
pub async fn root_handler() -> Json<RootResponse> {
    Json(RootResponse::default())
}

/// GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
