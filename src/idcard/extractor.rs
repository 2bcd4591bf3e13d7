// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! End-to-end ID card extraction: decode, preprocess, recognize, parse, validate

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::parser::{IdCardInfo, IdCardParser};
use super::validation::validate_national_id;
use crate::vision::{decode_image_bytes, preprocess, ImageError, OcrError, PreprocessOptions, TextRecognizer};

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Image file not found: {0}")]
    FileNotFound(String),

    #[error(transparent)]
    Image(#[from] ImageError),

    #[error(transparent)]
    Ocr(#[from] OcrError),

    #[error("No text detected in image")]
    NoTextDetected,

    #[error("Preprocessing task failed: {0}")]
    Task(String),
}

/// Result of processing one card image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub success: bool,
    /// Unmodified OCR output
    pub raw_text: String,
    pub extracted_info: IdCardInfo,
}

pub struct IdCardExtractor {
    recognizer: Arc<dyn TextRecognizer>,
    parser: IdCardParser,
    options: PreprocessOptions,
}

impl IdCardExtractor {
    pub fn new(recognizer: Arc<dyn TextRecognizer>, options: PreprocessOptions) -> Self {
        Self {
            recognizer,
            parser: IdCardParser::new(),
            options,
        }
    }

    pub fn recognizer_name(&self) -> &str {
        self.recognizer.name()
    }

    /// Process an image file on disk
    pub async fn process_path(&self, path: &Path) -> Result<ExtractionResult, ExtractionError> {
        if !path.exists() {
            return Err(ExtractionError::FileNotFound(path.display().to_string()));
        }

        info!("Processing image: {}", path.display());
        let bytes = tokio::fs::read(path).await.map_err(ImageError::from)?;
        self.process_bytes(&bytes).await
    }

    /// Process an encoded image (PNG, JPEG, ...)
    pub async fn process_bytes(&self, bytes: &[u8]) -> Result<ExtractionResult, ExtractionError> {
        let start = Instant::now();

        // Decoding and pixel work are CPU-bound
        let owned = bytes.to_vec();
        let options = self.options.clone();
        let processed = tokio::task::spawn_blocking(move || {
            let (image, image_info) = decode_image_bytes(&owned)?;
            debug!(
                "Decoded image: {}x{}, {} bytes",
                image_info.width, image_info.height, image_info.size_bytes
            );
            Ok::<_, ImageError>(preprocess(&image, &options))
        })
        .await
        .map_err(|e| ExtractionError::Task(e.to_string()))??;

        let raw_text = self.recognizer.recognize(&processed).await?;
        if raw_text.is_empty() {
            warn!("{} returned no text", self.recognizer.name());
            return Err(ExtractionError::NoTextDetected);
        }

        let mut extracted_info = self.parser.parse(&raw_text);
        extracted_info.national_id_valid = extracted_info
            .national_id
            .as_deref()
            .map(validate_national_id)
            .unwrap_or(false);

        info!(
            "ID card extraction complete: {} chars, national id {}, {}ms",
            raw_text.chars().count(),
            match (&extracted_info.national_id, extracted_info.national_id_valid) {
                (None, _) => "missing",
                (Some(_), true) => "valid",
                (Some(_), false) => "invalid",
            },
            start.elapsed().as_millis()
        );

        Ok(ExtractionResult {
            success: true,
            raw_text,
            extracted_info,
        })
    }
}
