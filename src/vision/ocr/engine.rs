// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Text recognition seam shared by the extractor and its tests

use async_trait::async_trait;
use image::GrayImage;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("OCR engine '{0}' not found; install tesseract (see `idcard-cli doctor`)")]
    EngineNotFound(String),

    #[error("OCR engine failed: {0}")]
    EngineFailed(String),

    #[error("OCR engine timed out after {0} seconds")]
    Timeout(u64),

    #[error("Could not encode image for OCR: {0}")]
    Encode(String),

    #[error("OCR I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Anything that turns a preprocessed page into text
#[async_trait]
pub trait TextRecognizer: Send + Sync {
    /// Recognize all text on the image, lines separated by `\n`
    async fn recognize(&self, image: &GrayImage) -> Result<String, OcrError>;

    /// Engine name used in logs
    fn name(&self) -> &str;
}
