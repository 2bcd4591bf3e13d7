// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Vision processing for ID card images
//!
//! This module provides:
//! - Image loading and format detection
//! - Preprocessing (denoise, contrast, binarization, sharpening)
//! - OCR via the tesseract engine

pub mod image_utils;
pub mod ocr;
pub mod preprocessing;

pub use image_utils::{decode_image_bytes, detect_format, load_image_file, ImageError, ImageInfo};
pub use ocr::{OcrError, TesseractConfig, TesseractEngine, TextRecognizer};
pub use preprocessing::{preprocess, PreprocessOptions};
