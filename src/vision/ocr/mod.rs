// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Optical character recognition backends
//!
//! Components:
//! - `engine` - The `TextRecognizer` trait and its error type
//! - `tesseract` - Tesseract CLI backend (Persian + English by default)

pub mod engine;
pub mod tesseract;

pub use engine::{OcrError, TextRecognizer};
pub use tesseract::{TesseractConfig, TesseractEngine};
