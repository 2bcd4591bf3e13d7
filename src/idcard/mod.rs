// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Iranian national ID card extraction
//!
//! Components:
//! - `parser` - Field patterns applied to OCR output
//! - `validation` - National ID check digit
//! - `extractor` - Full image-to-fields pipeline

pub mod extractor;
pub mod parser;
pub mod validation;

pub use extractor::{ExtractionError, ExtractionResult, IdCardExtractor};
pub use parser::{IdCardInfo, IdCardParser};
pub use validation::{normalize_digits, validate_national_id};
