// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! ID card OCR API module
//!
//! Provides POST /ocrfromidcard plus the banner and health endpoints.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::{health_handler, ocr_from_id_card_handler, root_handler};
pub use request::{read_upload, UploadedImage, FILE_FIELD};
pub use response::{HealthResponse, RootResponse};
