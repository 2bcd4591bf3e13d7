// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Version information for the ID card OCR service

/// Semantic version number
pub const VERSION_NUMBER: &str = env!("CARGO_PKG_VERSION");

/// Service name reported by the API
pub const API_TITLE: &str = "ID Card OCR API";

/// One-line description used in API docs
pub const API_DESCRIPTION: &str = "API for extracting information from Iranian ID cards";
