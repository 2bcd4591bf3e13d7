// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod cli;
pub mod config;
pub mod idcard;
pub mod setup;
pub mod version;
pub mod vision;

pub use idcard::{ExtractionResult, IdCardExtractor, IdCardInfo};
pub use vision::{TesseractConfig, TesseractEngine, TextRecognizer};
