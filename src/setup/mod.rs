// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Environment checks for the OCR engine
//!
//! Verifies that tesseract is installed, that every requested language pack
//! is present, and that a recognition round-trip works.

use image::{GrayImage, Luma};
use serde::Serialize;
use tracing::{info, warn};

use crate::vision::{OcrError, TesseractConfig, TesseractEngine, TextRecognizer};

/// Outcome of `doctor`
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct DoctorReport {
    pub engine_binary: String,
    pub engine_version: Option<String>,
    pub installed_languages: Vec<String>,
    pub missing_languages: Vec<String>,
    pub smoke_test_passed: bool,
    /// Install hints for anything that is missing
    pub hints: Vec<String>,
}

impl DoctorReport {
    pub fn is_ready(&self) -> bool {
        self.engine_version.is_some() && self.missing_languages.is_empty() && self.smoke_test_passed
    }
}

/// Package-manager hint for installing the engine on this platform
pub fn install_hint() -> &'static str {
    if cfg!(target_os = "macos") {
        "brew install tesseract tesseract-lang"
    } else if cfg!(target_os = "windows") {
        "install Tesseract from https://github.com/UB-Mannheim/tesseract/wiki and add it to PATH"
    } else {
        "sudo apt-get install -y tesseract-ocr tesseract-ocr-fas tesseract-ocr-eng"
    }
}

/// Language pack hint for a single missing language
pub fn language_hint(lang: &str) -> String {
    if cfg!(target_os = "macos") {
        "brew install tesseract-lang".to_string()
    } else {
        format!("sudo apt-get install -y tesseract-ocr-{}", lang)
    }
}

/// Requested languages that are not installed
pub fn missing_languages(requested: &[String], installed: &[String]) -> Vec<String> {
    requested
        .iter()
        .filter(|lang| !installed.iter().any(|i| i == *lang))
        .cloned()
        .collect()
}

/// Run all checks; never fails, problems are recorded in the report
pub async fn run_doctor(config: &TesseractConfig) -> DoctorReport {
    let engine = TesseractEngine::new(config.clone());
    let mut report = DoctorReport {
        engine_binary: config.binary.clone(),
        ..Default::default()
    };

    match engine.version().await {
        Ok(version) => {
            info!("OCR engine found: {}", version);
            report.engine_version = Some(version);
        }
        Err(e) => {
            warn!("OCR engine check failed: {}", e);
            report.hints.push(install_hint().to_string());
            return report;
        }
    }

    match engine.list_languages().await {
        Ok(installed) => {
            report.missing_languages = missing_languages(&config.language_codes(), &installed);
            report.installed_languages = installed;
        }
        Err(e) => {
            warn!("Could not list OCR languages: {}", e);
            report.missing_languages = config.language_codes();
        }
    }

    for lang in &report.missing_languages {
        report.hints.push(language_hint(lang));
    }
    if !report.missing_languages.is_empty() {
        return report;
    }

    report.smoke_test_passed = match smoke_test(&engine).await {
        Ok(()) => true,
        Err(e) => {
            warn!("OCR smoke test failed: {}", e);
            false
        }
    };

    report
}

/// Recognize a blank page; success only requires the engine to exit cleanly
async fn smoke_test(engine: &TesseractEngine) -> Result<(), OcrError> {
    let page = GrayImage::from_pixel(64, 32, Luma([255]));
    engine.recognize(&page).await.map(|_| ())
}
