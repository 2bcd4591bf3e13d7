// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Tesseract CLI backend
//!
//! The preprocessed page is streamed to `tesseract stdin stdout` as PNG so
//! no temporary files are needed.

use std::io::Cursor;
use std::process::Stdio;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use image::{GrayImage, ImageFormat};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

use super::engine::{OcrError, TextRecognizer};

fn default_binary() -> String {
    "tesseract".to_string()
}

fn default_languages() -> String {
    "fas+eng".to_string()
}

/// Configuration for the tesseract subprocess
#[derive(Debug, Clone, PartialEq)]
pub struct TesseractConfig {
    /// Binary name or absolute path
    pub binary: String,
    /// Language packs joined with `+` (e.g. "fas+eng")
    pub languages: String,
    /// OCR engine mode (3 = default, LSTM when available)
    pub oem: u8,
    /// Page segmentation mode (6 = single uniform block of text)
    pub psm: u8,
    /// Per-invocation timeout
    pub timeout: Duration,
}

impl Default for TesseractConfig {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            languages: default_languages(),
            oem: 3,
            psm: 6,
            timeout: Duration::from_secs(60),
        }
    }
}

impl TesseractConfig {
    /// Individual language codes, e.g. ["fas", "eng"]
    pub fn language_codes(&self) -> Vec<String> {
        self.languages
            .split('+')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Arguments for recognizing an image piped through stdin
    pub fn recognize_args(&self) -> Vec<String> {
        vec![
            "stdin".to_string(),
            "stdout".to_string(),
            "--oem".to_string(),
            self.oem.to_string(),
            "--psm".to_string(),
            self.psm.to_string(),
            "-l".to_string(),
            self.languages.clone(),
        ]
    }
}

pub struct TesseractEngine {
    config: TesseractConfig,
}

impl TesseractEngine {
    pub fn new(config: TesseractConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TesseractConfig {
        &self.config
    }

    /// First line of `tesseract --version`
    pub async fn version(&self) -> Result<String, OcrError> {
        let output = self.run_simple(&["--version"]).await?;
        // Older releases print the version banner on stderr
        let text = if output.0.trim().is_empty() {
            output.1
        } else {
            output.0
        };
        Ok(text.lines().next().unwrap_or_default().trim().to_string())
    }

    /// Installed language packs from `tesseract --list-langs`
    pub async fn list_languages(&self) -> Result<Vec<String>, OcrError> {
        let (stdout, _) = self.run_simple(&["--list-langs"]).await?;
        Ok(parse_language_list(&stdout))
    }

    async fn run_simple(&self, args: &[&str]) -> Result<(String, String), OcrError> {
        let output = Command::new(&self.config.binary)
            .args(args)
            .output()
            .await
            .map_err(|e| self.spawn_error(e))?;

        if !output.status.success() {
            return Err(OcrError::EngineFailed(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        Ok((
            String::from_utf8_lossy(&output.stdout).into_owned(),
            String::from_utf8_lossy(&output.stderr).into_owned(),
        ))
    }

    fn spawn_error(&self, e: std::io::Error) -> OcrError {
        if e.kind() == std::io::ErrorKind::NotFound {
            OcrError::EngineNotFound(self.config.binary.clone())
        } else {
            OcrError::Io(e)
        }
    }
}

#[async_trait]
impl TextRecognizer for TesseractEngine {
    async fn recognize(&self, image: &GrayImage) -> Result<String, OcrError> {
        let start = Instant::now();

        let mut png = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .map_err(|e| OcrError::Encode(e.to_string()))?;

        let mut child = Command::new(&self.config.binary)
            .args(self.config.recognize_args())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| self.spawn_error(e))?;

        // Feed stdin concurrently so a full stdout pipe cannot stall the child
        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| OcrError::EngineFailed("stdin not captured".to_string()))?;
        let writer = tokio::spawn(async move {
            let result = stdin.write_all(&png).await;
            drop(stdin);
            result
        });

        let secs = self.config.timeout.as_secs();
        let output = tokio::time::timeout(self.config.timeout, child.wait_with_output())
            .await
            .map_err(|_| OcrError::Timeout(secs))??;

        match writer.await {
            Ok(Err(e)) => warn!("Failed writing image to tesseract stdin: {}", e),
            Err(e) => warn!("Tesseract stdin writer panicked: {}", e),
            Ok(Ok(())) => {}
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OcrError::EngineFailed(stderr.trim().to_string()));
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        debug!(
            "tesseract recognized {} chars in {}ms",
            text.chars().count(),
            start.elapsed().as_millis()
        );

        Ok(text)
    }

    fn name(&self) -> &str {
        "tesseract"
    }
}

/// Parse `--list-langs` output, skipping the "List of available languages" header
pub fn parse_language_list(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("List of available languages"))
        .map(str::to_string)
        .collect()
}
