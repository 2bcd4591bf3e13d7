// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::vision::image_utils::MAX_IMAGE_SIZE;
use crate::vision::{PreprocessOptions, TesseractConfig};

/// Extra room for multipart boundaries and headers on top of the image itself
const MULTIPART_OVERHEAD: usize = 64 * 1024;

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Request body limit for uploads
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            max_upload_bytes: MAX_IMAGE_SIZE + MULTIPART_OVERHEAD,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse::<SocketAddr>()
            .with_context(|| format!("Invalid listen address {}:{}", self.host, self.port))
    }
}

/// Everything the binaries need, assembled from the environment
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub ocr: TesseractConfig,
    pub preprocess: PreprocessOptions,
}

impl AppConfig {
    /// Load `.env` (if present) and read configuration from environment variables
    ///
    /// - `API_HOST` / `API_PORT` / `MAX_UPLOAD_BYTES`
    /// - `TESSERACT_CMD` / `OCR_LANGUAGES` / `OCR_TIMEOUT_SECS`
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ServerConfig::default();
        let server = ServerConfig {
            host: lookup("API_HOST").unwrap_or(defaults.host),
            port: match lookup("API_PORT") {
                Some(v) => v
                    .parse::<u16>()
                    .with_context(|| format!("API_PORT must be a port number, got '{}'", v))?,
                None => defaults.port,
            },
            max_upload_bytes: match lookup("MAX_UPLOAD_BYTES") {
                Some(v) => v
                    .parse::<usize>()
                    .with_context(|| format!("MAX_UPLOAD_BYTES must be a byte count, got '{}'", v))?,
                None => defaults.max_upload_bytes,
            },
        };

        let ocr_defaults = TesseractConfig::default();
        let ocr = TesseractConfig {
            binary: lookup("TESSERACT_CMD").unwrap_or(ocr_defaults.binary),
            languages: lookup("OCR_LANGUAGES").unwrap_or(ocr_defaults.languages),
            timeout: match lookup("OCR_TIMEOUT_SECS") {
                Some(v) => Duration::from_secs(
                    v.parse::<u64>()
                        .with_context(|| format!("OCR_TIMEOUT_SECS must be seconds, got '{}'", v))?,
                ),
                None => ocr_defaults.timeout,
            },
            ..ocr_defaults
        };

        Ok(Self {
            server,
            ocr,
            preprocess: PreprocessOptions::default(),
        })
    }
}
