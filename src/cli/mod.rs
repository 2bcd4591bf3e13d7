// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod doctor;
pub mod extract;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::AppConfig;

/// ID card OCR CLI
#[derive(Parser, Debug)]
#[command(name = "idcard-cli")]
#[command(version)]
#[command(about = "Extract information from Iranian national ID card images", long_about = None)]
pub struct Cli {
    /// Tesseract binary (overrides TESSERACT_CMD)
    #[arg(long, global = true)]
    pub tesseract_cmd: Option<String>,

    /// OCR languages joined with '+' (overrides OCR_LANGUAGES)
    #[arg(long, global = true)]
    pub languages: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract fields from an ID card image
    Extract(extract::ExtractArgs),

    /// Check that the OCR engine and language packs are installed
    Doctor(doctor::DoctorArgs),
}

impl Cli {
    /// Environment configuration with command-line overrides applied
    pub fn resolve_config(&self) -> Result<AppConfig> {
        let mut config = AppConfig::from_env()?;
        if let Some(ref cmd) = self.tesseract_cmd {
            config.ocr.binary = cmd.clone();
        }
        if let Some(ref languages) = self.languages {
            config.ocr.languages = languages.clone();
        }
        Ok(config)
    }
}

/// Execute CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    let config = cli.resolve_config()?;
    match cli.command {
        Commands::Extract(args) => extract::extract(args, config).await,
        Commands::Doctor(args) => doctor::doctor(args, config).await,
    }
}
