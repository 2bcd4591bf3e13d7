// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{anyhow, Result};
use clap::Args;

use crate::config::AppConfig;
use crate::setup::{run_doctor, DoctorReport};

/// Arguments for the doctor command
#[derive(Args, Debug)]
pub struct DoctorArgs {
    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn doctor(args: DoctorArgs, config: AppConfig) -> Result<()> {
    println!("🔍 Checking OCR environment...");
    let report = run_doctor(&config.ocr).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_report(&report));
    }

    if report.is_ready() {
        println!("✅ Environment ready");
        Ok(())
    } else {
        Err(anyhow!("OCR environment is not ready"))
    }
}

pub fn render_report(report: &DoctorReport) -> String {
    let mut out = String::new();

    match &report.engine_version {
        Some(version) => out.push_str(&format!("✅ OCR engine: {}\n", version)),
        None => out.push_str(&format!("❌ OCR engine '{}' not found\n", report.engine_binary)),
    }

    if !report.installed_languages.is_empty() {
        out.push_str(&format!(
            "   Installed languages: {}\n",
            report.installed_languages.join(", ")
        ));
    }

    for lang in &report.missing_languages {
        out.push_str(&format!("❌ Missing language pack: {}\n", lang));
    }

    if report.engine_version.is_some() && report.missing_languages.is_empty() {
        if report.smoke_test_passed {
            out.push_str("✅ Smoke test passed\n");
        } else {
            out.push_str("❌ Smoke test failed\n");
        }
    }

    for hint in &report.hints {
        out.push_str(&format!("   Install with: {}\n", hint));
    }

    out
}
