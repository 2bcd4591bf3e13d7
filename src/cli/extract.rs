// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{anyhow, Context, Result};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use crate::config::AppConfig;
use crate::idcard::{ExtractionResult, IdCardExtractor};
use crate::vision::TesseractEngine;

const WIDE_RULE: usize = 60;
const NARROW_RULE: usize = 40;
const RAW_RULE: usize = 50;

/// Arguments for the extract command
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Path to the ID card image (JPEG, PNG, ...)
    pub image: PathBuf,

    /// Print the full result as JSON instead of labeled fields
    #[arg(long)]
    pub json: bool,

    /// Do not print the raw OCR text
    #[arg(long)]
    pub no_raw: bool,

    /// Also write a plain-text report (fields plus raw text) to this file
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

pub async fn extract(args: ExtractArgs, config: AppConfig) -> Result<()> {
    if !args.image.exists() {
        return Err(anyhow!(
            "فایل تصویر در مسیر {} یافت نشد",
            args.image.display()
        ));
    }

    let engine = Arc::new(TesseractEngine::new(config.ocr.clone()));
    let extractor = IdCardExtractor::new(engine, config.preprocess.clone());

    let result = extractor
        .process_path(&args.image)
        .await
        .with_context(|| "خطا در پردازش تصویر")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        if !args.no_raw {
            println!("{}", render_raw_text(&result));
        }
        println!("{}", render_summary(&result));
    }

    if let Some(path) = args.output {
        std::fs::write(&path, render_report(&result))
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        info!("Report written to {}", path.display());
        println!("\nنتایج در فایل '{}' ذخیره شد.", path.display());
    }

    Ok(())
}

fn field_lines(result: &ExtractionResult) -> Vec<String> {
    let info = &result.extracted_info;
    let mut lines: Vec<String> = info
        .labeled_fields()
        .into_iter()
        .filter_map(|(label, value)| value.map(|v| format!("{}: {}", label, v)))
        .collect();

    if info.national_id.is_some() {
        let validity = if info.national_id_valid {
            "معتبر"
        } else {
            "نامعتبر"
        };
        lines.push(format!("وضعیت کد ملی: {}", validity));
    }

    lines
}

pub fn render_raw_text(result: &ExtractionResult) -> String {
    let rule = "-".repeat(RAW_RULE);
    format!("متن استخراج شده:\n{}\n{}\n{}", rule, result.raw_text.trim_end(), rule)
}

/// Labeled fields printed to the terminal
pub fn render_summary(result: &ExtractionResult) -> String {
    let rule = "=".repeat(WIDE_RULE);
    let mut out = format!("\n{}\nنتایج استخراج اطلاعات کارت ملی\n{}\n", rule, rule);
    for line in field_lines(result) {
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Report file contents: fields, national ID status, then the raw text
pub fn render_report(result: &ExtractionResult) -> String {
    let mut out = format!("نتایج استخراج اطلاعات کارت ملی\n{}\n\n", "=".repeat(NARROW_RULE));
    for line in field_lines(result) {
        out.push_str(&line);
        out.push('\n');
    }
    out.push_str(&format!("\nمتن خام استخراج شده:\n{}", result.raw_text));
    out
}
