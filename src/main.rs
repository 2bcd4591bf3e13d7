// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use idcard_ocr::{
    api::{start_server, AppState},
    config::AppConfig,
    idcard::IdCardExtractor,
    setup::run_doctor,
    vision::TesseractEngine,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    println!("🚀 Starting ID Card OCR API...");
    println!("📦 VERSION: {}", idcard_ocr::version::VERSION_NUMBER);

    let config = AppConfig::from_env()?;

    // The server still starts without a working engine; requests then fail with 500
    let report = run_doctor(&config.ocr).await;
    if report.is_ready() {
        if let Some(ref version) = report.engine_version {
            println!("✅ OCR engine ready: {} ({})", version, config.ocr.languages);
        }
    } else {
        eprintln!("⚠️  OCR engine not ready, run `idcard-cli doctor` for details");
        for hint in &report.hints {
            eprintln!("   Install with: {}", hint);
        }
    }

    let engine = Arc::new(TesseractEngine::new(config.ocr.clone()));
    let extractor = Arc::new(IdCardExtractor::new(engine, config.preprocess.clone()));
    let state = Arc::new(AppState::new(extractor, config.server.clone()));

    start_server(state).await
}
