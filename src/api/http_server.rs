// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::docs::{docs_handler, openapi_handler};
use super::ocr::{health_handler, ocr_from_id_card_handler, root_handler};
use crate::config::ServerConfig;
use crate::idcard::IdCardExtractor;

/// Shared state for all handlers
pub struct AppState {
    pub extractor: Arc<IdCardExtractor>,
    pub config: ServerConfig,
}

impl AppState {
    pub fn new(extractor: Arc<IdCardExtractor>, config: ServerConfig) -> Self {
        Self { extractor, config }
    }
}

pub fn create_app(state: Arc<AppState>) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/ocrfromidcard", post(ocr_from_id_card_handler))
        .route("/openapi.json", get(openapi_handler))
        .route("/docs", get(docs_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Bind the configured address and serve until Ctrl-C
pub async fn start_server(state: Arc<AppState>) -> Result<()> {
    let addr = state.config.socket_addr()?;
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("ID card OCR API listening on http://{}", listener.local_addr()?);
    tracing::info!("API docs available at http://{}/docs", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("ID card OCR API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
