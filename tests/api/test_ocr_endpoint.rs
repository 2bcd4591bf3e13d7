// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! OCR endpoint tests for POST /ocrfromidcard
//!
//! These tests verify that the upload handler:
//! - Rejects missing, non-image and empty uploads with 400
//! - Returns extracted fields for a decodable image
//! - Reports decoding and OCR failures as 500 with a `detail` message
//!
//! A fixed-text recognizer stands in for tesseract so no engine is needed.

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use idcard_ocr::{
    api::{create_app, AppState},
    config::ServerConfig,
    idcard::IdCardExtractor,
    vision::{OcrError, PreprocessOptions, TextRecognizer},
    ExtractionResult,
};
use image::{DynamicImage, GrayImage, ImageFormat, Luma};
use serde_json::Value;
use std::io::Cursor;
use std::sync::Arc;
use tower::util::ServiceExt;

const BOUNDARY: &str = "idcard-test-boundary";

const CARD_TEXT: &str = "کد ملی 0499370899\n\
    نام: علی\n\
    نام خانوادگی: رضایی\n\
    نام پدر: حسین\n\
    تاریخ تولد 1370/5/20\n\
    محل تولد: تهران\n\
    شماره شناسنامه 1234\n";

struct FixedText(String);

#[async_trait]
impl TextRecognizer for FixedText {
    async fn recognize(&self, _image: &GrayImage) -> Result<String, OcrError> {
        Ok(self.0.clone())
    }

    fn name(&self) -> &str {
        "fixed-text"
    }
}

struct MissingEngine;

#[async_trait]
impl TextRecognizer for MissingEngine {
    async fn recognize(&self, _image: &GrayImage) -> Result<String, OcrError> {
        Err(OcrError::EngineNotFound("tesseract".to_string()))
    }

    fn name(&self) -> &str {
        "missing"
    }
}

/// Helper: Create app whose recognizer always returns `text`
fn app_with_text(text: &str) -> Router {
    app_with_recognizer(Arc::new(FixedText(text.to_string())))
}

fn app_with_recognizer(recognizer: Arc<dyn TextRecognizer>) -> Router {
    let extractor = Arc::new(IdCardExtractor::new(recognizer, PreprocessOptions::default()));
    create_app(Arc::new(AppState::new(extractor, ServerConfig::default())))
}

fn png_card() -> Vec<u8> {
    let img = GrayImage::from_fn(40, 20, |x, _| if x % 4 == 0 { Luma([0]) } else { Luma([255]) });
    let mut bytes = Vec::new();
    DynamicImage::ImageLuma8(img)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

/// Helper: Build a multipart body with a single part
fn multipart_request(field: &str, content_type: Option<&str>, data: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"card.png\"\r\n",
            field
        )
        .as_bytes(),
    );
    if let Some(ct) = content_type {
        body.extend_from_slice(format!("Content-Type: {}\r\n", ct).as_bytes());
    }
    body.extend_from_slice(b"\r\n");
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri("/ocrfromidcard")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[cfg(test)]
mod ocr_endpoint_tests {
    use super::*;

    // =============================================================================
    // Upload Validation Tests
    // =============================================================================

    #[tokio::test]
    async fn test_non_image_content_type_rejected() {
        let app = app_with_text(CARD_TEXT);
        let response = app
            .oneshot(multipart_request("file", Some("application/pdf"), b"%PDF-1.4"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = read_json(response).await;
        assert_eq!(body["detail"], "File must be an image (JPEG, PNG, etc.)");
    }

    #[tokio::test]
    async fn test_missing_content_type_rejected() {
        let app = app_with_text(CARD_TEXT);
        let response = app
            .oneshot(multipart_request("file", None, &png_card()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_empty_file_rejected() {
        let app = app_with_text(CARD_TEXT);
        let response = app
            .oneshot(multipart_request("file", Some("image/png"), b""))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = read_json(response).await;
        assert_eq!(body["detail"], "Uploaded file is empty");
    }

    #[tokio::test]
    async fn test_missing_file_field_rejected() {
        let app = app_with_text(CARD_TEXT);
        let response = app
            .oneshot(multipart_request("picture", Some("image/png"), &png_card()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = read_json(response).await;
        assert_eq!(body["detail"], "File is required");
    }

    #[tokio::test]
    async fn test_non_multipart_body_rejected() {
        let app = app_with_text(CARD_TEXT);
        let request = Request::builder()
            .method(Method::POST)
            .uri("/ocrfromidcard")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"file": "x"}"#))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert!(response.status().is_client_error());
    }

    // =============================================================================
    // Processing Tests
    // =============================================================================

    #[tokio::test]
    async fn test_successful_extraction() {
        let app = app_with_text(CARD_TEXT);
        let response = app
            .oneshot(multipart_request("file", Some("image/png"), &png_card()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        let result: ExtractionResult = serde_json::from_value(body.clone()).unwrap();

        assert!(result.success);
        assert_eq!(result.raw_text, CARD_TEXT);
        let info = result.extracted_info;
        assert_eq!(info.national_id.as_deref(), Some("0499370899"));
        assert!(info.national_id_valid);
        assert_eq!(info.first_name.as_deref(), Some("علی"));
        assert_eq!(info.last_name.as_deref(), Some("رضایی"));
        assert_eq!(info.father_name.as_deref(), Some("حسین"));
        assert_eq!(info.birth_date.as_deref(), Some("1370/5/20"));
        assert_eq!(info.birth_place.as_deref(), Some("تهران"));
        assert_eq!(info.certificate_number.as_deref(), Some("1234"));

        // Absent fields serialize as null, not missing
        assert!(body["extracted_info"].get("first_name").is_some());
    }

    #[tokio::test]
    async fn test_missing_national_id_reported_invalid() {
        let app = app_with_text("نام: مریم\n");
        let response = app
            .oneshot(multipart_request("file", Some("image/jpeg"), &png_card()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["extracted_info"]["national_id"], Value::Null);
        assert_eq!(body["extracted_info"]["national_id_valid"], false);
    }

    #[tokio::test]
    async fn test_undecodable_image_is_server_error() {
        let app = app_with_text(CARD_TEXT);
        let response = app
            .oneshot(multipart_request("file", Some("image/png"), b"not really a png"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = read_json(response).await;
        let detail = body["detail"].as_str().unwrap();
        assert!(detail.starts_with("Internal server error: Error processing ID card:"));
    }

    #[tokio::test]
    async fn test_empty_ocr_output_is_server_error() {
        let app = app_with_text("");
        let response = app
            .oneshot(multipart_request("file", Some("image/png"), &png_card()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = read_json(response).await;
        assert!(body["detail"]
            .as_str()
            .unwrap()
            .contains("No text detected in image"));
    }

    #[tokio::test]
    async fn test_whitespace_ocr_output_returns_null_fields() {
        let app = app_with_text("\u{c}");
        let response = app
            .oneshot(multipart_request("file", Some("image/png"), &png_card()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["raw_text"], "\u{c}");
        assert_eq!(body["extracted_info"]["first_name"], Value::Null);
        assert_eq!(body["extracted_info"]["national_id"], Value::Null);
    }

    #[tokio::test]
    async fn test_engine_unavailable_is_server_error() {
        let app = app_with_recognizer(Arc::new(MissingEngine));
        let response = app
            .oneshot(multipart_request("file", Some("image/png"), &png_card()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = read_json(response).await;
        assert!(body["detail"].as_str().unwrap().contains("tesseract"));
    }

    #[tokio::test]
    async fn test_upload_over_limit_rejected() {
        let extractor = Arc::new(IdCardExtractor::new(
            Arc::new(FixedText(CARD_TEXT.to_string())),
            PreprocessOptions::default(),
        ));
        let config = ServerConfig {
            max_upload_bytes: 1024,
            ..Default::default()
        };
        let app = create_app(Arc::new(AppState::new(extractor, config)));

        let big = vec![0xFFu8; 8 * 1024];
        let response = app
            .oneshot(multipart_request("file", Some("image/jpeg"), &big))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
