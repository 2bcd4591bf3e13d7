// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Extraction pipeline tests
//!
//! Verifies that the recognizer receives a binarized page of the original
//! size, and that results flow through parsing and validation.

use async_trait::async_trait;
use idcard_ocr::{
    idcard::{ExtractionError, IdCardExtractor},
    vision::{ImageError, OcrError, PreprocessOptions, TextRecognizer},
};
use image::{DynamicImage, GrayImage, ImageFormat, Rgb, RgbImage};
use std::io::Cursor;
use std::sync::{Arc, Mutex};

/// Records the page it was given and answers with fixed text
struct RecordingRecognizer {
    text: String,
    seen: Mutex<Option<GrayImage>>,
}

impl RecordingRecognizer {
    fn new(text: &str) -> Arc<Self> {
        Arc::new(Self {
            text: text.to_string(),
            seen: Mutex::new(None),
        })
    }
}

#[async_trait]
impl TextRecognizer for RecordingRecognizer {
    async fn recognize(&self, image: &GrayImage) -> Result<String, OcrError> {
        *self.seen.lock().unwrap() = Some(image.clone());
        Ok(self.text.clone())
    }

    fn name(&self) -> &str {
        "recording"
    }
}

fn encode(img: DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), format).unwrap();
    bytes
}

/// Colored card-like image: light background with dark "text" stripes
fn card_image() -> DynamicImage {
    let img = RgbImage::from_fn(120, 60, |x, y| {
        if (10..110).contains(&x) && y % 12 < 3 {
            Rgb([20, 30, 90])
        } else {
            Rgb([210, 225, 200])
        }
    });
    DynamicImage::ImageRgb8(img)
}

#[tokio::test]
async fn test_recognizer_sees_binarized_page() {
    let recognizer = RecordingRecognizer::new("کد ملی 0499370899");
    let extractor = IdCardExtractor::new(recognizer.clone(), PreprocessOptions::default());

    let result = extractor
        .process_bytes(&encode(card_image(), ImageFormat::Png))
        .await
        .unwrap();
    assert!(result.extracted_info.national_id_valid);

    let seen = recognizer.seen.lock().unwrap().clone().unwrap();
    assert_eq!(seen.dimensions(), (120, 60));
    // Binarized then sharpened: interior pixels stay pure black or white
    for y in 1..59 {
        for x in 1..119 {
            let v = seen.get_pixel(x, y)[0];
            assert!(v == 0 || v == 255, "pixel ({}, {}) = {}", x, y, v);
        }
    }
}

#[tokio::test]
async fn test_jpeg_input() {
    let recognizer = RecordingRecognizer::new("تاریخ تولد 1368/11/3");
    let extractor = IdCardExtractor::new(recognizer, PreprocessOptions::default());

    let result = extractor
        .process_bytes(&encode(card_image(), ImageFormat::Jpeg))
        .await
        .unwrap();
    assert_eq!(
        result.extracted_info.birth_date.as_deref(),
        Some("1368/11/3")
    );
}

#[tokio::test]
async fn test_empty_bytes() {
    let extractor = IdCardExtractor::new(RecordingRecognizer::new("x"), PreprocessOptions::default());
    let err = extractor.process_bytes(&[]).await.unwrap_err();
    assert!(matches!(err, ExtractionError::Image(ImageError::EmptyData)));
}

#[tokio::test]
async fn test_process_path_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("id_card.jpg");
    std::fs::write(&path, encode(card_image(), ImageFormat::Jpeg)).unwrap();

    let extractor = IdCardExtractor::new(
        RecordingRecognizer::new("محل تولد: شیراز\nشناسنامه 998"),
        PreprocessOptions::default(),
    );
    let result = extractor.process_path(&path).await.unwrap();

    assert_eq!(result.extracted_info.birth_place.as_deref(), Some("شیراز"));
    assert_eq!(result.extracted_info.certificate_number.as_deref(), Some("998"));
    assert_eq!(extractor.recognizer_name(), "recording");
}

#[tokio::test]
async fn test_result_json_shape() {
    let extractor = IdCardExtractor::new(
        RecordingRecognizer::new("0013542419"),
        PreprocessOptions::default(),
    );
    let result = extractor
        .process_bytes(&encode(card_image(), ImageFormat::Png))
        .await
        .unwrap();

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["raw_text"], "0013542419");
    assert_eq!(json["extracted_info"]["national_id"], "0013542419");
    assert_eq!(json["extracted_info"]["national_id_valid"], true);
}
