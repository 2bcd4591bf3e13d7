// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image preprocessing for ID card OCR
//!
//! The card photo is turned into a clean black-and-white page before it is
//! handed to the OCR engine:
//! 1. Grayscale with BT.601 weights
//! 2. Gaussian blur (5x5) to remove sensor noise
//! 3. Contrast/brightness boost: `|alpha * p + beta|`, saturated to 0..=255
//! 4. Otsu binarization
//! 5. Morphological close + open
//! 6. Sharpening blend against a smoothed copy

use image::{DynamicImage, GrayImage, ImageBuffer, Luma};
use imageproc::distance_transform::Norm;
use imageproc::{contrast, filter, morphology};

/// Gaussian kernel size used for denoising
pub const BLUR_KERNEL_SIZE: usize = 5;

/// Fixed 5-tap binomial kernel `[1, 4, 6, 4, 1] / 16`, used when no sigma is set
pub const BINOMIAL_KERNEL: [f32; BLUR_KERNEL_SIZE] = [0.0625, 0.25, 0.375, 0.25, 0.0625];

/// BT.601 luma weights in 14-bit fixed point (R, G, B)
const LUMA_WEIGHTS: [u32; 3] = [4899, 9617, 1868];
const LUMA_SHIFT: u32 = 14;

pub const DEFAULT_CONTRAST_ALPHA: f32 = 1.5;
pub const DEFAULT_BRIGHTNESS_BETA: f32 = 30.0;
pub const DEFAULT_SHARPNESS: f32 = 2.0;

/// 3x3 smoothing kernel, normalized by its sum (13)
const SMOOTH_KERNEL: [f32; 9] = [1.0, 1.0, 1.0, 1.0, 5.0, 1.0, 1.0, 1.0, 1.0];
const SMOOTH_KERNEL_SUM: f32 = 13.0;

/// Tunables for the preprocessing pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct PreprocessOptions {
    /// Gaussian blur sigma; `None` uses the binomial kernel
    pub blur_sigma: Option<f32>,
    /// Contrast multiplier
    pub alpha: f32,
    /// Brightness offset
    pub beta: f32,
    /// Morphology radius; 0 keeps a 1x1 structuring element
    pub morphology_radius: u8,
    /// Sharpness factor (1.0 = unchanged)
    pub sharpness: f32,
}

impl Default for PreprocessOptions {
    fn default() -> Self {
        Self {
            blur_sigma: None,
            alpha: DEFAULT_CONTRAST_ALPHA,
            beta: DEFAULT_BRIGHTNESS_BETA,
            morphology_radius: 0,
            sharpness: DEFAULT_SHARPNESS,
        }
    }
}

/// Run the full preprocessing pipeline
pub fn preprocess(image: &DynamicImage, options: &PreprocessOptions) -> GrayImage {
    let gray = to_grayscale(image);
    let denoised = denoise(&gray, options.blur_sigma);
    let enhanced = adjust_contrast(&denoised, options.alpha, options.beta);
    let binary = binarize(&enhanced);
    let cleaned = clean_morphology(&binary, options.morphology_radius);
    sharpen(&cleaned, options.sharpness)
}

/// `0.299 R + 0.587 G + 0.114 B`, rounded; alpha is dropped
pub fn to_grayscale(image: &DynamicImage) -> GrayImage {
    let rgb = image.to_rgb8();
    let (width, height) = rgb.dimensions();
    ImageBuffer::from_fn(width, height, |x, y| {
        let [r, g, b] = rgb.get_pixel(x, y).0;
        let weighted = r as u32 * LUMA_WEIGHTS[0]
            + g as u32 * LUMA_WEIGHTS[1]
            + b as u32 * LUMA_WEIGHTS[2];
        Luma([((weighted + (1 << (LUMA_SHIFT - 1))) >> LUMA_SHIFT) as u8])
    })
}

/// Normalized 1D Gaussian kernel of `BLUR_KERNEL_SIZE` taps
pub fn gaussian_kernel(sigma: f32) -> [f32; BLUR_KERNEL_SIZE] {
    let center = (BLUR_KERNEL_SIZE / 2) as f32;
    let mut kernel = [0.0f32; BLUR_KERNEL_SIZE];
    for (i, weight) in kernel.iter_mut().enumerate() {
        let d = i as f32 - center;
        *weight = (-(d * d) / (2.0 * sigma * sigma)).exp();
    }
    let sum: f32 = kernel.iter().sum();
    for weight in kernel.iter_mut() {
        *weight /= sum;
    }
    kernel
}

/// Taps for `denoise`: a Gaussian for a positive sigma, otherwise the binomial kernel
pub fn blur_kernel(sigma: Option<f32>) -> [f32; BLUR_KERNEL_SIZE] {
    match sigma {
        Some(sigma) if sigma > 0.0 => gaussian_kernel(sigma),
        _ => BINOMIAL_KERNEL,
    }
}

/// 5x5 separable Gaussian blur
pub fn denoise(image: &GrayImage, sigma: Option<f32>) -> GrayImage {
    let kernel = blur_kernel(sigma);
    filter::separable_filter_equal(image, &kernel[..])
}

/// `saturate(|alpha * p + beta|)` for every pixel, halves rounded to even
pub fn adjust_contrast(image: &GrayImage, alpha: f32, beta: f32) -> GrayImage {
    let mut out = image.clone();
    for pixel in out.pixels_mut() {
        let value = (alpha * pixel[0] as f32 + beta).abs().round_ties_even();
        pixel[0] = value.clamp(0.0, 255.0) as u8;
    }
    out
}

/// Otsu threshold: pixels strictly above the level become white
pub fn binarize(image: &GrayImage) -> GrayImage {
    let level = contrast::otsu_level(image);
    let mut out = image.clone();
    for pixel in out.pixels_mut() {
        pixel[0] = if pixel[0] > level { 255 } else { 0 };
    }
    out
}

/// Close then open with a square structuring element of the given radius
pub fn clean_morphology(image: &GrayImage, radius: u8) -> GrayImage {
    if radius == 0 {
        return image.clone();
    }
    let closed = morphology::close(image, Norm::LInf, radius);
    morphology::open(&closed, Norm::LInf, radius)
}

/// Blend the image away from a smoothed copy: `smooth + factor * (orig - smooth)`
///
/// Border pixels are kept as they are in the source.
pub fn sharpen(image: &GrayImage, factor: f32) -> GrayImage {
    let (width, height) = image.dimensions();
    let mut out = image.clone();
    if width < 3 || height < 3 {
        return out;
    }

    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let mut acc = 0.0f32;
            for ky in 0..3u32 {
                for kx in 0..3u32 {
                    let p = image.get_pixel(x + kx - 1, y + ky - 1)[0] as f32;
                    acc += p * SMOOTH_KERNEL[(ky * 3 + kx) as usize];
                }
            }
            let smooth = (acc / SMOOTH_KERNEL_SUM).round();
            let orig = image.get_pixel(x, y)[0] as f32;
            let value = (smooth + factor * (orig - smooth)).round();
            out.put_pixel(x, y, Luma([value.clamp(0.0, 255.0) as u8]));
        }
    }

    out
}
