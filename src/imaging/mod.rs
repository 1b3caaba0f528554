// ABOUTME: Upload format normalization before publishing to blob storage
// ABOUTME: HEIC uploads are decoded and re-encoded as JPEG, everything else passes through
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Meal Recommender Contributors

//! # Image Normalization
//!
//! Browsers and the vision service cannot reliably read HEIC, so HEIC-family
//! uploads are decoded to a bitmap and re-encoded as JPEG. The published
//! filename gets a `.jpg` extension to match. Other formats are stored as
//! received.

/// HEIC decoder seam and implementations
pub mod heic;

pub use heic::{default_decoder, HeicDecoder, UnsupportedHeicDecoder};

#[cfg(feature = "heic")]
pub use heic::LibheifDecoder;

use crate::constants::uploads;
use crate::errors::ImageError;
use crate::models::{NormalizedImage, UploadedImage};
use crate::utils::filename::with_extension;
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;
use std::sync::Arc;
use tracing::debug;

/// Turns an upload into bytes ready to be stored
#[derive(Clone)]
pub struct ImageNormalizer {
    heic: Arc<dyn HeicDecoder>,
}

impl Default for ImageNormalizer {
    fn default() -> Self {
        Self::new(default_decoder())
    }
}

impl ImageNormalizer {
    /// Create a normalizer using `heic` for HEIC-family uploads
    #[must_use]
    pub fn new(heic: Arc<dyn HeicDecoder>) -> Self {
        Self { heic }
    }

    /// Normalize an upload
    ///
    /// # Errors
    ///
    /// Returns `ImageError` if a HEIC upload cannot be decoded or re-encoded
    pub async fn normalize(&self, upload: UploadedImage) -> Result<NormalizedImage, ImageError> {
        let extension = upload.extension().unwrap_or_default();

        if !is_heic_extension(&extension) {
            let content_type = upload
                .content_type
                .filter(|ct| !ct.trim().is_empty())
                .unwrap_or_else(|| content_type_for_extension(&extension).to_owned());
            return Ok(NormalizedImage {
                data: upload.data,
                content_type,
                filename: upload.filename,
            });
        }

        let decoder = Arc::clone(&self.heic);
        let input_len = upload.data.len();
        let data = upload.data;
        let jpeg = tokio::task::spawn_blocking(move || {
            let bitmap = decoder.decode(&data)?;
            encode_jpeg(&bitmap)
        })
        .await
        .map_err(|e| ImageError::Task(e.to_string()))??;

        debug!(
            decoder = self.heic.name(),
            input.bytes = input_len,
            output.bytes = jpeg.len(),
            "Converted HEIC upload to JPEG"
        );

        Ok(NormalizedImage {
            data: jpeg,
            content_type: uploads::JPEG_CONTENT_TYPE.to_owned(),
            filename: with_extension(&upload.filename, "jpg"),
        })
    }
}

/// Whether `extension` (lower-case) names a HEIC-family format
#[must_use]
pub fn is_heic_extension(extension: &str) -> bool {
    uploads::HEIC_EXTENSIONS.contains(&extension)
}

/// Content type guessed from a lower-case extension
#[must_use]
pub fn content_type_for_extension(extension: &str) -> &'static str {
    match extension {
        "png" => "image/png",
        "jpg" | "jpeg" => uploads::JPEG_CONTENT_TYPE,
        "heic" | "heif" => "image/heic",
        _ => uploads::DEFAULT_CONTENT_TYPE,
    }
}

/// Encode a bitmap as JPEG, dropping any alpha channel
///
/// # Errors
///
/// Returns `ImageError::Encode` if the encoder fails
pub fn encode_jpeg(bitmap: &DynamicImage) -> Result<Vec<u8>, ImageError> {
    let rgb = DynamicImage::ImageRgb8(bitmap.to_rgb8());
    let mut buf = Cursor::new(Vec::new());
    rgb.write_to(&mut buf, ImageFormat::Jpeg)
        .map_err(|e| ImageError::Encode(e.to_string()))?;
    Ok(buf.into_inner())
}
