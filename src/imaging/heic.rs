// ABOUTME: HEIC decoding seam with a libheif-backed decoder behind the default `heic` feature
// ABOUTME: Builds with --no-default-features fall back to a decoder that rejects every HEIC upload
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Meal Recommender Contributors

use crate::errors::ImageError;
use image::DynamicImage;
use std::sync::Arc;

/// Decodes HEIC bytes into an in-memory bitmap
///
/// Implementations run on the blocking thread pool and may be CPU heavy.
pub trait HeicDecoder: Send + Sync {
    /// Decode the primary image of a HEIC container
    ///
    /// # Errors
    ///
    /// Returns `ImageError` if the bytes are not a decodable HEIC image
    fn decode(&self, data: &[u8]) -> Result<DynamicImage, ImageError>;

    /// Decoder name for logs
    fn name(&self) -> &'static str;
}

/// Decoder used when the binary is built without libheif
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedHeicDecoder;

impl HeicDecoder for UnsupportedHeicDecoder {
    fn decode(&self, _data: &[u8]) -> Result<DynamicImage, ImageError> {
        Err(ImageError::HeicUnsupported)
    }

    fn name(&self) -> &'static str {
        "unsupported"
    }
}

/// libheif decoder
#[cfg(feature = "heic")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LibheifDecoder;

#[cfg(feature = "heic")]
impl HeicDecoder for LibheifDecoder {
    fn decode(&self, data: &[u8]) -> Result<DynamicImage, ImageError> {
        use libheif_rs::{ColorSpace, HeifContext, LibHeif, RgbChroma};

        let lib_heif = LibHeif::new();
        let context =
            HeifContext::read_from_bytes(data).map_err(|e| ImageError::decode("heic", e.to_string()))?;
        let handle = context
            .primary_image_handle()
            .map_err(|e| ImageError::decode("heic", e.to_string()))?;
        let decoded = lib_heif
            .decode(&handle, ColorSpace::Rgb(RgbChroma::Rgb), None)
            .map_err(|e| ImageError::decode("heic", e.to_string()))?;

        let planes = decoded.planes();
        let plane = planes
            .interleaved
            .ok_or_else(|| ImageError::decode("heic", "no interleaved RGB plane"))?;

        let width = plane.width;
        let height = plane.height;
        let row_len = width as usize * 3;

        // libheif rows may be padded beyond width * 3
        let mut pixels = Vec::with_capacity(row_len * height as usize);
        for row in plane.data.chunks(plane.stride).take(height as usize) {
            let row = row
                .get(..row_len)
                .ok_or_else(|| ImageError::decode("heic", "truncated pixel row"))?;
            pixels.extend_from_slice(row);
        }

        image::RgbImage::from_raw(width, height, pixels)
            .map(DynamicImage::ImageRgb8)
            .ok_or_else(|| ImageError::decode("heic", "pixel buffer does not match dimensions"))
    }

    fn name(&self) -> &'static str {
        "libheif"
    }
}

/// Best decoder compiled into this binary
#[must_use]
pub fn default_decoder() -> Arc<dyn HeicDecoder> {
    #[cfg(feature = "heic")]
    {
        Arc::new(LibheifDecoder)
    }
    #[cfg(not(feature = "heic"))]
    {
        Arc::new(UnsupportedHeicDecoder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_decoder_rejects_everything() {
        let result = UnsupportedHeicDecoder.decode(b"\0\0\0\x18ftypheic");
        assert!(matches!(result, Err(ImageError::HeicUnsupported)));
    }
}
