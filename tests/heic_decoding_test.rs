// ABOUTME: Decodes real HEIC containers through libheif and the default normalizer
// ABOUTME: Fixtures are encoded in-process with libheif's HEVC encoder
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Meal Recommender Contributors

#![cfg(feature = "heic")]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use image::{GenericImageView, ImageFormat};
use libheif_rs::{
    Channel, ColorSpace, CompressionFormat, EncoderQuality, HeifContext, Image, LibHeif, RgbChroma,
};
use meal_recommender::imaging::{HeicDecoder, ImageNormalizer, LibheifDecoder};
use meal_recommender::models::UploadedImage;

const WIDTH: u32 = 64;
const HEIGHT: u32 = 48;
const FILL: [u8; 3] = [200, 120, 40];

/// Encode a solid-colour HEIC image
fn heic_fixture() -> Vec<u8> {
    let mut image = Image::new(WIDTH, HEIGHT, ColorSpace::Rgb(RgbChroma::Rgb)).unwrap();
    image
        .create_plane(Channel::Interleaved, WIDTH, HEIGHT, 8)
        .unwrap();

    let planes = image.planes_mut();
    let plane = planes.interleaved.unwrap();
    let stride = plane.stride;
    for row in plane.data.chunks_mut(stride).take(HEIGHT as usize) {
        for pixel in row[..WIDTH as usize * 3].chunks_mut(3) {
            pixel.copy_from_slice(&FILL);
        }
    }

    let lib_heif = LibHeif::new();
    let mut encoder = lib_heif
        .encoder_for_format(CompressionFormat::Hevc)
        .expect("libheif built without an HEVC encoder");
    encoder.set_quality(EncoderQuality::Lossy(90)).unwrap();

    let mut context = HeifContext::new().unwrap();
    context.encode_image(&image, &mut encoder, None).unwrap();
    context.write_to_bytes().unwrap()
}

fn close_to_fill(pixel: [u8; 3]) -> bool {
    pixel
        .iter()
        .zip(FILL)
        .all(|(&got, want)| got.abs_diff(want) <= 16)
}

#[test]
fn test_libheif_decodes_real_container() {
    let bitmap = LibheifDecoder.decode(&heic_fixture()).unwrap();

    assert_eq!(bitmap.dimensions(), (WIDTH, HEIGHT));
    let rgb = bitmap.to_rgb8();
    assert!(close_to_fill(rgb.get_pixel(WIDTH / 2, HEIGHT / 2).0));
    assert!(close_to_fill(rgb.get_pixel(WIDTH - 1, HEIGHT - 1).0));
}

#[test]
fn test_libheif_rejects_garbage() {
    let result = LibheifDecoder.decode(b"\0\0\0\x18ftypheic not a real container");
    assert!(result.is_err());
}

#[tokio::test]
async fn test_default_normalizer_converts_heic_to_jpeg() {
    let upload = UploadedImage::new(heic_fixture(), "Dinner Plate.HEIC", None);

    let normalized = ImageNormalizer::default().normalize(upload).await.unwrap();

    assert_eq!(normalized.content_type, "image/jpeg");
    assert_eq!(normalized.filename, "Dinner Plate.jpg");
    assert_eq!(
        image::guess_format(&normalized.data).unwrap(),
        ImageFormat::Jpeg
    );
    let jpeg = image::load_from_memory(&normalized.data).unwrap();
    assert_eq!(jpeg.dimensions(), (WIDTH, HEIGHT));
}
