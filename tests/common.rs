// ABOUTME: Shared test utilities for integration tests
// ABOUTME: Quiet logging, collaborator fakes, test router, and multipart request builders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Meal Recommender Contributors
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]

//! Shared test utilities for `meal_recommender`

use async_trait::async_trait;
use axum::body::Body;
use axum::Router;
use http::Request;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use meal_recommender::{
    config::ServerConfig,
    errors::{ImageError, RecipeError, StorageError, VisionError},
    external::{filter_food_labels, recipe_detail_url, BlobPublisher, LabelDetector, RecipeLookup},
    imaging::{HeicDecoder, ImageNormalizer, UnsupportedHeicDecoder},
    models::{FoodLabel, NormalizedImage, PublishedImageRef, RecipeSuggestion},
    resources::ServerResources,
    server::build_router,
};
use serde_json::Map;
use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};

static INIT_LOGGER: Once = Once::new();

pub const BOUNDARY: &str = "X-MEAL-RECOMMENDER-BOUNDARY";
pub const PUBLIC_BASE: &str = "https://storage.googleapis.com/test-bucket";

/// Initialize quiet test logging (set `TEST_LOG=DEBUG` for more)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Publisher that records what it was asked to store
#[derive(Default)]
pub struct FakePublisher {
    pub fail: bool,
    pub calls: AtomicUsize,
    pub last: Mutex<Option<NormalizedImage>>,
}

impl FakePublisher {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_image(&self) -> Option<NormalizedImage> {
        self.last.lock().unwrap().clone()
    }
}

#[async_trait]
impl BlobPublisher for FakePublisher {
    async fn publish(&self, image: &NormalizedImage) -> Result<PublishedImageRef, StorageError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some(image.clone());

        if self.fail {
            return Err(StorageError::status("upload", 403, "forbidden"));
        }

        let blob_name = format!("uploads/20240101-120000-{}", image.filename);
        Ok(PublishedImageRef {
            public_url: format!("{PUBLIC_BASE}/{blob_name}"),
            blob_name,
        })
    }
}

/// Detector returning canned raw labels run through the real food filter
#[derive(Default)]
pub struct FakeDetector {
    pub raw: Option<Vec<FoodLabel>>,
    pub calls: AtomicUsize,
    pub last_url: Mutex<Option<String>>,
}

impl FakeDetector {
    pub fn returning(raw: Vec<FoodLabel>) -> Self {
        Self {
            raw: Some(raw),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self::default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LabelDetector for FakeDetector {
    async fn detect_labels(&self, image_url: &str) -> Result<Vec<FoodLabel>, VisionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_url.lock().unwrap() = Some(image_url.to_owned());

        let config = ServerConfig::default();
        self.raw.clone().map_or_else(
            || {
                Err(VisionError::Status {
                    status: 503,
                    body: "unavailable".to_owned(),
                })
            },
            |raw| {
                Ok(filter_food_labels(
                    raw,
                    config.vision.confidence_threshold,
                    &config.vision.food_terms,
                ))
            },
        )
    }
}

/// Recipe lookup returning canned recipes
#[derive(Default)]
pub struct FakeRecipes {
    pub recipes: Option<Vec<RecipeSuggestion>>,
    pub calls: AtomicUsize,
    pub last_ingredients: Mutex<Option<Vec<String>>>,
}

impl FakeRecipes {
    pub fn returning(recipes: Vec<RecipeSuggestion>) -> Self {
        Self {
            recipes: Some(recipes),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self::default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_ingredients(&self) -> Option<Vec<String>> {
        self.last_ingredients.lock().unwrap().clone()
    }
}

#[async_trait]
impl RecipeLookup for FakeRecipes {
    async fn find_by_ingredients(
        &self,
        ingredients: &[String],
    ) -> Result<Vec<RecipeSuggestion>, RecipeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_ingredients.lock().unwrap() = Some(ingredients.to_vec());

        self.recipes.clone().ok_or(RecipeError::Status {
            status: 402,
            body: "daily quota used up".to_owned(),
        })
    }
}

/// Decodes PNG bytes, standing in for a real HEIC decoder
pub struct PngAsHeicDecoder;

impl HeicDecoder for PngAsHeicDecoder {
    fn decode(&self, data: &[u8]) -> Result<DynamicImage, ImageError> {
        image::load_from_memory_with_format(data, ImageFormat::Png)
            .map_err(|e| ImageError::decode("heic", e.to_string()))
    }

    fn name(&self) -> &'static str {
        "png-as-heic"
    }
}

/// Collaborators wired into a test router
pub struct TestApp {
    pub router: Router,
    pub publisher: Arc<FakePublisher>,
    pub detector: Arc<FakeDetector>,
    pub recipes: Arc<FakeRecipes>,
}

/// Build the full router around fakes
pub fn test_app_with_decoder(
    publisher: FakePublisher,
    detector: FakeDetector,
    recipes: FakeRecipes,
    decoder: Arc<dyn HeicDecoder>,
) -> TestApp {
    build_test_app(ServerConfig::default(), publisher, detector, recipes, decoder)
}

/// Build the full router around fakes with an explicit configuration
pub fn build_test_app(
    config: ServerConfig,
    publisher: FakePublisher,
    detector: FakeDetector,
    recipes: FakeRecipes,
    decoder: Arc<dyn HeicDecoder>,
) -> TestApp {
    init_test_logging();

    let publisher = Arc::new(publisher);
    let detector = Arc::new(detector);
    let recipes = Arc::new(recipes);

    let analysis = meal_recommender::services::AnalysisService::new(
        config.uploads.clone(),
        ImageNormalizer::new(decoder),
        Arc::clone(&publisher) as Arc<dyn BlobPublisher>,
        Arc::clone(&detector) as Arc<dyn LabelDetector>,
        Arc::clone(&recipes) as Arc<dyn RecipeLookup>,
    );
    let resources = Arc::new(ServerResources::new(config, analysis));

    TestApp {
        router: build_router(resources),
        publisher,
        detector,
        recipes,
    }
}

/// Build the full router around fakes, without HEIC support
pub fn test_app(publisher: FakePublisher, detector: FakeDetector, recipes: FakeRecipes) -> TestApp {
    test_app_with_decoder(publisher, detector, recipes, Arc::new(UnsupportedHeicDecoder))
}

/// A recipe as the recipe service would return it
pub fn recipe(id: u64, title: &str) -> RecipeSuggestion {
    RecipeSuggestion {
        id,
        title: title.to_owned(),
        image: Some(format!("https://img.spoonacular.com/recipes/{id}-312x231.jpg")),
        image_type: Some("jpg".to_owned()),
        used_ingredient_count: 1,
        missed_ingredient_count: 2,
        likes: 0,
        url: recipe_detail_url(title, id),
        extra: Map::new(),
    }
}

/// Small solid-color PNG
pub fn png_bytes() -> Vec<u8> {
    let bitmap = DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 8, Rgb([240, 200, 40])));
    let mut buf = Cursor::new(Vec::new());
    bitmap.write_to(&mut buf, ImageFormat::Png).unwrap();
    buf.into_inner()
}

/// Multipart body with one part
pub fn multipart_body(
    field: &str,
    filename: Option<&str>,
    content_type: Option<&str>,
    data: &[u8],
) -> Vec<u8> {
    let mut disposition = format!("Content-Disposition: form-data; name=\"{field}\"");
    if let Some(filename) = filename {
        disposition.push_str(&format!("; filename=\"{filename}\""));
    }

    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n{disposition}\r\n").as_bytes());
    if let Some(content_type) = content_type {
        body.extend_from_slice(format!("Content-Type: {content_type}\r\n").as_bytes());
    }
    body.extend_from_slice(b"\r\n");
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// `POST /analyze` with a multipart body
pub fn analyze_request(body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/analyze")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

/// `POST /analyze` uploading `data` as the `image` field
pub fn image_upload(filename: &str, content_type: Option<&str>, data: &[u8]) -> Request<Body> {
    analyze_request(multipart_body("image", Some(filename), content_type, data))
}
