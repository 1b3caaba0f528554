// ABOUTME: Constants module grouping fixed vocabularies and limits by domain
// ABOUTME: Upload rules, food-term vocabulary, recipe-service parameters, and response messages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Meal Recommender Contributors

//! Constants module
//!
//! Every value here is part of the service's external contract; runtime
//! overrides live in the service crate's `ServerConfig`.

/// Size and count limits
pub mod limits {
    /// Maximum accepted request body (16 MiB)
    pub const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

    /// Minimum label confidence kept by the food filter
    pub const LABEL_CONFIDENCE_THRESHOLD: f32 = 0.7;

    /// Number of recipes requested from the recipe service
    pub const RECIPE_RESULT_LIMIT: u32 = 5;

    /// Labels requested from the vision service (the service's own default)
    pub const VISION_MAX_RESULTS: u32 = 10;

    /// Default outbound request timeout in seconds
    pub const HTTP_CLIENT_TIMEOUT_SECS: u64 = 30;

    /// Default outbound connect timeout in seconds
    pub const HTTP_CLIENT_CONNECT_TIMEOUT_SECS: u64 = 10;
}

/// Upload validation and storage naming
pub mod uploads {
    /// Multipart field carrying the image
    pub const IMAGE_FIELD: &str = "image";

    /// Accepted filename extensions (compared case-insensitively)
    pub const ALLOWED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "heic"];

    /// Extensions decoded and re-encoded as JPEG before publishing
    pub const HEIC_EXTENSIONS: [&str; 2] = ["heic", "heif"];

    /// Object key prefix inside the bucket
    pub const KEY_PREFIX: &str = "uploads";

    /// UTC timestamp layout used in object keys
    pub const KEY_TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

    /// Fallback stem when sanitization strips the whole filename
    pub const FALLBACK_STEM: &str = "upload";

    /// Content type used when the client declares none
    pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

    /// Content type of re-encoded HEIC uploads
    pub const JPEG_CONTENT_TYPE: &str = "image/jpeg";
}

/// Food-label vocabulary
pub mod food {
    /// A label is food-related when its lower-cased description contains one of these
    pub const FOOD_TERMS: [&str; 6] = ["food", "fruit", "vegetable", "meat", "dish", "ingredient"];
}

/// Recipe service parameters
pub mod recipes {
    /// Public recipe page prefix used to build detail URLs
    pub const DETAIL_BASE_URL: &str = "https://spoonacular.com/recipes";

    /// Default API base URL
    pub const DEFAULT_API_BASE_URL: &str = "https://api.spoonacular.com";

    /// Search endpoint path
    pub const FIND_BY_INGREDIENTS_PATH: &str = "/recipes/findByIngredients";

    /// Ranking mode 2: minimize missing ingredients / maximize used ones
    pub const RANKING_MAXIMIZE_USED: u8 = 2;

    /// Placeholder shipped in sample `.env` files
    pub const PLACEHOLDER_API_KEY: &str = "YOUR_API_KEY_HERE";
}

/// Google Cloud endpoints
pub mod google {
    /// Default Cloud Vision API base URL
    pub const DEFAULT_VISION_BASE_URL: &str = "https://vision.googleapis.com";

    /// Default Cloud Storage API base URL (also the public object host)
    pub const DEFAULT_STORAGE_BASE_URL: &str = "https://storage.googleapis.com";

    /// Default upload bucket
    pub const DEFAULT_BUCKET: &str = "meal-recommender-uploads-kitchenapp";

    /// GCE/Cloud Run metadata server
    pub const DEFAULT_METADATA_BASE_URL: &str = "http://metadata.google.internal";

    /// Seconds subtracted from a metadata token's lifetime before it is refreshed
    pub const TOKEN_REFRESH_MARGIN_SECS: u64 = 60;
}

/// User-facing response messages
pub mod messages {
    /// Missing `image` multipart field
    pub const NO_FILE_PROVIDED: &str = "No file provided";

    /// `image` field present with an empty filename
    pub const NO_FILE_SELECTED: &str = "No file selected";

    /// Extension outside the allowed set
    pub const FILE_TYPE_NOT_ALLOWED: &str = "File type not allowed";

    /// Normalize or publish step failed
    pub const ERROR_PROCESSING_IMAGE: &str = "Error processing image";

    /// Body exceeded the transport limit
    pub const FILE_TOO_LARGE: &str = "File too large. Maximum size is 16MB";
}

/// Service identification used in logs
pub mod service_names {
    /// Default service name
    pub const MEAL_RECOMMENDER: &str = "meal-recommender";
}
