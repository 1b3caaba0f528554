// ABOUTME: Upload filename sanitization and timestamped object key construction
// ABOUTME: Reduces client filenames to safe ASCII while keeping their extension
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Meal Recommender Contributors

//! Filename helpers
//!
//! Object keys have the form `uploads/<UTC YYYYMMDD-HHMMSS>-<sanitized name>`.
//! Two uploads with the same sanitized name in the same second map to the
//! same key and the later one overwrites the earlier.

use crate::constants::uploads;
use chrono::{DateTime, Utc};

/// Reduce `name` to `[A-Za-z0-9_.-]`
///
/// Non-ASCII characters are dropped, path separators become whitespace,
/// whitespace runs become a single `_`, and leading or trailing `.`/`_`
/// are stripped. The result may be empty.
#[must_use]
pub fn secure_filename(name: &str) -> String {
    let ascii: String = name
        .chars()
        .filter(char::is_ascii)
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = ascii.split_whitespace().collect::<Vec<_>>().join("_");

    joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect::<String>()
        .trim_matches(|c| c == '.' || c == '_')
        .to_owned()
}

/// Sanitize a client filename while keeping its extension
///
/// Stem and extension are sanitized separately so a name whose stem is
/// entirely non-ASCII still ends in its extension, e.g. `食べ物.jpg` becomes
/// `upload.jpg`.
#[must_use]
pub fn sanitize_upload_name(filename: &str) -> String {
    let (stem, extension) = match filename.rsplit_once('.') {
        Some((stem, extension)) => (stem, secure_filename(extension)),
        None => (filename, String::new()),
    };

    let mut stem = secure_filename(stem);
    if stem.is_empty() {
        stem = uploads::FALLBACK_STEM.to_owned();
    }

    if extension.is_empty() {
        stem
    } else {
        format!("{stem}.{extension}")
    }
}

/// Replace the extension of `filename` with `extension`
#[must_use]
pub fn with_extension(filename: &str, extension: &str) -> String {
    let stem = filename
        .rsplit_once('.')
        .map_or(filename, |(stem, _)| stem);
    format!("{stem}.{extension}")
}

/// Object key for an upload received at `now`
#[must_use]
pub fn storage_key(now: DateTime<Utc>, filename: &str) -> String {
    format!(
        "{}/{}-{}",
        uploads::KEY_PREFIX,
        now.format(uploads::KEY_TIMESTAMP_FORMAT),
        sanitize_upload_name(filename)
    )
}
