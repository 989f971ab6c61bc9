// ABOUTME: Image-lookup oracle contract and the Unsplash Source URL builder
// ABOUTME: Turns a free-text prompt into a stock image URL without a network call
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::constants::images::{EXTRA_KEYWORDS, IMAGE_SIZE, UNSPLASH_SOURCE_URL};
use crate::errors::AppResult;

/// Result of an image lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageResult {
    /// Public URL of the image
    pub url: String,
}

/// Image lookup oracle
#[async_trait]
pub trait ImageLookup: Send + Sync {
    /// Find an image for `prompt`
    async fn lookup(&self, prompt: &str) -> AppResult<ImageResult>;
}

/// Builds Unsplash Source search URLs
#[derive(Debug, Clone)]
pub struct UnsplashSourceLookup {
    base_url: String,
}

impl UnsplashSourceLookup {
    /// Lookup against `base_url` (normally `https://source.unsplash.com`)
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        }
    }

    /// URL for `prompt`, percent-encoded like `encodeURIComponent`
    #[must_use]
    pub fn url_for(&self, prompt: &str) -> String {
        format!(
            "{}/{IMAGE_SIZE}/?{},{EXTRA_KEYWORDS}",
            self.base_url,
            encode_component(prompt)
        )
    }
}

impl Default for UnsplashSourceLookup {
    fn default() -> Self {
        Self::new(UNSPLASH_SOURCE_URL)
    }
}

#[async_trait]
impl ImageLookup for UnsplashSourceLookup {
    async fn lookup(&self, prompt: &str) -> AppResult<ImageResult> {
        Ok(ImageResult {
            url: self.url_for(prompt),
        })
    }
}

/// `urlencoding` escapes everything but `A-Za-z0-9-._~`; browsers also leave
/// `!'()*` alone in a URI component.
fn encode_component(value: &str) -> String {
    let mut encoded = urlencoding::encode(value).into_owned();
    for (escaped, literal) in [("%21", "!"), ("%27", "'"), ("%28", "("), ("%29", ")"), ("%2A", "*")] {
        if encoded.contains(escaped) {
            encoded = encoded.replace(escaped, literal);
        }
    }
    encoded
}
