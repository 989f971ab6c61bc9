// ABOUTME: Speech-synthesis oracle contract used to read plans aloud
// ABOUTME: Defines SpeechSynthesizer and the SpeechAudio payload
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

mod murf;

pub use murf::MurfProvider;

use async_trait::async_trait;
use bytes::Bytes;

use crate::errors::AppResult;

/// Encoded audio returned by a synthesizer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechAudio {
    /// Raw audio bytes
    pub bytes: Bytes,
    /// MIME type of `bytes`
    pub content_type: String,
}

/// Text-to-speech oracle
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Provider identifier used in logs
    fn name(&self) -> &'static str;

    /// Convert `text` to audio
    async fn synthesize(&self, text: &str) -> AppResult<SpeechAudio>;
}
