// ABOUTME: Murf AI text-to-speech adapter
// ABOUTME: Handles both the audio-file URL and the inline base64 response shapes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Murf Provider
//!
//! `POST {base}/speech/generate` answers with JSON that carries either an
//! `audioFile` URL (fetched in a second request) or `audioContent` as base64.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::Bytes;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument, warn};

use super::{SpeechAudio, SpeechSynthesizer};
use crate::constants::{
    limits::UPSTREAM_ERROR_PREVIEW_CHARS,
    speech::{AUDIO_CONTENT_TYPE, AUDIO_FORMAT, DEFAULT_VOICE_ID, MURF_BASE_URL},
};
use crate::errors::{AppError, AppResult};

const SERVICE: &str = "Murf AI";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MurfRequest<'a> {
    text: &'a str,
    voice_id: &'a str,
    format: &'static str,
    speed: i32,
    pitch: i32,
}

/// Only one of the two fields is expected to be set
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MurfResponse {
    #[serde(default)]
    audio_file: Option<String>,
    #[serde(default)]
    audio_content: Option<String>,
}

/// Where the synthesized audio can be found
#[derive(Debug, PartialEq, Eq)]
enum AudioSource {
    Url(String),
    Inline(Vec<u8>),
}

impl MurfResponse {
    fn into_source(self) -> AppResult<AudioSource> {
        if let Some(url) = self.audio_file.filter(|u| !u.is_empty()) {
            return Ok(AudioSource::Url(url));
        }
        if let Some(content) = self.audio_content.filter(|c| !c.is_empty()) {
            let decoded = STANDARD.decode(content.trim()).map_err(|e| {
                AppError::external_service(SERVICE, format!("Invalid base64 audio: {e}"))
            })?;
            return Ok(AudioSource::Inline(decoded));
        }
        Err(AppError::external_service(
            SERVICE,
            "No audio returned from Murf AI",
        ))
    }
}

/// Murf speech-generation client
pub struct MurfProvider {
    client: Client,
    api_key: String,
    base_url: String,
    voice_id: String,
}

impl MurfProvider {
    /// Create a provider against the public Murf endpoint
    #[must_use]
    pub fn new(client: Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: MURF_BASE_URL.to_owned(),
            voice_id: DEFAULT_VOICE_ID.to_owned(),
        }
    }

    /// Use a different API base URL
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    /// Use a different voice
    #[must_use]
    pub fn with_voice_id(mut self, voice_id: impl Into<String>) -> Self {
        self.voice_id = voice_id.into();
        self
    }

    async fn download(&self, url: &str) -> AppResult<Bytes> {
        debug!("Downloading Murf audio file");
        let response = self.client.get(url).send().await.map_err(|e| {
            error!("Failed to download Murf audio: {}", e);
            AppError::external_unavailable(SERVICE, format!("Failed to download audio: {e}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::external_service(
                SERVICE,
                format!("Audio download failed ({status})"),
            ));
        }

        response.bytes().await.map_err(|e| {
            AppError::external_service(SERVICE, format!("Failed to read audio: {e}"))
        })
    }
}

#[async_trait]
impl SpeechSynthesizer for MurfProvider {
    fn name(&self) -> &'static str {
        "murf"
    }

    #[instrument(skip(self, text), fields(chars = text.len(), voice = %self.voice_id))]
    async fn synthesize(&self, text: &str) -> AppResult<SpeechAudio> {
        let request = MurfRequest {
            text,
            voice_id: &self.voice_id,
            format: AUDIO_FORMAT,
            speed: 0,
            pitch: 0,
        };

        let response = self
            .client
            .post(format!("{}/speech/generate", self.base_url))
            .header("api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("Failed to send request to Murf API: {}", e);
                AppError::external_unavailable(SERVICE, format!("Failed to connect: {e}"))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            AppError::external_service(SERVICE, format!("Failed to read response: {e}"))
        })?;

        if !status.is_success() {
            warn!(%status, "Murf API returned an error");
            let preview: String = body.chars().take(UPSTREAM_ERROR_PREVIEW_CHARS).collect();
            return Err(
                AppError::external_service(SERVICE, format!("API error ({status})")).with_details(
                    serde_json::json!({
                        "upstream_status": status.as_u16(),
                        "upstream_body": preview,
                    }),
                ),
            );
        }

        let parsed: MurfResponse = serde_json::from_str(&body).map_err(|e| {
            AppError::external_service(SERVICE, format!("Failed to parse response: {e}"))
        })?;

        let bytes = match parsed.into_source()? {
            AudioSource::Url(url) => self.download(&url).await?,
            AudioSource::Inline(decoded) => Bytes::from(decoded),
        };

        debug!(bytes = bytes.len(), "Synthesized speech");

        Ok(SpeechAudio {
            bytes,
            content_type: AUDIO_CONTENT_TYPE.to_owned(),
        })
    }
}
