// ABOUTME: Text-to-speech routes returning synthesized audio for plan text
// ABOUTME: Reads free text or one section of a saved plan, validating input before the synthesizer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::header,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use tracing::instrument;

use super::{json_body, required_text};
use crate::errors::{AppError, AppResult};
use crate::plan::PlanSection;
use crate::resources::ServerResources;
use crate::speech::SpeechAudio;
use crate::store::validate_key;

/// Body of `POST /api/tts`
#[derive(Debug, Default, Deserialize)]
pub struct SpeechRequest {
    /// Text to read aloud
    #[serde(default)]
    pub text: Option<String>,
}

/// Body of `POST /api/plans/:key/tts`
#[derive(Debug, Default, Deserialize)]
pub struct PlanSpeechRequest {
    /// Section to read; the workout plan when omitted
    #[serde(default)]
    pub section: Option<PlanSection>,
}

/// Speech routes handler
pub struct SpeechRoutes;

impl SpeechRoutes {
    /// Create the TTS routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/tts", post(Self::synthesize))
            .route("/api/plans/:key/tts", post(Self::synthesize_section))
            .with_state(resources)
    }

    #[instrument(skip_all)]
    async fn synthesize(
        State(resources): State<Arc<ServerResources>>,
        payload: Result<Json<SpeechRequest>, JsonRejection>,
    ) -> AppResult<Response> {
        let text = required_text(json_body(payload)?.text, "text")?;
        let audio = resources.speech()?.synthesize(&text).await?;

        Ok(audio_response(audio))
    }

    #[instrument(skip_all, fields(key = %key))]
    async fn synthesize_section(
        State(resources): State<Arc<ServerResources>>,
        Path(key): Path<String>,
        payload: Result<Json<PlanSpeechRequest>, JsonRejection>,
    ) -> AppResult<Response> {
        validate_key(&key)?;
        let section = json_body(payload)?.section.unwrap_or_default();

        let plan = resources
            .store
            .get(&key)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Plan {key:?}")))?;
        let text = plan.section(section);
        if text.is_empty() {
            return Err(AppError::invalid_input(format!(
                "No content available for {section}"
            )));
        }

        let audio = resources.speech()?.synthesize(text).await?;
        Ok(audio_response(audio))
    }
}

fn audio_response(audio: SpeechAudio) -> Response {
    ([(header::CONTENT_TYPE, audio.content_type)], audio.bytes).into_response()
}
