// ABOUTME: Groq text-generation adapter over the OpenAI-compatible chat completions API
// ABOUTME: Maps upstream status codes onto AppError, including non-JSON gateway errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Groq Provider
//!
//! Implementation of [`LlmProvider`] for Groq's hosted Llama models.
//!
//! ## Configuration
//!
//! `GROQ_API_KEY` holds the key from <https://console.groq.com/keys>.
//! `GROQ_BASE_URL` overrides the endpoint, which is how tests point the
//! adapter at a local server.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument, warn};

use super::{ChatMessage, ChatRequest, ChatResponse, LlmProvider, TokenUsage};
use crate::constants::{
    limits::UPSTREAM_ERROR_PREVIEW_CHARS,
    llm::{DEFAULT_MODEL, GROQ_BASE_URL},
};
use crate::errors::{AppError, AppResult};

/// Service name used in error messages
const SERVICE: &str = "Groq";

// ============================================================================
// API Request/Response Types (OpenAI-compatible format)
// ============================================================================

#[derive(Debug, Serialize)]
struct GroqRequest<'a> {
    model: &'a str,
    messages: Vec<GroqMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct GroqMessage<'a> {
    role: &'static str,
    content: &'a str,
}

impl<'a> From<&'a ChatMessage> for GroqMessage<'a> {
    fn from(msg: &'a ChatMessage) -> Self {
        Self {
            role: msg.role.as_str(),
            content: &msg.content,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GroqResponse {
    #[serde(default)]
    choices: Vec<GroqChoice>,
    #[serde(default)]
    usage: Option<GroqUsage>,
    #[serde(default)]
    model: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GroqChoice {
    #[serde(default)]
    message: Option<GroqResponseMessage>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GroqResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GroqUsage {
    #[serde(rename = "prompt_tokens")]
    prompt: u32,
    #[serde(rename = "completion_tokens")]
    completion: u32,
    #[serde(rename = "total_tokens")]
    total: u32,
}

#[derive(Debug, Deserialize)]
struct GroqErrorResponse {
    error: GroqErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GroqErrorDetail {
    message: String,
    #[serde(rename = "type")]
    error_type: Option<String>,
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Groq chat-completions client
pub struct GroqProvider {
    client: Client,
    api_key: String,
    base_url: String,
    default_model: String,
}

impl GroqProvider {
    /// Create a provider against the public Groq endpoint
    #[must_use]
    pub fn new(client: Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: GROQ_BASE_URL.to_owned(),
            default_model: DEFAULT_MODEL.to_owned(),
        }
    }

    /// Use a different API base URL
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    /// Use a different default model
    #[must_use]
    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    fn api_url(&self, endpoint: &str) -> String {
        format!("{}/{endpoint}", self.base_url)
    }

    /// Map a non-success upstream response to an error
    ///
    /// The status decides the error code. A JSON error body only refines the
    /// message; anything else (gateway HTML, plain text) is quoted as a preview.
    fn parse_error_response(status: StatusCode, body: &str) -> AppError {
        let preview: String = body.chars().take(UPSTREAM_ERROR_PREVIEW_CHARS).collect();
        let details = serde_json::json!({
            "upstream_status": status.as_u16(),
            "upstream_body": preview,
        });

        let parsed = serde_json::from_str::<GroqErrorResponse>(body).ok();
        let message = parsed.as_ref().map_or_else(
            || {
                if preview.trim().is_empty() {
                    status.to_string()
                } else {
                    preview.trim().to_owned()
                }
            },
            |response| response.error.message.clone(),
        );

        let error = match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                AppError::external_auth(SERVICE, format!("authentication failed: {message}"))
            }
            StatusCode::TOO_MANY_REQUESTS => {
                AppError::external_rate_limited(SERVICE, format!("rate limit exceeded: {message}"))
            }
            StatusCode::BAD_REQUEST => {
                AppError::invalid_input(format!("Groq API validation error: {message}"))
            }
            _ => match parsed.and_then(|response| response.error.error_type) {
                Some(error_type) => {
                    AppError::external_service(SERVICE, format!("{error_type} - {message}"))
                }
                None => AppError::external_service(
                    SERVICE,
                    format!("API error ({status}): {message}"),
                ),
            },
        };
        error.with_details(details)
    }
}

#[async_trait]
impl LlmProvider for GroqProvider {
    fn name(&self) -> &'static str {
        "groq"
    }

    fn display_name(&self) -> &'static str {
        "Groq (Llama)"
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }

    #[instrument(skip(self, request), fields(model = %request.model.as_deref().unwrap_or(&self.default_model)))]
    async fn complete(&self, request: &ChatRequest) -> AppResult<ChatResponse> {
        let model = request.model.as_deref().unwrap_or(&self.default_model);

        debug!("Sending chat completion request to Groq");

        let groq_request = GroqRequest {
            model,
            messages: request.messages.iter().map(GroqMessage::from).collect(),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let response = self
            .client
            .post(self.api_url("chat/completions"))
            .bearer_auth(&self.api_key)
            .json(&groq_request)
            .send()
            .await
            .map_err(|e| {
                error!("Failed to send request to Groq API: {}", e);
                AppError::external_unavailable(SERVICE, format!("Failed to connect: {e}"))
                    .with_source(e)
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!("Failed to read Groq API response: {}", e);
            AppError::external_service(SERVICE, format!("Failed to read response: {e}"))
        })?;

        if !status.is_success() {
            warn!(%status, "Groq API returned an error");
            return Err(Self::parse_error_response(status, &body));
        }

        let groq_response: GroqResponse = serde_json::from_str(&body).map_err(|e| {
            error!("Failed to parse Groq API response: {}", e);
            AppError::external_service(SERVICE, format!("Failed to parse response: {e}"))
        })?;

        let (content, finish_reason) = groq_response
            .choices
            .into_iter()
            .next()
            .map(|choice| {
                (
                    choice.message.and_then(|m| m.content).unwrap_or_default(),
                    choice.finish_reason,
                )
            })
            .unwrap_or_default();

        debug!(
            "Received response from Groq: {} chars, finish_reason: {:?}",
            content.len(),
            finish_reason
        );

        Ok(ChatResponse {
            content,
            model: groq_response.model.unwrap_or_else(|| model.to_owned()),
            usage: groq_response.usage.map(|u| TokenUsage {
                prompt_tokens: u.prompt,
                completion_tokens: u.completion,
                total_tokens: u.total,
            }),
            finish_reason,
        })
    }

    #[instrument(skip(self))]
    async fn health_check(&self) -> AppResult<bool> {
        debug!("Performing Groq API health check");

        let response = self
            .client
            .get(self.api_url("models"))
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| {
                error!("Groq health check failed: {}", e);
                AppError::external_unavailable(SERVICE, format!("Health check failed: {e}"))
            })?;

        let healthy = response.status().is_success();
        if !healthy {
            warn!(
                "Groq API health check failed with status: {}",
                response.status()
            );
        }

        Ok(healthy)
    }
}
