// ABOUTME: In-process fake oracles for route tests
// ABOUTME: Record what they were asked and answer with canned output or errors

use std::sync::{Arc, Mutex};

use ai_fitness_coach::{
    config::ServerConfig,
    errors::{AppError, AppResult},
    llm::{ChatRequest, ChatResponse, LlmProvider},
    resources::ServerResources,
    speech::{SpeechAudio, SpeechSynthesizer},
};
use async_trait::async_trait;
use bytes::Bytes;

/// What the fake LLM answers with
#[derive(Clone)]
pub enum FakeReply {
    /// Successful completion with this text
    Text(String),
    /// Error returned from `complete`
    Fail(fn() -> AppError),
}

/// LLM that returns a canned reply and records requests
pub struct FakeLlm {
    reply: FakeReply,
    requests: Mutex<Vec<ChatRequest>>,
}

impl FakeLlm {
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: FakeReply::Text(text.to_owned()),
            requests: Mutex::new(Vec::new()),
        })
    }

    #[allow(dead_code)]
    pub fn failing(error: fn() -> AppError) -> Arc<Self> {
        Arc::new(Self {
            reply: FakeReply::Fail(error),
            requests: Mutex::new(Vec::new()),
        })
    }

    #[allow(dead_code)]
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for FakeLlm {
    fn name(&self) -> &'static str {
        "fake"
    }

    fn display_name(&self) -> &'static str {
        "Fake LLM"
    }

    fn default_model(&self) -> &str {
        "fake-model"
    }

    async fn complete(&self, request: &ChatRequest) -> AppResult<ChatResponse> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.reply {
            FakeReply::Text(text) => Ok(ChatResponse {
                content: text.clone(),
                model: request.model.clone().unwrap_or_else(|| "fake-model".to_owned()),
                usage: None,
                finish_reason: Some("stop".to_owned()),
            }),
            FakeReply::Fail(error) => Err(error()),
        }
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}

/// Synthesizer that returns fixed bytes
pub struct FakeSpeech {
    pub texts: Mutex<Vec<String>>,
}

impl FakeSpeech {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            texts: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl SpeechSynthesizer for FakeSpeech {
    fn name(&self) -> &'static str {
        "fake"
    }

    async fn synthesize(&self, text: &str) -> AppResult<SpeechAudio> {
        self.texts.lock().unwrap().push(text.to_owned());
        Ok(SpeechAudio {
            bytes: Bytes::from_static(b"ID3-fake-mp3"),
            content_type: "audio/mpeg".to_owned(),
        })
    }
}

/// Resources with no oracles configured
#[allow(dead_code)]
pub fn bare_resources() -> Arc<ServerResources> {
    Arc::new(ServerResources::builder(ServerConfig::default()).build())
}
