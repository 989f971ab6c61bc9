// ABOUTME: Shared server resources handed to every route handler
// ABOUTME: Wires configured oracle adapters and the plan store behind trait objects
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Server resources
//!
//! Everything a handler needs lives in one `Arc<ServerResources>`. Oracles are
//! trait objects so tests can substitute in-process fakes. A provider whose
//! API key is not configured is `None`, and the route using it answers with
//! `CONFIG_MISSING`.

use std::sync::Arc;

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::info;

use crate::config::ServerConfig;
use crate::errors::{AppError, AppResult};
use crate::images::{ImageLookup, UnsplashSourceLookup};
use crate::llm::{GroqProvider, LlmProvider};
use crate::plan::PlanSectionParser;
use crate::speech::{MurfProvider, SpeechSynthesizer};
use crate::store::{InMemoryPlanStore, PlanStore};

/// Shared state for all routes
pub struct ServerResources {
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Plan section parser
    pub parser: PlanSectionParser,
    /// Text-generation oracle, absent without `GROQ_API_KEY`
    pub llm: Option<Arc<dyn LlmProvider>>,
    /// Speech oracle, absent without `MURF_API_KEY`
    pub speech: Option<Arc<dyn SpeechSynthesizer>>,
    /// Image lookup
    pub images: Arc<dyn ImageLookup>,
    /// Plan persistence
    pub store: Arc<dyn PlanStore>,
}

impl ServerResources {
    /// Build production resources from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the outbound HTTP client cannot be built
    pub fn from_config(config: ServerConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.http.client_timeout())
            .user_agent(concat!("ai-fitness-coach/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        let llm = config.llm.api_key.as_ref().map(|key| {
            Arc::new(
                GroqProvider::new(client.clone(), key.clone())
                    .with_base_url(config.llm.base_url.clone())
                    .with_default_model(config.generation.model.clone()),
            ) as Arc<dyn LlmProvider>
        });

        let speech = config.speech.api_key.as_ref().map(|key| {
            Arc::new(
                MurfProvider::new(client.clone(), key.clone())
                    .with_base_url(config.speech.base_url.clone())
                    .with_voice_id(config.speech.voice_id.clone()),
            ) as Arc<dyn SpeechSynthesizer>
        });

        info!(
            llm = llm.is_some(),
            speech = speech.is_some(),
            store_capacity = config.plan_store_max_entries,
            "Server resources initialized"
        );

        Ok(Self {
            images: Arc::new(UnsplashSourceLookup::new(config.image_base_url.clone())),
            store: Arc::new(InMemoryPlanStore::new(config.plan_store_max_entries)),
            parser: PlanSectionParser::new(),
            llm,
            speech,
            config: Arc::new(config),
        })
    }

    /// Builder for assembling resources with substitute oracles
    #[must_use]
    pub fn builder(config: ServerConfig) -> ServerResourcesBuilder {
        ServerResourcesBuilder::new(config)
    }

    /// Text-generation oracle or `CONFIG_MISSING`
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` when no LLM is configured
    pub fn llm(&self) -> AppResult<&dyn LlmProvider> {
        self.llm
            .as_deref()
            .ok_or_else(|| AppError::config_missing("GROQ_API_KEY"))
    }

    /// Speech oracle or `CONFIG_MISSING`
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` when no synthesizer is configured
    pub fn speech(&self) -> AppResult<&dyn SpeechSynthesizer> {
        self.speech
            .as_deref()
            .ok_or_else(|| AppError::config_missing("MURF_API_KEY"))
    }
}

/// Builder for [`ServerResources`]
///
/// Starts with no oracles, the Unsplash lookup and an in-memory store sized
/// from the configuration.
pub struct ServerResourcesBuilder {
    config: ServerConfig,
    llm: Option<Arc<dyn LlmProvider>>,
    speech: Option<Arc<dyn SpeechSynthesizer>>,
    images: Option<Arc<dyn ImageLookup>>,
    store: Option<Arc<dyn PlanStore>>,
}

impl ServerResourcesBuilder {
    /// Create a builder around `config`
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            llm: None,
            speech: None,
            images: None,
            store: None,
        }
    }

    /// Set the text-generation oracle
    #[must_use]
    pub fn with_llm(mut self, llm: Arc<dyn LlmProvider>) -> Self {
        self.llm = Some(llm);
        self
    }

    /// Set the speech oracle
    #[must_use]
    pub fn with_speech(mut self, speech: Arc<dyn SpeechSynthesizer>) -> Self {
        self.speech = Some(speech);
        self
    }

    /// Set the image lookup
    #[must_use]
    pub fn with_images(mut self, images: Arc<dyn ImageLookup>) -> Self {
        self.images = Some(images);
        self
    }

    /// Set the plan store
    #[must_use]
    pub fn with_store(mut self, store: Arc<dyn PlanStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Assemble the resources
    #[must_use]
    pub fn build(self) -> ServerResources {
        let Self {
            config,
            llm,
            speech,
            images,
            store,
        } = self;

        ServerResources {
            images: images.unwrap_or_else(|| {
                Arc::new(UnsplashSourceLookup::new(config.image_base_url.clone()))
            }),
            store: store.unwrap_or_else(|| {
                Arc::new(InMemoryPlanStore::new(config.plan_store_max_entries))
            }),
            parser: PlanSectionParser::new(),
            llm,
            speech,
            config: Arc::new(config),
        }
    }
}
