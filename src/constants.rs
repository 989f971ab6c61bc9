// ABOUTME: System-wide constants and defaults for the AI Fitness Coach service
// ABOUTME: Holds service names, environment defaults, plan placeholders and oracle endpoints
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Constants Module
//!
//! Hardcoded defaults. Environment overrides are read in
//! [`crate::config::environment`].

/// Service identification
pub mod service_names {
    /// Service name used in logs and health responses
    pub const AI_FITNESS_COACH: &str = "ai-fitness-coach";
}

/// Listener defaults
pub mod ports {
    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 8081;
    /// Default bind address
    pub const DEFAULT_HOST: &str = "127.0.0.1";
}

/// Plan record defaults
pub mod plan {
    /// Name used when the user did not give one
    pub const DEFAULT_USER_NAME: &str = "User";
    /// Storage key the web client uses for its single saved plan
    pub const DEFAULT_STORAGE_KEY: &str = "ai_fitness_plan";
    /// Longest accepted storage key
    pub const MAX_STORAGE_KEY_LEN: usize = 128;
    /// Download name for exported plans
    pub const EXPORT_FILENAME: &str = "fitness-plan.txt";
}

/// LLM generation defaults
pub mod llm {
    /// Groq OpenAI-compatible endpoint
    pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
    /// Default model for plan generation
    pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";
    /// Sampling temperature used for plans
    pub const DEFAULT_TEMPERATURE: f32 = 0.7;
    /// Completion budget for plans
    pub const DEFAULT_MAX_TOKENS: u32 = 2048;
}

/// Speech synthesis defaults
pub mod speech {
    /// Murf REST endpoint
    pub const MURF_BASE_URL: &str = "https://api.murf.ai/v1";
    /// Voice used for plan playback
    pub const DEFAULT_VOICE_ID: &str = "en-US-ken";
    /// Audio container requested from Murf
    pub const AUDIO_FORMAT: &str = "MP3";
    /// Content type of synthesized audio
    pub const AUDIO_CONTENT_TYPE: &str = "audio/mpeg";
}

/// Image lookup defaults
pub mod images {
    /// Unsplash Source endpoint
    pub const UNSPLASH_SOURCE_URL: &str = "https://source.unsplash.com";
    /// Requested image dimensions
    pub const IMAGE_SIZE: &str = "800x600";
    /// Keywords appended to every lookup
    pub const EXTRA_KEYWORDS: &str = "fitness,food,healthy";
}

/// Limits and timeouts
pub mod limits {
    /// Plans retained by the in-memory store
    pub const DEFAULT_PLAN_STORE_MAX_ENTRIES: usize = 1000;
    /// Outbound HTTP timeout in seconds
    pub const DEFAULT_HTTP_CLIENT_TIMEOUT_SECS: u64 = 60;
    /// Inbound request timeout in seconds
    pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 90;
    /// Inbound body limit in bytes
    pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;
    /// Characters of an upstream error body kept in error messages
    pub const UPSTREAM_ERROR_PREVIEW_CHARS: usize = 200;
}
