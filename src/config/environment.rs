// ABOUTME: Environment configuration for the coach server and its oracle adapters
// ABOUTME: Reads env vars (optionally from .env), applies defaults and validates ranges
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Environment-based configuration

use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::constants::{images, limits, llm, ports, speech};

/// Settings sent with every plan-generation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanGenerationConfig {
    /// Model identifier
    pub model: String,
    /// Sampling temperature, 0.0 to 2.0
    pub temperature: f32,
    /// Completion budget
    pub max_tokens: u32,
}

impl Default for PlanGenerationConfig {
    fn default() -> Self {
        Self {
            model: llm::DEFAULT_MODEL.to_owned(),
            temperature: llm::DEFAULT_TEMPERATURE,
            max_tokens: llm::DEFAULT_MAX_TOKENS,
        }
    }
}

/// Groq API access
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlmApiConfig {
    /// API key; generation is unavailable without it
    pub api_key: Option<String>,
    /// API base URL
    pub base_url: String,
}

impl Default for LlmApiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: llm::GROQ_BASE_URL.to_owned(),
        }
    }
}

/// Murf API access
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeechApiConfig {
    /// API key; speech is unavailable without it
    pub api_key: Option<String>,
    /// API base URL
    pub base_url: String,
    /// Voice used for synthesis
    pub voice_id: String,
}

impl Default for SpeechApiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: speech::MURF_BASE_URL.to_owned(),
            voice_id: speech::DEFAULT_VOICE_ID.to_owned(),
        }
    }
}

/// Inbound and outbound HTTP limits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Allowed CORS origins; `*` allows any
    pub cors_origins: Vec<String>,
    /// Timeout for calls to the oracles
    pub client_timeout_secs: u64,
    /// Timeout for a whole inbound request
    pub request_timeout_secs: u64,
    /// Largest accepted request body
    pub max_body_bytes: usize,
}

impl HttpConfig {
    /// Outbound timeout as a `Duration`
    #[must_use]
    pub const fn client_timeout(&self) -> Duration {
        Duration::from_secs(self.client_timeout_secs)
    }

    /// Inbound timeout as a `Duration`
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            cors_origins: vec!["*".to_owned()],
            client_timeout_secs: limits::DEFAULT_HTTP_CLIENT_TIMEOUT_SECS,
            request_timeout_secs: limits::DEFAULT_REQUEST_TIMEOUT_SECS,
            max_body_bytes: limits::DEFAULT_MAX_BODY_BYTES,
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen port
    pub http_port: u16,
    /// Bind address
    pub host: String,
    /// Plan generation settings
    pub generation: PlanGenerationConfig,
    /// Text-generation oracle
    pub llm: LlmApiConfig,
    /// Speech oracle
    pub speech: SpeechApiConfig,
    /// Unsplash Source base URL
    pub image_base_url: String,
    /// Plans kept by the in-memory store
    pub plan_store_max_entries: usize,
    /// HTTP limits
    pub http: HttpConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: ports::DEFAULT_HTTP_PORT,
            host: ports::DEFAULT_HOST.to_owned(),
            generation: PlanGenerationConfig::default(),
            llm: LlmApiConfig::default(),
            speech: SpeechApiConfig::default(),
            image_base_url: images::UNSPLASH_SOURCE_URL.to_owned(),
            plan_store_max_entries: limits::DEFAULT_PLAN_STORE_MAX_ENTRIES,
            http: HttpConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable cannot be parsed or a value is out of range
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file loaded: {}", e);
        }

        let config = Self {
            http_port: env_parse("HTTP_PORT", ports::DEFAULT_HTTP_PORT)?,
            host: env_var_or("HOST", ports::DEFAULT_HOST),
            generation: PlanGenerationConfig {
                model: env_var_or("PLAN_MODEL", llm::DEFAULT_MODEL),
                temperature: env_parse("PLAN_TEMPERATURE", llm::DEFAULT_TEMPERATURE)?,
                max_tokens: env_parse("PLAN_MAX_TOKENS", llm::DEFAULT_MAX_TOKENS)?,
            },
            llm: LlmApiConfig {
                api_key: env_secret("GROQ_API_KEY"),
                base_url: env_var_or("GROQ_BASE_URL", llm::GROQ_BASE_URL),
            },
            speech: SpeechApiConfig {
                api_key: env_secret("MURF_API_KEY"),
                base_url: env_var_or("MURF_BASE_URL", speech::MURF_BASE_URL),
                voice_id: env_var_or("MURF_VOICE_ID", speech::DEFAULT_VOICE_ID),
            },
            image_base_url: env_var_or("UNSPLASH_SOURCE_URL", images::UNSPLASH_SOURCE_URL),
            plan_store_max_entries: env_parse(
                "PLAN_STORE_MAX_ENTRIES",
                limits::DEFAULT_PLAN_STORE_MAX_ENTRIES,
            )?,
            http: HttpConfig {
                cors_origins: parse_origins(&env_var_or("CORS_ALLOWED_ORIGINS", "*")),
                client_timeout_secs: env_parse(
                    "HTTP_CLIENT_TIMEOUT_SECS",
                    limits::DEFAULT_HTTP_CLIENT_TIMEOUT_SECS,
                )?,
                request_timeout_secs: env_parse(
                    "REQUEST_TIMEOUT_SECS",
                    limits::DEFAULT_REQUEST_TIMEOUT_SECS,
                )?,
                max_body_bytes: env_parse("MAX_BODY_BYTES", limits::DEFAULT_MAX_BODY_BYTES)?,
            },
        };

        config.validate()?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error naming the first out-of-range value
    pub fn validate(&self) -> Result<()> {
        if self.http_port == 0 {
            anyhow::bail!("HTTP_PORT must not be 0");
        }
        let temperature = self.generation.temperature;
        if !(0.0..=2.0).contains(&temperature) {
            anyhow::bail!("PLAN_TEMPERATURE must be between 0.0 and 2.0, got {temperature}");
        }
        if self.generation.max_tokens == 0 {
            anyhow::bail!("PLAN_MAX_TOKENS must be greater than 0");
        }
        if self.plan_store_max_entries == 0 {
            anyhow::bail!("PLAN_STORE_MAX_ENTRIES must be greater than 0");
        }
        if self.http.client_timeout_secs == 0 || self.http.request_timeout_secs == 0 {
            anyhow::bail!("HTTP_CLIENT_TIMEOUT_SECS and REQUEST_TIMEOUT_SECS must be greater than 0");
        }
        if self.http.max_body_bytes == 0 {
            anyhow::bail!("MAX_BODY_BYTES must be greater than 0");
        }
        Ok(())
    }

    /// Address the listener binds to
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.http_port)
    }

    /// Get a summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "AI Fitness Coach Configuration:\n\
             - Listen: {}\n\
             - Plan Model: {} (temperature {}, max tokens {})\n\
             - Groq: {}\n\
             - Murf: {} (voice {})\n\
             - Images: {}\n\
             - Plan Store: memory, {} entries\n\
             - CORS Origins: {}\n\
             - Timeouts: client {}s, request {}s\n\
             - Max Body: {} bytes",
            self.bind_address(),
            self.generation.model,
            self.generation.temperature,
            self.generation.max_tokens,
            enabled(self.llm.api_key.as_ref()),
            enabled(self.speech.api_key.as_ref()),
            self.speech.voice_id,
            self.image_base_url,
            self.plan_store_max_entries,
            self.http.cors_origins.join(","),
            self.http.client_timeout_secs,
            self.http.request_timeout_secs,
            self.http.max_body_bytes,
        )
    }
}

const fn enabled(key: Option<&String>) -> &'static str {
    if key.is_some() {
        "Enabled"
    } else {
        "Disabled (no API key)"
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Parse an environment variable, falling back to `default` when unset
fn env_parse<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid {key} value: {raw:?}")),
        Err(_) => Ok(default),
    }
}

/// Secrets count as unset when empty
fn env_secret(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Parse comma-separated CORS origins
fn parse_origins(origins_str: &str) -> Vec<String> {
    origins_str
        .split(',')
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins() {
        assert_eq!(parse_origins("*"), vec!["*"]);
        assert_eq!(
            parse_origins("http://a.test, http://b.test,,"),
            vec!["http://a.test", "http://b.test"]
        );
        assert!(parse_origins("").is_empty());
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(ServerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_summary_omits_secrets() {
        let mut config = ServerConfig::default();
        config.llm.api_key = Some("gsk_secret".to_owned());
        let summary = config.summary();
        assert!(!summary.contains("gsk_secret"));
        assert!(summary.contains("- Groq: Enabled"));
        assert!(summary.contains("- Murf: Disabled (no API key)"));
    }
}
