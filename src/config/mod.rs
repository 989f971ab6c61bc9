// ABOUTME: Configuration module for server settings and oracle credentials
// ABOUTME: Re-exports the environment-driven ServerConfig
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Environment and server configuration
pub mod environment;

pub use environment::{
    HttpConfig, LlmApiConfig, PlanGenerationConfig, ServerConfig, SpeechApiConfig,
};
