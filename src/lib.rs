// ABOUTME: Main library entry point for the AI Fitness Coach back end
// ABOUTME: Plan generation via an LLM, section parsing, speech, images and plan storage
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # AI Fitness Coach
//!
//! A thin HTTP back end that asks a hosted LLM for a personalized fitness and
//! diet plan, splits the free-form answer into named sections and serves
//! supporting features around it.
//!
//! ## Architecture
//!
//! - **Plan**: profile to prompt, response to [`plan::PlanRecord`], text export
//! - **Oracles**: [`llm`], [`speech`] and [`images`] hide external services
//!   behind traits
//! - **Store**: keyed plan persistence with explicit errors
//! - **Routes/Server**: axum router over shared [`resources::ServerResources`]
//!
//! ## Example Usage
//!
//! ```rust
//! use ai_fitness_coach::plan::parse_plan;
//!
//! let plan = parse_plan("Workout Plan: squats\nDiet Plan: oats", Some("Asha"));
//! assert_eq!(plan.workout_plan, "squats");
//! assert_eq!(plan.diet_plan, "oats");
//! assert_eq!(plan.name, "Asha");
//! ```

/// Configuration management
pub mod config;

/// Application constants and defaults
pub mod constants;

/// Unified error handling
pub mod errors;

/// Image lookup oracle
pub mod images;

/// Text-generation oracle
pub mod llm;

/// Logging setup
pub mod logging;

/// HTTP middleware
pub mod middleware;

/// Plan model, parser, prompt, export and quotes
pub mod plan;

/// Shared server resources
pub mod resources;

/// HTTP routes
pub mod routes;

/// HTTP server assembly
pub mod server;

/// Speech-synthesis oracle
pub mod speech;

/// Plan persistence
pub mod store;
