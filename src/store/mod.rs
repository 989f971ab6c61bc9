// ABOUTME: Key-value persistence for generated plans with explicit error returns
// ABOUTME: Defines the PlanStore contract and storage-key validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Plan Store
//!
//! A user keeps one saved plan per key. The web client historically used the
//! key `ai_fitness_plan` ([`DEFAULT_STORAGE_KEY`]); any key matching
//! `[A-Za-z0-9_-]{1,128}` is accepted.
//!
//! ```rust,no_run
//! use ai_fitness_coach::plan::PlanRecord;
//! use ai_fitness_coach::store::{memory::InMemoryPlanStore, PlanStore};
//! # async fn example() -> ai_fitness_coach::errors::AppResult<()> {
//! let store = InMemoryPlanStore::new(100);
//! store.set("ai_fitness_plan", &PlanRecord::default()).await?;
//! let saved = store.get("ai_fitness_plan").await?;
//! assert!(saved.is_some());
//! # Ok(())
//! # }
//! ```

/// In-memory LRU store
pub mod memory;

pub use memory::InMemoryPlanStore;

pub use crate::constants::plan::DEFAULT_STORAGE_KEY;
use crate::constants::plan::MAX_STORAGE_KEY_LEN;
use crate::errors::{AppError, AppResult};
use crate::plan::PlanRecord;

/// Plan persistence backend
#[async_trait::async_trait]
pub trait PlanStore: Send + Sync {
    /// Fetch the plan saved under `key`
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or the backend fails
    async fn get(&self, key: &str) -> AppResult<Option<PlanRecord>>;

    /// Save `plan` under `key`, replacing any previous plan
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or the backend fails
    async fn set(&self, key: &str, plan: &PlanRecord) -> AppResult<()>;

    /// Remove the plan saved under `key`, returning whether one existed
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or the backend fails
    async fn delete(&self, key: &str) -> AppResult<bool>;

    /// Backend name for health output
    fn backend_name(&self) -> &'static str;
}

/// Check that `key` is 1-128 characters from `[A-Za-z0-9_-]`
///
/// # Errors
///
/// Returns `InvalidInput` describing the first violated rule
pub fn validate_key(key: &str) -> AppResult<()> {
    if key.is_empty() {
        return Err(AppError::invalid_input("Plan key must not be empty"));
    }
    if key.len() > MAX_STORAGE_KEY_LEN {
        return Err(AppError::invalid_input(format!(
            "Plan key must be at most {MAX_STORAGE_KEY_LEN} characters"
        )));
    }
    if let Some(bad) = key
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-'))
    {
        return Err(AppError::invalid_input(format!(
            "Plan key contains invalid character {bad:?}"
        ))
        .with_details(serde_json::json!({ "allowed": "A-Z a-z 0-9 _ -" })));
    }
    Ok(())
}
