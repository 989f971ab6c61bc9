// ABOUTME: In-memory plan store bounded by LRU eviction
// ABOUTME: Plans are kept as serialized JSON so every read returns an independent copy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use tokio::sync::RwLock;
use tracing::debug;

use super::{validate_key, PlanStore};
use crate::constants::limits::DEFAULT_PLAN_STORE_MAX_ENTRIES;
use crate::errors::{AppError, AppResult};
use crate::plan::PlanRecord;

/// Process-local plan store
///
/// Cloning shares the underlying map. Once `capacity` plans are stored the
/// least recently used one is evicted.
#[derive(Clone)]
pub struct InMemoryPlanStore {
    plans: Arc<RwLock<LruCache<String, Vec<u8>>>>,
}

impl InMemoryPlanStore {
    const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(DEFAULT_PLAN_STORE_MAX_ENTRIES)
    {
        Some(n) => n,
        None => unreachable!(),
    };

    /// Create a store holding at most `capacity` plans (zero selects the default)
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(Self::DEFAULT_CAPACITY);
        Self {
            plans: Arc::new(RwLock::new(LruCache::new(capacity))),
        }
    }

    /// Number of stored plans
    pub async fn len(&self) -> usize {
        self.plans.read().await.len()
    }

    /// Whether the store is empty
    pub async fn is_empty(&self) -> bool {
        self.plans.read().await.is_empty()
    }
}

impl Default for InMemoryPlanStore {
    fn default() -> Self {
        Self::new(DEFAULT_PLAN_STORE_MAX_ENTRIES)
    }
}

#[async_trait::async_trait]
impl PlanStore for InMemoryPlanStore {
    async fn get(&self, key: &str) -> AppResult<Option<PlanRecord>> {
        validate_key(key)?;

        // LruCache::get updates recency, so it needs the write lock
        let mut plans = self.plans.write().await;
        let Some(data) = plans.get(key) else {
            return Ok(None);
        };
        let plan = serde_json::from_slice(data).map_err(|e| {
            AppError::storage(format!("Stored plan {key:?} is corrupt: {e}")).with_source(e)
        })?;
        drop(plans);

        Ok(Some(plan))
    }

    async fn set(&self, key: &str, plan: &PlanRecord) -> AppResult<()> {
        validate_key(key)?;
        let serialized = serde_json::to_vec(plan)?;

        if let Some((evicted, _)) = self.plans.write().await.push(key.to_owned(), serialized) {
            if evicted != key {
                debug!(key = %evicted, "Evicted least recently used plan");
            }
        }
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<bool> {
        validate_key(key)?;
        Ok(self.plans.write().await.pop(key).is_some())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
