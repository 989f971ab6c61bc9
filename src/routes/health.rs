// ABOUTME: Health check route handlers for service monitoring
// ABOUTME: Reports liveness plus oracle configuration and LLM reachability
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Health check routes for service monitoring

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use crate::constants::service_names;
use crate::resources::ServerResources;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health check routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/health", get(Self::health))
            .route("/ready", get(Self::ready))
            .with_state(resources)
    }

    async fn health() -> Json<serde_json::Value> {
        Json(serde_json::json!({
            "status": "healthy",
            "service": service_names::AI_FITNESS_COACH,
            "version": env!("CARGO_PKG_VERSION"),
            "timestamp": chrono::Utc::now().to_rfc3339()
        }))
    }

    /// Ready means the process can serve; missing oracles only disable their routes
    async fn ready(State(resources): State<Arc<ServerResources>>) -> Json<serde_json::Value> {
        let llm = match resources.llm.as_ref() {
            Some(provider) => {
                let healthy = match provider.health_check().await {
                    Ok(healthy) => healthy,
                    Err(e) => {
                        tracing::warn!(provider = provider.name(), error = %e, "LLM health check failed");
                        false
                    }
                };
                serde_json::json!({"provider": provider.name(), "healthy": healthy})
            }
            None => serde_json::Value::Null,
        };

        Json(serde_json::json!({
            "status": "ready",
            "oracles": {
                "llm": llm,
                "speech": resources.speech.as_ref().map(|s| s.name()),
            },
            "store": resources.store.backend_name(),
            "timestamp": chrono::Utc::now().to_rfc3339()
        }))
    }
}
