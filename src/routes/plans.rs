// ABOUTME: Plan route handlers: generation through the LLM, keyed persistence and text export
// ABOUTME: Generation returns the parsed PlanRecord plus the echoed form payload
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Plan routes
//!
//! - `POST /api/generate` turns a [`UserProfile`] into a parsed plan
//! - `GET|PUT|DELETE /api/plans/:key` manage saved plans
//! - `GET /api/plans/:key/export` downloads a saved plan as text

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::json_body;
use crate::constants::plan::EXPORT_FILENAME;
use crate::errors::{AppError, AppResult};
use crate::plan::{export::render_text, PlanPrompt, PlanRecord, UserProfile};
use crate::resources::ServerResources;
use crate::store::validate_key;

/// Response of `POST /api/generate`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedPlan {
    /// Parsed plan sections
    #[serde(flatten)]
    pub plan: PlanRecord,
    /// The form payload exactly as received
    #[serde(rename = "_user")]
    pub user: serde_json::Value,
}

/// Plan routes handler
pub struct PlanRoutes;

impl PlanRoutes {
    /// Create all plan routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/generate", post(Self::generate))
            .route(
                "/api/plans/:key",
                get(Self::get_plan).put(Self::save_plan).delete(Self::delete_plan),
            )
            .route("/api/plans/:key/export", get(Self::export_plan))
            .with_state(resources)
    }

    #[instrument(skip_all)]
    async fn generate(
        State(resources): State<Arc<ServerResources>>,
        payload: Result<Json<serde_json::Value>, JsonRejection>,
    ) -> AppResult<Json<GeneratedPlan>> {
        let provider = resources.llm()?;

        // A literal `null` body is treated as an empty form
        let body = match json_body(payload)? {
            serde_json::Value::Null => serde_json::Value::Object(serde_json::Map::new()),
            body => body,
        };
        let profile: UserProfile = serde_json::from_value(body.clone())
            .map_err(|e| AppError::invalid_input(format!("Invalid profile: {e}")))?;

        let request = PlanPrompt::from_profile(&profile, &resources.config.generation);
        let response = provider.complete(&request).await?;
        if response.content.is_empty() {
            return Err(AppError::external_service(
                provider.display_name(),
                "Empty response",
            ));
        }

        let plan = resources
            .parser
            .parse(&response.content, profile.display_name());

        info!(
            model = %response.model,
            chars = response.content.len(),
            has_diet = !plan.diet_plan.is_empty(),
            "Generated plan"
        );

        Ok(Json(GeneratedPlan { plan, user: body }))
    }

    async fn get_plan(
        State(resources): State<Arc<ServerResources>>,
        Path(key): Path<String>,
    ) -> AppResult<Json<PlanRecord>> {
        Self::load(&resources, &key).await.map(Json)
    }

    async fn save_plan(
        State(resources): State<Arc<ServerResources>>,
        Path(key): Path<String>,
        payload: Result<Json<PlanRecord>, JsonRejection>,
    ) -> AppResult<Json<PlanRecord>> {
        validate_key(&key)?;
        let plan = json_body(payload)?;
        resources.store.set(&key, &plan).await?;
        info!(key = %key, "Saved plan");
        Ok(Json(plan))
    }

    async fn delete_plan(
        State(resources): State<Arc<ServerResources>>,
        Path(key): Path<String>,
    ) -> AppResult<StatusCode> {
        if resources.store.delete(&key).await? {
            info!(key = %key, "Deleted plan");
            Ok(StatusCode::NO_CONTENT)
        } else {
            Err(AppError::not_found(format!("Plan {key:?}")))
        }
    }

    async fn export_plan(
        State(resources): State<Arc<ServerResources>>,
        Path(key): Path<String>,
    ) -> AppResult<Response> {
        let plan = Self::load(&resources, &key).await?;
        let disposition = format!("attachment; filename=\"{EXPORT_FILENAME}\"");

        Ok((
            [
                (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_owned()),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            render_text(&plan),
        )
            .into_response())
    }

    async fn load(resources: &ServerResources, key: &str) -> AppResult<PlanRecord> {
        resources
            .store
            .get(key)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Plan {key:?}")))
    }
}
