// ABOUTME: Image lookup route mapping a prompt to a stock image URL
// ABOUTME: Rejects requests without a prompt
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use serde::Deserialize;

use super::{json_body, required_text};
use crate::errors::AppResult;
use crate::images::ImageResult;
use crate::resources::ServerResources;

/// Body of `POST /api/image`
#[derive(Debug, Default, Deserialize)]
pub struct ImageRequest {
    /// What the image should show
    #[serde(default)]
    pub prompt: Option<String>,
}

/// Image routes handler
pub struct ImageRoutes;

impl ImageRoutes {
    /// Create the image route
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/image", post(Self::lookup))
            .with_state(resources)
    }

    async fn lookup(
        State(resources): State<Arc<ServerResources>>,
        payload: Result<Json<ImageRequest>, JsonRejection>,
    ) -> AppResult<Json<ImageResult>> {
        let prompt = required_text(json_body(payload)?.prompt, "prompt")?;
        resources.images.lookup(&prompt).await.map(Json)
    }
}
