// ABOUTME: Daily motivation quote route
// ABOUTME: Serves one random quote from the fixed catalogue
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use axum::{routing::get, Json, Router};
use serde::{Deserialize, Serialize};

use crate::plan::quotes::random_quote;

/// Body of `GET /api/motivation`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MotivationResponse {
    /// The quote
    pub quote: String,
}

/// Motivation routes handler
pub struct MotivationRoutes;

impl MotivationRoutes {
    /// Create the motivation route
    pub fn routes() -> Router {
        Router::new().route("/api/motivation", get(Self::quote))
    }

    async fn quote() -> Json<MotivationResponse> {
        Json(MotivationResponse {
            quote: random_quote().to_owned(),
        })
    }
}
