// ABOUTME: HTTP server assembly and lifecycle for the coach API
// ABOUTME: Merges domain routers, applies tracing/CORS/timeout/body-limit layers and serves
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! HTTP server

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{extract::DefaultBodyLimit, Router};
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, warn};

use crate::middleware::setup_cors;
use crate::resources::ServerResources;
use crate::routes::{HealthRoutes, ImageRoutes, MotivationRoutes, PlanRoutes, SpeechRoutes};

/// Build the full application router
pub fn router(resources: Arc<ServerResources>) -> Router {
    let config = Arc::clone(&resources.config);

    Router::new()
        .merge(HealthRoutes::routes(Arc::clone(&resources)))
        .merge(PlanRoutes::routes(Arc::clone(&resources)))
        .merge(SpeechRoutes::routes(Arc::clone(&resources)))
        .merge(ImageRoutes::routes(resources))
        .merge(MotivationRoutes::routes())
        // Enforced by the body extractors so oversized bodies get the JSON error envelope
        .layer(DefaultBodyLimit::max(config.http.max_body_bytes))
        .layer(TimeoutLayer::new(config.http.request_timeout()))
        .layer(setup_cors(&config))
        .layer(TraceLayer::new_for_http())
}

/// Bind the configured address and serve until Ctrl-C
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails
pub async fn run(resources: Arc<ServerResources>) -> Result<()> {
    let address = resources.config.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;

    info!("HTTP server listening on http://{}", address);

    axum::serve(listener, router(resources))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => warn!("Failed to listen for shutdown signal: {}", e),
    }
}
