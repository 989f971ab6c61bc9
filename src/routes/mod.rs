// ABOUTME: Route module organization for the coach HTTP API
// ABOUTME: Groups handlers by domain and shares JSON body extraction helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! HTTP routes
//!
//! Each domain module exposes a `*Routes` type whose `routes` function returns
//! a ready-to-merge `Router`. Handlers stay thin and delegate to the plan,
//! oracle and store modules.

/// Health and readiness routes
pub mod health;
/// Image lookup routes
pub mod images;
/// Daily motivation route
pub mod motivation;
/// Plan generation, persistence and export routes
pub mod plans;
/// Text-to-speech routes
pub mod speech;

pub use health::HealthRoutes;
pub use images::ImageRoutes;
pub use motivation::MotivationRoutes;
pub use plans::PlanRoutes;
pub use speech::SpeechRoutes;

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Json;

use crate::errors::{AppError, AppResult};

/// Unwrap a JSON body, turning axum's rejection into the API error envelope
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| match rejection.status() {
            StatusCode::PAYLOAD_TOO_LARGE => AppError::payload_too_large(rejection.body_text()),
            _ => AppError::invalid_input(rejection.body_text()),
        })
}

/// A required string field that must be present and non-empty
pub(crate) fn required_text(value: Option<String>, field: &str) -> AppResult<String> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::missing_field(field))
}
