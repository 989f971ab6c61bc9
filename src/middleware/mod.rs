// ABOUTME: HTTP middleware for the coach API
// ABOUTME: Currently the CORS layer; timeouts and body limits are applied in the router
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// CORS configuration
pub mod cors;

pub use cors::setup_cors;
