// ABOUTME: HTTP-level tests for the coach API routes using in-process fake oracles
// ABOUTME: Covers generation, TTS, images, motivation, plan storage/export and error envelopes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use std::sync::Arc;

use ai_fitness_coach::{
    config::ServerConfig,
    errors::AppError,
    llm::MessageRole,
    plan::{quotes::QUOTES, PlanRecord},
    resources::ServerResources,
    server,
};
use axum::{http::StatusCode, Router};
use helpers::{
    axum_test::AxumTestRequest,
    fakes::{bare_resources, FakeLlm, FakeSpeech},
};
use serde_json::json;

const LLM_TEXT: &str = "Workout Plan: squats\nDiet Plan: oats\nTips: hydrate\nMotivation: keep going";

fn app(resources: Arc<ServerResources>) -> Router {
    server::router(resources)
}

fn app_with_llm(llm: Arc<FakeLlm>) -> Router {
    app(Arc::new(
        ServerResources::builder(ServerConfig::default())
            .with_llm(llm)
            .build(),
    ))
}

fn sample_plan() -> PlanRecord {
    PlanRecord {
        name: "Asha".to_owned(),
        workout_plan: "squats".to_owned(),
        diet_plan: "oats".to_owned(),
        tips: "hydrate".to_owned(),
        motivation_quote: "keep going".to_owned(),
    }
}

// ============================================================================
// Health & motivation
// ============================================================================

#[tokio::test]
async fn test_health_and_ready() {
    let body: serde_json::Value = AxumTestRequest::get("/health")
        .send(app(bare_resources()))
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "ai-fitness-coach");

    let body: serde_json::Value = AxumTestRequest::get("/ready")
        .send(app(bare_resources()))
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(body["status"], "ready");
    assert!(body["oracles"]["llm"].is_null());
    assert_eq!(body["store"], "memory");
}

#[tokio::test]
async fn test_ready_reports_llm_health() {
    let body: serde_json::Value = AxumTestRequest::get("/ready")
        .send(app_with_llm(FakeLlm::replying(LLM_TEXT)))
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(body["oracles"]["llm"], json!({"provider": "fake", "healthy": true}));
}

#[tokio::test]
async fn test_motivation_quote() {
    let body: serde_json::Value = AxumTestRequest::get("/api/motivation")
        .send(app(bare_resources()))
        .await
        .assert_status(StatusCode::OK)
        .json();
    let quote = body["quote"].as_str().unwrap();
    assert!(QUOTES.contains(&quote));
}

// ============================================================================
// Plan generation
// ============================================================================

#[tokio::test]
async fn test_generate_without_llm_key() {
    AxumTestRequest::post("/api/generate")
        .json(&json!({"name": "Asha"}))
        .send(app(bare_resources()))
        .await
        .assert_error(StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_MISSING");
}

#[tokio::test]
async fn test_generate_parses_and_echoes_profile() {
    let llm = FakeLlm::replying(LLM_TEXT);
    let profile = json!({"name": "Asha", "age": 29, "goal": "Muscle Gain", "extra": true});

    let body: serde_json::Value = AxumTestRequest::post("/api/generate")
        .json(&profile)
        .send(app_with_llm(Arc::clone(&llm)))
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(body["name"], "Asha");
    assert_eq!(body["workout_plan"], "squats");
    assert_eq!(body["diet_plan"], "oats");
    assert_eq!(body["tips"], "hydrate");
    assert_eq!(body["motivation_quote"], "keep going");
    assert_eq!(body["_user"], profile);

    let requests = llm.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.model.as_deref(), Some("llama-3.3-70b-versatile"));
    assert_eq!(request.temperature, Some(0.7));
    assert_eq!(request.max_tokens, Some(2048));
    assert_eq!(request.messages[0].role, MessageRole::System);
    assert_eq!(
        request.messages[0].content,
        "You are a professional fitness coach."
    );
    assert!(request.messages[1].content.contains("- Age: 29\n"));
    assert!(request.messages[1].content.contains("- Fitness Goal: Muscle Gain\n"));
    assert!(request.messages[1].content.contains("- Fitness Level: Beginner\n"));
}

#[tokio::test]
async fn test_generate_unsectioned_reply_falls_back() {
    let llm = FakeLlm::replying("Walk every day and eat vegetables.");
    let body: serde_json::Value = AxumTestRequest::post("/api/generate")
        .json(&json!({}))
        .send(app_with_llm(llm))
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(body["name"], "User");
    assert_eq!(body["workout_plan"], "Walk every day and eat vegetables.");
    assert_eq!(body["diet_plan"], "");
}

#[tokio::test]
async fn test_generate_empty_reply_is_bad_gateway() {
    let message = AxumTestRequest::post("/api/generate")
        .json(&json!({"name": "Asha"}))
        .send(app_with_llm(FakeLlm::replying("")))
        .await
        .assert_error(StatusCode::BAD_GATEWAY, "EXTERNAL_SERVICE_ERROR");
    assert_eq!(message, "Fake LLM: Empty response");
}

#[tokio::test]
async fn test_generate_null_body_uses_defaults() {
    let body: serde_json::Value = AxumTestRequest::post("/api/generate")
        .raw_body("application/json", "null")
        .send(app_with_llm(FakeLlm::replying(LLM_TEXT)))
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(body["name"], "User");
    assert_eq!(body["_user"], json!({}));
}

#[tokio::test]
async fn test_generate_upstream_failure() {
    let llm = FakeLlm::failing(|| AppError::external_service("Groq", "API error (500)"));
    let message = AxumTestRequest::post("/api/generate")
        .json(&json!({"name": "Asha"}))
        .send(app_with_llm(llm))
        .await
        .assert_error(StatusCode::BAD_GATEWAY, "EXTERNAL_SERVICE_ERROR");
    assert!(message.contains("Groq"));
}

#[tokio::test]
async fn test_generate_rate_limited_upstream() {
    let llm = FakeLlm::failing(|| AppError::external_rate_limited("Groq", "slow down"));
    AxumTestRequest::post("/api/generate")
        .json(&json!({}))
        .send(app_with_llm(llm))
        .await
        .assert_error(StatusCode::SERVICE_UNAVAILABLE, "EXTERNAL_RATE_LIMITED");
}

#[tokio::test]
async fn test_generate_rejects_malformed_body() {
    AxumTestRequest::post("/api/generate")
        .raw_body("application/json", "{not json")
        .send(app_with_llm(FakeLlm::replying(LLM_TEXT)))
        .await
        .assert_error(StatusCode::BAD_REQUEST, "INVALID_INPUT");

    AxumTestRequest::post("/api/generate")
        .json(&json!({"age": {"years": 30}}))
        .send(app_with_llm(FakeLlm::replying(LLM_TEXT)))
        .await
        .assert_error(StatusCode::BAD_REQUEST, "INVALID_INPUT");
}

#[tokio::test]
async fn test_generate_wrong_method() {
    let response = AxumTestRequest::get("/api/generate")
        .send(app(bare_resources()))
        .await;
    assert_eq!(response.status(), 405);
}

// ============================================================================
// Text to speech
// ============================================================================

#[tokio::test]
async fn test_tts_missing_text_checked_before_key() {
    let message = AxumTestRequest::post("/api/tts")
        .json(&json!({}))
        .send(app(bare_resources()))
        .await
        .assert_error(StatusCode::BAD_REQUEST, "MISSING_REQUIRED_FIELD");
    assert_eq!(message, "Missing text");

    AxumTestRequest::post("/api/tts")
        .json(&json!({"text": ""}))
        .send(app(bare_resources()))
        .await
        .assert_error(StatusCode::BAD_REQUEST, "MISSING_REQUIRED_FIELD");
}

#[tokio::test]
async fn test_tts_without_key() {
    AxumTestRequest::post("/api/tts")
        .json(&json!({"text": "Day 1: squats"}))
        .send(app(bare_resources()))
        .await
        .assert_error(StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_MISSING");
}

#[tokio::test]
async fn test_tts_returns_audio() {
    let speech = FakeSpeech::new();
    let resources = ServerResources::builder(ServerConfig::default())
        .with_speech(Arc::clone(&speech) as _)
        .build();

    let response = AxumTestRequest::post("/api/tts")
        .json(&json!({"text": "Day 1: squats"}))
        .send(app(Arc::new(resources)))
        .await
        .assert_status(StatusCode::OK);

    assert_eq!(response.header("content-type"), Some("audio/mpeg"));
    assert_eq!(response.bytes(), b"ID3-fake-mp3");
    assert_eq!(*speech.texts.lock().unwrap(), vec!["Day 1: squats"]);
}

#[tokio::test]
async fn test_plan_section_tts() {
    let speech = FakeSpeech::new();
    let resources = Arc::new(
        ServerResources::builder(ServerConfig::default())
            .with_speech(Arc::clone(&speech) as _)
            .build(),
    );
    let mut plan = sample_plan();
    plan.tips = String::new();
    AxumTestRequest::put("/api/plans/mine")
        .json(&plan)
        .send(app(Arc::clone(&resources)))
        .await
        .assert_status(StatusCode::OK);

    let response = AxumTestRequest::post("/api/plans/mine/tts")
        .json(&json!({"section": "diet_plan"}))
        .send(app(Arc::clone(&resources)))
        .await
        .assert_status(StatusCode::OK);
    assert_eq!(response.header("content-type"), Some("audio/mpeg"));

    AxumTestRequest::post("/api/plans/mine/tts")
        .json(&json!({}))
        .send(app(Arc::clone(&resources)))
        .await
        .assert_status(StatusCode::OK);
    assert_eq!(*speech.texts.lock().unwrap(), vec!["oats", "squats"]);

    let message = AxumTestRequest::post("/api/plans/mine/tts")
        .json(&json!({"section": "tips"}))
        .send(app(Arc::clone(&resources)))
        .await
        .assert_error(StatusCode::BAD_REQUEST, "INVALID_INPUT");
    assert_eq!(message, "No content available for tips");

    AxumTestRequest::post("/api/plans/mine/tts")
        .json(&json!({"section": "warmup"}))
        .send(app(Arc::clone(&resources)))
        .await
        .assert_error(StatusCode::BAD_REQUEST, "INVALID_INPUT");

    AxumTestRequest::post("/api/plans/other/tts")
        .json(&json!({"section": "diet_plan"}))
        .send(app(resources))
        .await
        .assert_error(StatusCode::NOT_FOUND, "RESOURCE_NOT_FOUND");
    assert_eq!(speech.texts.lock().unwrap().len(), 2);
}

// ============================================================================
// Images
// ============================================================================

#[tokio::test]
async fn test_image_lookup() {
    let body: serde_json::Value = AxumTestRequest::post("/api/image")
        .json(&json!({"prompt": "protein breakfast"}))
        .send(app(bare_resources()))
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(
        body["url"],
        "https://source.unsplash.com/800x600/?protein%20breakfast,fitness,food,healthy"
    );
}

#[tokio::test]
async fn test_image_missing_prompt() {
    let message = AxumTestRequest::post("/api/image")
        .json(&json!({"prompt": null}))
        .send(app(bare_resources()))
        .await
        .assert_error(StatusCode::BAD_REQUEST, "MISSING_REQUIRED_FIELD");
    assert_eq!(message, "Missing prompt");
}

// ============================================================================
// Plan storage & export
// ============================================================================

#[tokio::test]
async fn test_plan_lifecycle() {
    let resources = bare_resources();
    let plan = sample_plan();

    let saved: PlanRecord = AxumTestRequest::put("/api/plans/ai_fitness_plan")
        .json(&plan)
        .send(app(Arc::clone(&resources)))
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(saved, plan);

    let fetched: PlanRecord = AxumTestRequest::get("/api/plans/ai_fitness_plan")
        .send(app(Arc::clone(&resources)))
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(fetched, plan);

    let response = AxumTestRequest::delete("/api/plans/ai_fitness_plan")
        .send(app(Arc::clone(&resources)))
        .await;
    assert_eq!(response.status(), 204);

    AxumTestRequest::get("/api/plans/ai_fitness_plan")
        .send(app(Arc::clone(&resources)))
        .await
        .assert_error(StatusCode::NOT_FOUND, "RESOURCE_NOT_FOUND");

    AxumTestRequest::delete("/api/plans/ai_fitness_plan")
        .send(app(resources))
        .await
        .assert_error(StatusCode::NOT_FOUND, "RESOURCE_NOT_FOUND");
}

#[tokio::test]
async fn test_plan_key_validation() {
    AxumTestRequest::get("/api/plans/bad.key")
        .send(app(bare_resources()))
        .await
        .assert_error(StatusCode::BAD_REQUEST, "INVALID_INPUT");

    let long_key = "k".repeat(129);
    AxumTestRequest::put(&format!("/api/plans/{long_key}"))
        .json(&sample_plan())
        .send(app(bare_resources()))
        .await
        .assert_error(StatusCode::BAD_REQUEST, "INVALID_INPUT");
}

#[tokio::test]
async fn test_partial_plan_body_fills_empty_sections() {
    let saved: PlanRecord = AxumTestRequest::put("/api/plans/mine")
        .json(&json!({"name": "Kai", "workout_plan": "rows"}))
        .send(app(bare_resources()))
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(saved.workout_plan, "rows");
    assert_eq!(saved.diet_plan, "");
}

#[tokio::test]
async fn test_plan_export() {
    let resources = bare_resources();
    resources.store.set("mine", &sample_plan()).await.unwrap();

    let response = AxumTestRequest::get("/api/plans/mine/export")
        .send(app(resources))
        .await
        .assert_status(StatusCode::OK);

    assert_eq!(
        response.header("content-type"),
        Some("text/plain; charset=utf-8")
    );
    assert_eq!(
        response.header("content-disposition"),
        Some("attachment; filename=\"fitness-plan.txt\"")
    );
    let text = response.text();
    assert!(text.starts_with("AI Fitness Plan\n"));
    assert!(text.contains("Plan for: Asha\n"));
    assert!(text.contains("Tips & Recommendations\n"));
}

#[tokio::test]
async fn test_export_missing_plan() {
    AxumTestRequest::get("/api/plans/nothing/export")
        .send(app(bare_resources()))
        .await
        .assert_error(StatusCode::NOT_FOUND, "RESOURCE_NOT_FOUND");
}

// ============================================================================
// Middleware
// ============================================================================

#[tokio::test]
async fn test_body_limit() {
    let mut config = ServerConfig::default();
    config.http.max_body_bytes = 64;
    let resources = Arc::new(ServerResources::builder(config).build());

    let body = json!({"prompt": "x".repeat(500)});
    let length = serde_json::to_string(&body).unwrap().len().to_string();
    AxumTestRequest::post("/api/image")
        .json(&body)
        .header("content-length", &length)
        .send(app(Arc::clone(&resources)))
        .await
        .assert_error(StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE");

    AxumTestRequest::post("/api/tts")
        .json(&json!({"text": "y".repeat(500)}))
        .send(app(resources))
        .await
        .assert_error(StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE");
}

#[tokio::test]
async fn test_cors_preflight() {
    let response = AxumTestRequest::options("/api/generate")
        .header("origin", "http://localhost:3000")
        .header("access-control-request-method", "POST")
        .send(app(bare_resources()))
        .await;
    assert_eq!(response.status(), 200);
    assert_eq!(response.header("access-control-allow-origin"), Some("*"));
}
