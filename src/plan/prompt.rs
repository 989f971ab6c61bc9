// ABOUTME: Builds the plan-generation chat request from the user's form profile
// ABOUTME: Applies per-field defaults and asks the LLM for the four titled plan sections
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::Write;

use serde::{Deserialize, Deserializer, Serialize};

use crate::config::environment::PlanGenerationConfig;
use crate::llm::{ChatMessage, ChatRequest};

/// System instruction sent with every plan request
pub const COACH_SYSTEM_PROMPT: &str = "You are a professional fitness coach.";

/// Form payload describing the user
///
/// Every field is optional. Numeric inputs may arrive as JSON numbers or
/// strings and are kept as text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Display name
    #[serde(default, deserialize_with = "text_field")]
    pub name: Option<String>,
    /// Age in years
    #[serde(default, deserialize_with = "text_field")]
    pub age: Option<String>,
    /// Gender
    #[serde(default, deserialize_with = "text_field")]
    pub gender: Option<String>,
    /// Height in cm
    #[serde(default, deserialize_with = "text_field")]
    pub height: Option<String>,
    /// Weight in kg
    #[serde(default, deserialize_with = "text_field")]
    pub weight: Option<String>,
    /// Fitness goal (weight loss, muscle gain, ...)
    #[serde(default, deserialize_with = "text_field")]
    pub goal: Option<String>,
    /// Fitness level
    #[serde(default, deserialize_with = "text_field")]
    pub level: Option<String>,
    /// Workout location (home, gym, outdoor)
    #[serde(default, deserialize_with = "text_field")]
    pub location: Option<String>,
    /// Dietary preference
    #[serde(default, deserialize_with = "text_field")]
    pub diet: Option<String>,
    /// Medical history or notes
    #[serde(default, deserialize_with = "text_field")]
    pub medical: Option<String>,
}

/// Accept strings, numbers, booleans or null for a free-text form field
fn text_field<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other @ (serde_json::Value::Number(_) | serde_json::Value::Bool(_))) => {
            Some(other.to_string())
        }
        Some(_) => {
            return Err(serde::de::Error::custom(
                "expected a string or number form field",
            ))
        }
    })
}

/// A field's value, or `default` when it is missing or empty
fn or_default<'a>(value: Option<&'a String>, default: &'a str) -> &'a str {
    value.map(String::as_str).filter(|v| !v.is_empty()).unwrap_or(default)
}

impl UserProfile {
    /// Name as supplied, for the plan record
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Render the user section of the prompt
    #[must_use]
    pub fn describe(&self) -> String {
        const NOT_SPECIFIED: &str = "Not specified";

        let mut out = String::new();
        let _ = writeln!(out, "- Name: {}", or_default(self.name.as_ref(), "User"));
        let _ = writeln!(out, "- Age: {}", or_default(self.age.as_ref(), NOT_SPECIFIED));
        let _ = writeln!(
            out,
            "- Gender: {}",
            or_default(self.gender.as_ref(), NOT_SPECIFIED)
        );
        let _ = writeln!(
            out,
            "- Height: {} cm",
            or_default(self.height.as_ref(), NOT_SPECIFIED)
        );
        let _ = writeln!(
            out,
            "- Weight: {} kg",
            or_default(self.weight.as_ref(), NOT_SPECIFIED)
        );
        let _ = writeln!(
            out,
            "- Fitness Goal: {}",
            or_default(self.goal.as_ref(), "General Fitness")
        );
        let _ = writeln!(
            out,
            "- Fitness Level: {}",
            or_default(self.level.as_ref(), "Beginner")
        );
        let _ = writeln!(
            out,
            "- Workout Location: {}",
            or_default(self.location.as_ref(), "Home")
        );
        let _ = writeln!(
            out,
            "- Diet Preference: {}",
            or_default(self.diet.as_ref(), "Balanced")
        );
        // The notes line is always present, blank when there are no notes
        if let Some(medical) = self.medical.as_deref().filter(|m| !m.is_empty()) {
            let _ = write!(out, "- Medical Notes: {medical}");
        }
        out.push('\n');
        out
    }
}

/// Builder for the plan-generation chat request
pub struct PlanPrompt;

impl PlanPrompt {
    /// Render the user message for `profile`
    #[must_use]
    pub fn user_message(profile: &UserProfile) -> String {
        format!(
            "You are a professional fitness coach. Generate a personalized fitness plan.\n\
             \n\
             User Details:\n\
             {details}\n\
             Generate a detailed response with:\n\
             1. A 7-day workout plan with specific exercises, sets, reps, and rest times\n\
             2. A complete diet plan with meals for breakfast, lunch, dinner, and snacks\n\
             3. Helpful tips for achieving their fitness goals\n\
             4. A motivational quote\n\
             \n\
             Format your response clearly with sections for Workout Plan, Diet Plan, Tips, and Motivation.",
            details = profile.describe()
        )
    }

    /// Build the full chat request using the configured generation settings
    #[must_use]
    pub fn from_profile(profile: &UserProfile, generation: &PlanGenerationConfig) -> ChatRequest {
        ChatRequest::new(vec![
            ChatMessage::system(COACH_SYSTEM_PROMPT),
            ChatMessage::user(Self::user_message(profile)),
        ])
        .with_model(generation.model.clone())
        .with_temperature(generation.temperature)
        .with_max_tokens(generation.max_tokens)
    }
}
