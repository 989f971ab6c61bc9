// ABOUTME: Plan domain types shared by the parser, prompt builder, export and store
// ABOUTME: Defines PlanRecord, PlanSection and the UserProfile form payload
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Fitness Plans
//!
//! A plan starts as a [`UserProfile`], becomes an LLM prompt
//! ([`prompt::PlanPrompt`]), comes back as free text and is split into a
//! [`PlanRecord`] by [`parser::PlanSectionParser`]. Records can then be
//! exported as text ([`export`]) or persisted ([`crate::store`]).

/// Plain-text plan export
pub mod export;
/// Prompt construction from the user profile
pub mod prompt;
/// Section parser for generated plan text
pub mod parser;
/// Daily motivation quotes
pub mod quotes;

pub use parser::{parse_plan, PlanSectionParser};
pub use prompt::{PlanPrompt, UserProfile};

use serde::{Deserialize, Serialize};
use std::fmt;

/// A generated plan split into its sections
///
/// Missing sections are empty strings, never absent keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanRecord {
    /// Display name of the user the plan was generated for
    #[serde(default)]
    pub name: String,
    /// Workout section, or the whole response when no section was found
    #[serde(default)]
    pub workout_plan: String,
    /// Diet section
    #[serde(default)]
    pub diet_plan: String,
    /// Tips section
    #[serde(default)]
    pub tips: String,
    /// Motivation section
    #[serde(default)]
    pub motivation_quote: String,
}

impl PlanRecord {
    /// Borrow the text of one section
    #[must_use]
    pub fn section(&self, section: PlanSection) -> &str {
        match section {
            PlanSection::WorkoutPlan => &self.workout_plan,
            PlanSection::DietPlan => &self.diet_plan,
            PlanSection::Tips => &self.tips,
            PlanSection::MotivationQuote => &self.motivation_quote,
        }
    }
}

/// Named section of a [`PlanRecord`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanSection {
    /// Workout section
    #[default]
    WorkoutPlan,
    /// Diet section
    DietPlan,
    /// Tips section
    Tips,
    /// Motivation section
    MotivationQuote,
}

impl PlanSection {
    /// All sections in display order
    pub const ALL: [Self; 4] = [
        Self::WorkoutPlan,
        Self::DietPlan,
        Self::Tips,
        Self::MotivationQuote,
    ];

    /// Field name used in JSON
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::WorkoutPlan => "workout_plan",
            Self::DietPlan => "diet_plan",
            Self::Tips => "tips",
            Self::MotivationQuote => "motivation_quote",
        }
    }

    /// Parse from the JSON field name
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|section| section.as_str() == s)
    }
}

impl fmt::Display for PlanSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
