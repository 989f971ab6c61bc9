// ABOUTME: Section parser turning free-form LLM plan text into a structured PlanRecord
// ABOUTME: Case-insensitive marker search with capture-until-next-marker and a whole-text fallback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Plan section parser
//!
//! The LLM is asked to title its sections "Workout Plan", "Diet Plan", "Tips"
//! and "Motivation", but nothing forces it to. Parsing is therefore best
//! effort and total: every input produces a [`PlanRecord`].
//!
//! Each section is located independently:
//!
//! | field | start marker | ends before |
//! |---|---|---|
//! | `workout_plan` | `workout plan` | `diet plan` |
//! | `diet_plan` | `diet plan` | `tips` or `motivation` |
//! | `tips` | `tips` | `motivation` |
//! | `motivation_quote` | `motivation` | end of text |
//!
//! Markers match ASCII case-insensitively, anywhere in the text (including
//! inside longer words such as "motivational"). The first occurrence of a
//! start marker wins. Colons and whitespace directly after a start marker are
//! skipped and the captured slice is trimmed.
//!
//! When neither a workout nor a diet section is found, `workout_plan` receives
//! the whole untrimmed input so the user still sees the generated text.

use std::sync::OnceLock;

use regex::Regex;

use super::PlanRecord;
use crate::constants::plan::DEFAULT_USER_NAME;

/// One section rule: where it starts and what ends it
struct SectionRule {
    start: Option<Regex>,
    end: Option<Regex>,
}

impl SectionRule {
    /// `marker` and `terminators` are plain lowercase words joined into one
    /// ASCII case-insensitive alternation.
    fn new(marker: &str, terminators: &[&str]) -> Self {
        let start = format!(r"(?i-u:{})[:\s]*", regex::escape(marker));
        let end = (!terminators.is_empty()).then(|| {
            let alternation = terminators
                .iter()
                .map(|t| regex::escape(t))
                .collect::<Vec<_>>()
                .join("|");
            format!("(?i-u:{alternation})")
        });

        Self {
            start: compile(&start),
            end: end.as_deref().and_then(compile),
        }
    }

    /// Extract this section from `text`, or `None` when the start marker is absent
    fn capture<'a>(&self, text: &'a str) -> Option<&'a str> {
        let body_start = self.start.as_ref()?.find(text)?.end();
        let rest = &text[body_start..];

        let body_len = self
            .end
            .as_ref()
            .and_then(|end| end.find(rest))
            .map_or(rest.len(), |m| m.start());

        Some(rest[..body_len].trim())
    }
}

/// Patterns are built from escaped literals; a rule whose pattern fails to
/// compile simply never matches.
fn compile(pattern: &str) -> Option<Regex> {
    Regex::new(pattern)
        .map_err(|e| tracing::error!("Invalid section pattern {pattern:?}: {e}"))
        .ok()
}

/// The four section rules, compiled once per process
struct SectionRules {
    workout: SectionRule,
    diet: SectionRule,
    tips: SectionRule,
    motivation: SectionRule,
}

fn rules() -> &'static SectionRules {
    static RULES: OnceLock<SectionRules> = OnceLock::new();
    RULES.get_or_init(|| SectionRules {
        workout: SectionRule::new("workout plan", &["diet plan"]),
        diet: SectionRule::new("diet plan", &["tips", "motivation"]),
        tips: SectionRule::new("tips", &["motivation"]),
        motivation: SectionRule::new("motivation", &[]),
    })
}

/// Splits raw plan text into the sections of a [`PlanRecord`]
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanSectionParser;

impl PlanSectionParser {
    /// Create a parser
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Parse `raw_text` into a plan record for `user_name`
    ///
    /// Never fails. Missing sections become empty strings, and an absent or
    /// empty `user_name` becomes `"User"`.
    #[must_use]
    pub fn parse(&self, raw_text: &str, user_name: Option<&str>) -> PlanRecord {
        parse_plan(raw_text, user_name)
    }
}

/// Free-function form of [`PlanSectionParser::parse`]
#[must_use]
pub fn parse_plan(raw_text: &str, user_name: Option<&str>) -> PlanRecord {
    let rules = rules();
    let section = |rule: &SectionRule| rule.capture(raw_text).unwrap_or_default().to_owned();

    let mut record = PlanRecord {
        name: display_name(user_name),
        workout_plan: section(&rules.workout),
        diet_plan: section(&rules.diet),
        tips: section(&rules.tips),
        motivation_quote: section(&rules.motivation),
    };

    if record.workout_plan.is_empty() && record.diet_plan.is_empty() {
        raw_text.clone_into(&mut record.workout_plan);
    }

    record
}

/// Resolve the display name, falling back to the placeholder when empty
#[must_use]
pub fn display_name(user_name: Option<&str>) -> String {
    user_name
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_USER_NAME)
        .to_owned()
}
