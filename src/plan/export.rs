// ABOUTME: Plain-text rendering of a PlanRecord for download
// ABOUTME: Mirrors the printable plan layout: title, owner, workout, diet and optional tips
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::Write;

use super::{parser::display_name, PlanRecord};

/// Document title
const TITLE: &str = "AI Fitness Plan";
/// Placeholder for an empty workout or diet section
const EMPTY_SECTION: &str = "N/A";

/// Render `plan` as a plain-text document
///
/// Workout and diet sections are always present. The tips section is only
/// emitted when the plan has tips.
#[must_use]
pub fn render_text(plan: &PlanRecord) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{TITLE}");
    let _ = writeln!(out, "{}", "=".repeat(TITLE.len()));
    let _ = writeln!(out);
    let _ = writeln!(out, "Plan for: {}", display_name(Some(&plan.name)));

    push_section(&mut out, "Workout Plan", &plan.workout_plan);
    push_section(&mut out, "Diet Plan", &plan.diet_plan);
    if !plan.tips.is_empty() {
        push_section(&mut out, "Tips & Recommendations", &plan.tips);
    }

    out
}

fn push_section(out: &mut String, heading: &str, body: &str) {
    let body = if body.is_empty() { EMPTY_SECTION } else { body };
    let _ = writeln!(out);
    let _ = writeln!(out, "{heading}");
    let _ = writeln!(out, "{}", "-".repeat(heading.len()));
    let _ = writeln!(out, "{body}");
}
