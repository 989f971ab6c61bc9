// ABOUTME: Fixed catalogue of daily motivation quotes
// ABOUTME: Picks one uniformly at random for the motivation endpoint
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use rand::seq::SliceRandom;

/// Quotes shown as daily motivation
pub const QUOTES: [&str; 7] = [
    "The only bad workout is the one that didn't happen.",
    "Your body can stand almost anything. It's your mind you have to convince.",
    "Success starts with self-discipline.",
    "Push yourself because no one else is going to do it for you.",
    "Great things never come from comfort zones.",
    "The difference between try and triumph is a little umph.",
    "Strive for progress, not perfection.",
];

/// Pick a quote uniformly at random
#[must_use]
pub fn random_quote() -> &'static str {
    QUOTES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(QUOTES[0])
}
