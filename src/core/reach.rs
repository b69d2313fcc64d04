//! Reach potential estimation.
//!
//! Three integer sub-scores are summed and the total is bucketed:
//!
//! | sub-score  | source                                        |
//! |------------|-----------------------------------------------|
//! | quality    | single-word lexicon over the analysis tokens  |
//! | engagement | phrase lexicon over the analysis tokens       |
//! | views      | step function over the view count             |
//!
//! `total >= 3` is High, `0..=2` is Moderate, anything below zero is Low.

use crate::core::VideoMetadata;
use derive_more::Display;
use serde::{Deserialize, Serialize};

const QUALITY_LEXICON: &[(&str, i64)] = &[("poor", -2), ("fair", -1), ("good", 1), ("excellent", 2)];

const ENGAGEMENT_LEXICON: &[(&str, i64)] = &[
    ("low engagement", -2),
    ("moderate engagement", 0),
    ("high engagement", 2),
];

/// Exclusive upper bounds, checked in order; views at or above the last bound score `TOP_VIEW_SCORE`.
const VIEW_BUCKETS: &[(u64, i64)] = &[(1_000, -2), (10_000, -1), (100_000, 1)];
const TOP_VIEW_SCORE: i64 = 2;

const HIGH_THRESHOLD: i64 = 3;
const MODERATE_THRESHOLD: i64 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display, Serialize, Deserialize)]
pub enum ReachPotential {
    Low,
    Moderate,
    High,
}

impl ReachPotential {
    /// Relative score used when charting: Low 1, Moderate 2, High 3.
    pub fn ordinal(self) -> u64 {
        match self {
            Self::Low => 1,
            Self::Moderate => 2,
            Self::High => 3,
        }
    }

    pub fn from_total(total: i64) -> Self {
        if total >= HIGH_THRESHOLD {
            Self::High
        } else if total >= MODERATE_THRESHOLD {
            Self::Moderate
        } else {
            Self::Low
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReachScore {
    pub quality: i64,
    pub engagement: i64,
    pub views: i64,
}

impl ReachScore {
    pub fn total(&self) -> i64 {
        self.quality + self.engagement + self.views
    }

    pub fn potential(&self) -> ReachPotential {
        ReachPotential::from_total(self.total())
    }
}

pub fn score(analysis: &str, metadata: &VideoMetadata) -> ReachScore {
    let tokens = tokenize(analysis);
    ReachScore {
        quality: quality_score(&tokens),
        engagement: engagement_score(&tokens),
        views: view_count_score(metadata.view_count),
    }
}

fn tokenize(analysis: &str) -> Vec<String> {
    analysis.split_whitespace().map(str::to_lowercase).collect()
}

fn quality_score(tokens: &[String]) -> i64 {
    tokens
        .iter()
        .filter_map(|token| {
            QUALITY_LEXICON
                .iter()
                .find(|(word, _)| word == token)
                .map(|(_, weight)| weight)
        })
        .sum()
}

// Phrases span tokens, so they are searched in the space-normalised token stream.
fn engagement_score(tokens: &[String]) -> i64 {
    let normalised = tokens.join(" ");
    ENGAGEMENT_LEXICON
        .iter()
        .map(|(phrase, weight)| normalised.matches(phrase).count() as i64 * weight)
        .sum()
}

pub fn view_count_score(view_count: u64) -> i64 {
    VIEW_BUCKETS
        .iter()
        .find(|(bound, _)| view_count < *bound)
        .map_or(TOP_VIEW_SCORE, |(_, score)| *score)
}
