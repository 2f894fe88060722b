//! Confidence scale
//!
//! Maps numeric confidence scores to presentation tiers and derives the
//! accept/confirm/suggest decisions used by the matchers.

use crate::config::MatchConfig;
use serde::{Deserialize, Serialize};

/// Accept a fuzzy match without asking the user
pub const AUTO_SELECT: f64 = 0.90;
/// Return a fuzzy match as the resolved candidate
pub const STRONG: f64 = 0.75;
/// Show a candidate as a suggestion
pub const SUGGESTION: f64 = 0.50;

const HIGH_TIER: f64 = 0.7;
const MEDIUM_TIER: f64 = 0.4;

/// Qualitative confidence bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
}

/// Tier for a score: high >= 0.7, medium >= 0.4, low otherwise
pub fn tier_of(score: f64) -> ConfidenceTier {
    if score >= HIGH_TIER {
        ConfidenceTier::High
    } else if score >= MEDIUM_TIER {
        ConfidenceTier::Medium
    } else {
        // NaN lands here as well
        ConfidenceTier::Low
    }
}

/// Clamp a score into [0, 1], mapping NaN to 0
pub fn clamp_unit(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 1.0)
    }
}

/// Decisions derived from a single score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub auto_select: bool,
    pub strong: bool,
    pub suggestion: bool,
    pub needs_confirmation: bool,
}

/// The three matching thresholds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub auto_select: f64,
    pub strong: f64,
    pub suggestion: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            auto_select: AUTO_SELECT,
            strong: STRONG,
            suggestion: SUGGESTION,
        }
    }
}

impl From<&MatchConfig> for Thresholds {
    fn from(config: &MatchConfig) -> Self {
        Self {
            auto_select: config.auto_select_threshold,
            strong: config.strong_threshold,
            suggestion: config.suggestion_threshold,
        }
    }
}

impl Thresholds {
    pub fn classify(&self, score: f64) -> Classification {
        let auto_select = score >= self.auto_select;
        let strong = score >= self.strong;
        Classification {
            auto_select,
            strong,
            suggestion: score >= self.suggestion,
            needs_confirmation: strong && !auto_select,
        }
    }
}
