//! Tunable thresholds and cache parameters
//!
//! Every field has a literal default so an empty JSON object is a valid
//! configuration. Keys are camelCase to match the names used by callers
//! (`autoSelectThreshold`, `cacheTTLSeconds`, ...).

use crate::confidence::{AUTO_SELECT, STRONG, SUGGESTION};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Matching, caching and ranking configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct MatchConfig {
    /// Confidence at or above which a fuzzy match is accepted without confirmation
    pub auto_select_threshold: f64,
    /// Confidence at or above which a fuzzy match is returned as the candidate
    pub strong_threshold: f64,
    /// Minimum confidence for a candidate to appear in suggestions
    pub suggestion_threshold: f64,
    /// Maximum normalized edit distance a search key may have to a query
    pub fuzzy_distance_threshold: f64,
    pub max_suggestions: usize,
    #[serde(rename = "cacheTTLSeconds")]
    pub cache_ttl_seconds: u64,
    pub similarity_hard_cap: usize,
    pub name_weight: f64,
    pub alias_weight: f64,
    /// Queries shorter than this (in chars) skip the approximate pass
    pub min_match_length: usize,
    /// Multiplier applied to the producer confidence for unvalidated fields
    pub unvalidated_penalty: f64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            auto_select_threshold: AUTO_SELECT,
            strong_threshold: STRONG,
            suggestion_threshold: SUGGESTION,
            fuzzy_distance_threshold: 0.40,
            max_suggestions: 5,
            cache_ttl_seconds: 3600,
            similarity_hard_cap: 50,
            name_weight: 1.0,
            alias_weight: 0.8,
            min_match_length: 2,
            unvalidated_penalty: 0.5,
        }
    }
}

impl MatchConfig {
    /// Load a configuration from a JSON file and validate it
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: MatchConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Cache time-to-live as a [`Duration`]
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }

    /// Validate the configuration
    /// - Thresholds and weights must lie in [0, 1]
    /// - `suggestion <= strong <= autoSelect`
    /// - Suggestion and similarity caps must be non-zero
    pub fn validate(&self) -> Result<()> {
        let unit_fields = [
            ("autoSelectThreshold", self.auto_select_threshold),
            ("strongThreshold", self.strong_threshold),
            ("suggestionThreshold", self.suggestion_threshold),
            ("fuzzyDistanceThreshold", self.fuzzy_distance_threshold),
            ("nameWeight", self.name_weight),
            ("aliasWeight", self.alias_weight),
            ("unvalidatedPenalty", self.unvalidated_penalty),
        ];
        for (name, value) in unit_fields {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::InvalidConfig(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }

        if self.suggestion_threshold > self.strong_threshold
            || self.strong_threshold > self.auto_select_threshold
        {
            return Err(Error::InvalidConfig(format!(
                "thresholds must satisfy suggestion <= strong <= autoSelect, got {} / {} / {}",
                self.suggestion_threshold, self.strong_threshold, self.auto_select_threshold
            )));
        }

        if self.max_suggestions == 0 {
            return Err(Error::InvalidConfig("maxSuggestions must be at least 1".into()));
        }
        if self.similarity_hard_cap == 0 {
            return Err(Error::InvalidConfig("similarityHardCap must be at least 1".into()));
        }

        Ok(())
    }
}
