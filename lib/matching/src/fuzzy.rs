//! Fuzzy matcher
//!
//! Resolves a free-text query against an [`IndexSnapshot`]:
//!
//! 1. Exact pass: case-insensitive equality with a name or alias.
//! 2. Approximate pass: every record scored by its best weighted key,
//!    filtered by the suggestion threshold, sorted, capped.
//! 3. The top approximate score is classified with [`Thresholds`].

use crate::distance::{key_score, PreparedQuery};
use attrx_core::confidence::clamp_unit;
use attrx_core::snapshot::{IndexSnapshot, SearchOptions};
use attrx_core::{CandidateRecord, MatchConfig, Thresholds};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    Exact,
    Fuzzy,
    None,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub candidate_id: String,
    pub candidate_name: String,
    pub score: f64,
}

/// Outcome of resolving one query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub candidate_id: Option<String>,
    pub candidate_name: Option<String>,
    pub confidence: f64,
    pub match_type: MatchType,
    pub needs_confirmation: bool,
    pub suggestions: Vec<Suggestion>,
}

impl MatchResult {
    pub fn none() -> Self {
        Self {
            candidate_id: None,
            candidate_name: None,
            confidence: 0.0,
            match_type: MatchType::None,
            needs_confirmation: false,
            suggestions: Vec::new(),
        }
    }

    fn exact(record: &CandidateRecord) -> Self {
        Self {
            candidate_id: Some(record.id.clone()),
            candidate_name: Some(record.name.clone()),
            confidence: 1.0,
            match_type: MatchType::Exact,
            needs_confirmation: false,
            suggestions: Vec::new(),
        }
    }

    pub fn is_match(&self) -> bool {
        self.match_type != MatchType::None
    }
}

/// Stateless matcher; cheap to clone and share across threads
#[derive(Debug, Clone, Copy)]
pub struct FuzzyMatcher {
    thresholds: Thresholds,
    max_suggestions: usize,
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self::new(&MatchConfig::default())
    }
}

impl FuzzyMatcher {
    pub fn new(config: &MatchConfig) -> Self {
        Self {
            thresholds: Thresholds::from(config),
            max_suggestions: config.max_suggestions,
        }
    }

    /// Resolve `query` against a snapshot
    pub fn match_query(&self, query: &str, snapshot: &IndexSnapshot) -> MatchResult {
        if query.trim().is_empty() {
            return MatchResult::none();
        }

        if let Some(record) = snapshot.find_exact(query) {
            return MatchResult::exact(record);
        }

        let suggestions = self.rank_suggestions(query, snapshot);
        let Some(top) = suggestions.first() else {
            return MatchResult::none();
        };

        let confidence = top.score;
        let class = self.thresholds.classify(confidence);
        let (candidate_id, candidate_name) = if class.strong {
            (Some(top.candidate_id.clone()), Some(top.candidate_name.clone()))
        } else {
            (None, None)
        };

        MatchResult {
            candidate_id,
            candidate_name,
            confidence,
            match_type: if class.strong { MatchType::Fuzzy } else { MatchType::None },
            needs_confirmation: class.needs_confirmation,
            suggestions,
        }
    }

    /// Resolve `query` against a one-off list of records
    pub fn match_records(
        &self,
        query: &str,
        records: Vec<CandidateRecord>,
        options: SearchOptions,
    ) -> MatchResult {
        let snapshot = IndexSnapshot::from_records(records, options);
        self.match_query(query, &snapshot)
    }

    /// Approximate pass: best weighted key score per record, thresholded,
    /// sorted by score desc, then popularity desc, then record order
    fn rank_suggestions(&self, query: &str, snapshot: &IndexSnapshot) -> Vec<Suggestion> {
        let prepared = PreparedQuery::new(query);
        if prepared.is_empty() {
            return Vec::new();
        }
        let options = snapshot.options();

        let scored: Vec<(usize, f64)> = snapshot
            .keys()
            .par_iter()
            .filter_map(|key| key_score(&prepared, key, options).map(|s| (key.record, s)))
            .collect();

        let mut best = vec![0.0f64; snapshot.len()];
        for (record, score) in scored {
            if score > best[record] {
                best[record] = score;
            }
        }

        let records = snapshot.records();
        let mut ranked: Vec<(usize, f64)> = best
            .into_iter()
            .enumerate()
            .map(|(idx, score)| (idx, clamp_unit(score)))
            .filter(|&(_, score)| score > 0.0 && score >= self.thresholds.suggestion)
            .collect();

        ranked.sort_by(|a, b| {
            b.1.total_cmp(&a.1)
                .then_with(|| {
                    records[b.0]
                        .popularity
                        .partial_cmp(&records[a.0].popularity)
                        .unwrap_or(Ordering::Equal)
                })
                .then_with(|| a.0.cmp(&b.0))
        });
        ranked.truncate(self.max_suggestions);

        ranked
            .into_iter()
            .map(|(idx, score)| Suggestion {
                candidate_id: records[idx].id.clone(),
                candidate_name: records[idx].name.clone(),
                score,
            })
            .collect()
    }
}
