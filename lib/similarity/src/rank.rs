//! Cosine top-K ranking
//!
//! Scores are computed in parallel but collected in insertion order, and the
//! final sort is stable, so equal scores keep the order candidates were given in.

use crate::source::{EmbeddedItem, EmbeddingSource};
use attrx_core::{EmbeddingVector, MatchConfig, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One ranked candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityResult {
    pub id: String,
    pub score: f32,
}

/// Filter and size of a ranking request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankParams {
    /// Scores below this are dropped
    pub min_score: f32,
    /// Requested result count; never more than the ranker's hard cap
    pub limit: usize,
}

impl Default for RankParams {
    fn default() -> Self {
        Self {
            min_score: 0.0,
            limit: 10,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SimilarityRanker {
    hard_cap: usize,
}

impl Default for SimilarityRanker {
    fn default() -> Self {
        Self::new(&MatchConfig::default())
    }
}

impl SimilarityRanker {
    pub fn new(config: &MatchConfig) -> Self {
        Self {
            hard_cap: config.similarity_hard_cap,
        }
    }

    pub fn hard_cap(&self) -> usize {
        self.hard_cap
    }

    /// Rank `candidates` by cosine similarity to `query`
    ///
    /// Candidates whose dimension differs from the query are skipped.
    /// Results are sorted by score descending and truncated to
    /// `min(limit, hard_cap)`.
    pub fn rank(
        &self,
        query: &EmbeddingVector,
        candidates: &[EmbeddedItem],
        min_score: f32,
        limit: usize,
    ) -> Vec<SimilarityResult> {
        let dim = query.dim();

        let mut scored: Vec<(usize, f32)> = candidates
            .par_iter()
            .enumerate()
            .filter(|(_, item)| item.vector.dim() == dim)
            .map(|(idx, item)| (idx, query.cosine_similarity(&item.vector)))
            .filter(|&(_, score)| score >= min_score)
            .collect();

        // stable: ties keep insertion order
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored.truncate(limit.min(self.hard_cap));

        scored
            .into_iter()
            .map(|(idx, score)| SimilarityResult {
                id: candidates[idx].id.clone(),
                score,
            })
            .collect()
    }

    /// Items most similar to `query_id`, drawn from the source's pool
    ///
    /// The query item itself is excluded. A query without an embedding yields
    /// no results; an unreachable source is an error.
    pub fn recommend(
        &self,
        source: &dyn EmbeddingSource,
        query_id: &str,
        params: RankParams,
    ) -> Result<Vec<SimilarityResult>> {
        let Some(query) = source.embedding(query_id)? else {
            debug!("no embedding for '{}', nothing to rank", query_id);
            return Ok(Vec::new());
        };

        let mut pool = source.pool()?;
        pool.retain(|item| item.id != query_id);

        let results = self.rank(&query, &pool, params.min_score, params.limit);
        debug!(
            "ranked {} of {} candidates for '{}'",
            results.len(),
            pool.len(),
            query_id
        );
        Ok(results)
    }
}
