//! Attach display data to ranked ids after ranking
//!
//! Ranking only ever touches ids and vectors. Full records are looked up for
//! the final result page; ids whose record has disappeared in the meantime are
//! dropped without error.

use crate::rank::SimilarityResult;
use crate::source::InMemoryEmbeddings;
use ahash::AHashMap;
use serde::Serialize;
use tracing::debug;

/// Resolves an id to its full record
pub trait RecordLookup {
    type Record;

    fn lookup(&self, id: &str) -> Option<Self::Record>;
}

impl<T: Clone> RecordLookup for AHashMap<String, T> {
    type Record = T;

    fn lookup(&self, id: &str) -> Option<T> {
        self.get(id).cloned()
    }
}

impl RecordLookup for InMemoryEmbeddings {
    type Record = serde_json::Value;

    /// The item's payload, `Null` for items stored without one
    fn lookup(&self, id: &str) -> Option<serde_json::Value> {
        self.get(id)
            .map(|item| item.payload.clone().unwrap_or(serde_json::Value::Null))
    }
}

/// A ranked result with its record attached
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hydrated<T> {
    pub id: String,
    pub score: f32,
    pub record: T,
}

/// Look up each result's record, keeping rank order
pub fn hydrate<L: RecordLookup>(results: &[SimilarityResult], lookup: &L) -> Vec<Hydrated<L::Record>> {
    let hydrated: Vec<_> = results
        .iter()
        .filter_map(|result| {
            lookup.lookup(&result.id).map(|record| Hydrated {
                id: result.id.clone(),
                score: result.score,
                record,
            })
        })
        .collect();

    let missing = results.len() - hydrated.len();
    if missing > 0 {
        debug!("{} ranked ids had no record and were dropped", missing);
    }
    hydrated
}
