//! # attrx
//!
//! Attribute resolution and similarity ranking for marketplace listings.
//!
//! attrx turns noisy product attributes (from an AI model or a human form)
//! into canonical, confidence-scored values, and ranks items by embedding
//! similarity for "more like this" recommendations.
//!
//! ## Quick Start
//!
//! ### From the command line
//!
//! ```bash
//! attrx match --candidates brands.json "Ralph Lauran"
//! attrx normalize --brands brands.json --input listing.json
//! attrx rank --embeddings items.json --query item-42 --limit 12
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use attrx::prelude::*;
//! use std::sync::Arc;
//!
//! let config = MatchConfig::default();
//! let brands = StaticSource::new(vec![
//!     CandidateRecord::new("nike", "Nike").with_aliases(["Nike Inc"]),
//! ]);
//! let index = Arc::new(CandidateIndex::new("brands", Arc::new(brands), &config));
//!
//! let matcher = FuzzyMatcher::new(&config);
//! let snapshot = index.get().unwrap();
//! let result = matcher.match_query("nke", &snapshot);
//! assert_eq!(result.match_type, MatchType::Fuzzy);
//! assert!(result.needs_confirmation);
//! ```
//!
//! ## Crate Structure
//!
//! - `attrx-core` - Config, errors, confidence scale, candidate index, embedding vectors
//! - `attrx-matching` - Fuzzy matcher, taxonomy, reference tables, normalizer
//! - `attrx-similarity` - Cosine top-K ranker and hydration

// Re-export core types
pub use attrx_core::{
    CandidateIndex, CandidateRecord, CandidateSource, JsonFileSource, StaticSource,
    ConfidenceTier, Thresholds, MatchConfig,
    IndexSnapshot, IndexStats, EmbeddingVector,
    Error, Result,
};

// Re-export matching
pub use attrx_matching::{
    AttributeNormalizer, FuzzyMatcher, MatchResult, MatchType, Suggestion,
    NormalizedAttribute, NormalizedCategory, NormalizedProduct, RawAttributes,
    Condition, ReferenceTable, Taxonomy,
};

// Re-export similarity
pub use attrx_similarity::{
    hydrate, Hydrated, EmbeddedItem, EmbeddingSource, InMemoryEmbeddings,
    RankParams, SimilarityRanker, SimilarityResult,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        CandidateIndex, CandidateRecord, CandidateSource, JsonFileSource, StaticSource,
        MatchConfig, ConfidenceTier, EmbeddingVector,
        AttributeNormalizer, FuzzyMatcher, MatchResult, MatchType,
        NormalizedProduct, RawAttributes,
        EmbeddedItem, EmbeddingSource, InMemoryEmbeddings, RankParams, SimilarityRanker,
        Error, Result,
    };
}
