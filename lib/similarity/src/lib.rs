//! # attrx Similarity
//!
//! Cosine top-K ranking over precomputed embeddings, for "more like this"
//! recommendations.
//!
//! ## Features
//!
//! - **Stable ranking**: Equal scores keep candidate insertion order
//! - **Hard cap**: Result size never exceeds the configured cap, whatever the caller asks
//! - **Dimension safety**: Candidates of a different dimension are skipped
//! - **Lazy hydration**: Full records are fetched only for the final page
//!
//! ## Example
//!
//! ```rust
//! use attrx_similarity::{EmbeddedItem, InMemoryEmbeddings, RankParams, SimilarityRanker};
//!
//! let store = InMemoryEmbeddings::from_items(vec![
//!     EmbeddedItem::new("jacket", vec![1.0, 0.0]),
//!     EmbeddedItem::new("coat", vec![0.9, 0.1]),
//!     EmbeddedItem::new("sandals", vec![0.0, 1.0]),
//! ]);
//!
//! let ranker = SimilarityRanker::default();
//! let params = RankParams { min_score: 0.5, limit: 10 };
//! let similar = ranker.recommend(&store, "jacket", params).unwrap();
//! assert_eq!(similar.len(), 1);
//! assert_eq!(similar[0].id, "coat");
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Embedding  │────>│   Ranker    │────>│  Hydrate    │
//! │   Source    │     │ (cos, topK) │     │ (records)   │
//! └─────────────┘     └─────────────┘     └─────────────┘
//! ```

pub mod hydrate;
pub mod rank;
pub mod source;

pub use hydrate::{hydrate, Hydrated, RecordLookup};
pub use rank::{RankParams, SimilarityRanker, SimilarityResult};
pub use source::{EmbeddedItem, EmbeddingSource, InMemoryEmbeddings};
