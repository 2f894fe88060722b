//! # attrx Core
//!
//! Core library for the attrx attribute resolution engine.
//!
//! This crate provides the shared building blocks:
//!
//! - [`MatchConfig`] - Thresholds, weights and cache parameters
//! - [`confidence`] - Confidence tiers and accept/confirm decisions
//! - [`CandidateRecord`] / [`CandidateSource`] - Named entities and where they come from
//! - [`IndexSnapshot`] - Immutable, searchable view over a candidate set
//! - [`CandidateIndex`] - TTL-cached snapshot with single-flight rebuilds
//! - [`EmbeddingVector`] - Dense vectors with cosine similarity
//!
//! ## Example
//!
//! ```rust
//! use attrx_core::{CandidateIndex, CandidateRecord, MatchConfig, StaticSource};
//! use std::sync::Arc;
//!
//! let source = StaticSource::new(vec![
//!     CandidateRecord::new("nike", "Nike").with_aliases(["Just Do It"]),
//! ]);
//! let index = CandidateIndex::new("brands", Arc::new(source), &MatchConfig::default());
//!
//! let snapshot = index.get().unwrap();
//! assert_eq!(snapshot.find_exact("NIKE").unwrap().id, "nike");
//! ```

pub mod candidate;
pub mod clock;
pub mod confidence;
pub mod config;
pub mod error;
pub mod index;
pub mod snapshot;
pub mod text;
pub mod vector;

pub use candidate::{CandidateRecord, CandidateSource, JsonFileSource, StaticSource};
pub use clock::{Clock, ManualClock, SystemClock};
pub use confidence::{tier_of, Classification, ConfidenceTier, Thresholds};
pub use config::MatchConfig;
pub use error::{Error, Result};
pub use index::{CandidateIndex, IndexStats};
pub use snapshot::{IndexSnapshot, KeyKind, SearchKey, SearchOptions};
pub use vector::{cosine_similarity, EmbeddingVector};
