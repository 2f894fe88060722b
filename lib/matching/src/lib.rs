//! # attrx Matching
//!
//! Resolves noisy, free-text product attributes into taxonomy-bound,
//! confidence-scored values.
//!
//! ## Features
//!
//! - **Fuzzy matching**: Exact name/alias pass, then weighted edit-distance scoring
//! - **Calibrated decisions**: Auto-select, confirm or suggest, driven by [`attrx_core::Thresholds`]
//! - **Scoped taxonomy**: Category lookup restricted to the producer's department
//! - **Reference tables**: Colors and materials with aliases
//! - **Best-effort normalization**: Every field resolved independently, raw input kept
//!
//! ## Example
//!
//! ```rust
//! use attrx_core::{CandidateIndex, CandidateRecord, MatchConfig, StaticSource};
//! use attrx_matching::{AttributeNormalizer, RawAttributes};
//! use std::sync::Arc;
//!
//! let config = MatchConfig::default();
//! let brands = StaticSource::new(vec![CandidateRecord::new("nike", "Nike")]);
//! let index = Arc::new(CandidateIndex::new("brands", Arc::new(brands), &config));
//! let normalizer = AttributeNormalizer::new(&config, index);
//!
//! let raw = RawAttributes {
//!     department: Some("Women".into()),
//!     category: Some("sneakers".into()),
//!     brand: Some("nike".into()),
//!     confidence: 0.9,
//!     ..RawAttributes::default()
//! };
//! let product = normalizer.normalize(&raw).unwrap();
//! assert_eq!(product.brand.id, "nike");
//! assert_eq!(product.category.full_label, "Women > Shoes > Sneakers");
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌─────────────┐
//! │ RawAttrs    │────>│  Normalizer  │────>│ Normalized  │
//! │ (producer)  │     │  (per field) │     │ Product     │
//! └─────────────┘     └──────────────┘     └─────────────┘
//!                       │    │     │
//!          ┌────────────┘    │     └─────────────┐
//!          v                 v                   v
//!   ┌─────────────┐   ┌─────────────┐    ┌─────────────┐
//!   │ Brand index │   │  Taxonomy   │    │ Ref tables  │
//!   │ (TTL cache) │   │  (scoped)   │    │ color/mat.  │
//!   └─────────────┘   └─────────────┘    └─────────────┘
//!          └──────────────┬──┴──────────────────┘
//!                  ┌─────────────┐
//!                  │FuzzyMatcher │
//!                  └─────────────┘
//! ```

pub mod condition;
pub mod distance;
pub mod fuzzy;
pub mod normalizer;
pub mod product;
pub mod reference;
pub mod taxonomy;

pub use condition::Condition;
pub use fuzzy::{FuzzyMatcher, MatchResult, MatchType, Suggestion};
pub use normalizer::AttributeNormalizer;
pub use product::{NormalizedAttribute, NormalizedCategory, NormalizedProduct, RawAttributes};
pub use reference::ReferenceTable;
pub use taxonomy::{CategoryMatch, Taxonomy, TaxonomyEntry};
