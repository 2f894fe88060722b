//! String similarity for the approximate matching pass
//!
//! All functions return a similarity in [0.0, 1.0] where 1.0 means identical.
//! Distance is `1 - similarity`.

use attrx_core::snapshot::{SearchKey, SearchOptions};
use attrx_core::text::{fuzzy_key, token_sorted};
use strsim::normalized_levenshtein;

/// A query normalized once and compared against many keys
#[derive(Debug, Clone)]
pub struct PreparedQuery {
    pub text: String,
    pub sorted: String,
    chars: usize,
}

impl PreparedQuery {
    pub fn new(raw: &str) -> Self {
        let text = fuzzy_key(raw);
        let sorted = token_sorted(&text);
        let chars = text.chars().count();
        Self { text, sorted, chars }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn char_len(&self) -> usize {
        self.chars
    }
}

/// Calculate edit-distance similarity between two strings
///
/// Uses normalized Levenshtein over characters.
pub fn levenshtein_similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    normalized_levenshtein(a, b)
}

/// Best of plain and token-sorted edit similarity
///
/// Token sorting makes "lauren ralph" match "ralph lauren" without
/// rewarding unrelated reorderings of characters.
pub fn token_similarity(query: &PreparedQuery, key: &SearchKey) -> f64 {
    let plain = levenshtein_similarity(&query.text, &key.text);
    if plain >= 1.0 || query.sorted == query.text && key.sorted == key.text {
        return plain;
    }
    plain.max(levenshtein_similarity(&query.sorted, &key.sorted))
}

/// Weighted score of one key, or `None` when the key is rejected
///
/// A key is rejected when the query is shorter than the minimum match length
/// or when its unweighted distance exceeds the distance threshold.
pub fn key_score(query: &PreparedQuery, key: &SearchKey, options: &SearchOptions) -> Option<f64> {
    if query.char_len() < options.min_match_length {
        return None;
    }

    let similarity = token_similarity(query, key);
    if 1.0 - similarity > options.distance_threshold {
        return None;
    }

    Some(similarity * key.weight)
}
