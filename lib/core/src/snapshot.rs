//! Immutable, searchable view over one candidate set
//!
//! A snapshot is built in full before it is published and is never mutated
//! afterwards. The index swaps whole snapshots; matchers only ever read them.

use crate::candidate::CandidateRecord;
use crate::config::MatchConfig;
use crate::text::{exact_key, fuzzy_key, token_sorted};
use ahash::AHashMap;
use std::time::{Duration, Instant};

/// Parameters of the weighted search structure
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchOptions {
    pub name_weight: f64,
    pub alias_weight: f64,
    pub min_match_length: usize,
    pub distance_threshold: f64,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self::from(&MatchConfig::default())
    }
}

impl From<&MatchConfig> for SearchOptions {
    fn from(config: &MatchConfig) -> Self {
        Self {
            name_weight: config.name_weight,
            alias_weight: config.alias_weight,
            min_match_length: config.min_match_length,
            distance_threshold: config.fuzzy_distance_threshold,
        }
    }
}

/// Whether a search key came from a record's name or one of its aliases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Name,
    Alias,
}

/// One weighted, pre-normalized string the approximate pass compares against
#[derive(Debug, Clone)]
pub struct SearchKey {
    /// Position of the owning record in [`IndexSnapshot::records`]
    pub record: usize,
    pub kind: KeyKind,
    pub weight: f64,
    pub text: String,
    pub sorted: String,
}

#[derive(Debug)]
pub struct IndexSnapshot {
    records: Vec<CandidateRecord>,
    exact: AHashMap<String, usize>,
    keys: Vec<SearchKey>,
    options: SearchOptions,
    built_at: Instant,
    generation: u64,
}

impl IndexSnapshot {
    /// Build a snapshot from a full candidate list
    pub fn build(
        records: Vec<CandidateRecord>,
        options: SearchOptions,
        built_at: Instant,
        generation: u64,
    ) -> Self {
        let mut exact = AHashMap::with_capacity(records.len() * 2);
        let mut keys = Vec::with_capacity(records.len() * 2);

        for (idx, record) in records.iter().enumerate() {
            let fields = std::iter::once((KeyKind::Name, &record.name))
                .chain(record.aliases.iter().map(|a| (KeyKind::Alias, a)));

            for (kind, value) in fields {
                let key = exact_key(value);
                if key.is_empty() {
                    continue;
                }
                // Earlier records keep the key
                exact.entry(key).or_insert(idx);

                let text = fuzzy_key(value);
                if text.is_empty() {
                    continue;
                }
                let weight = match kind {
                    KeyKind::Name => options.name_weight,
                    KeyKind::Alias => options.alias_weight,
                };
                keys.push(SearchKey {
                    record: idx,
                    kind,
                    weight,
                    sorted: token_sorted(&text),
                    text,
                });
            }
        }

        Self {
            records,
            exact,
            keys,
            options,
            built_at,
            generation,
        }
    }

    /// Build a snapshot that is not owned by any index (static tables, one-off lists)
    pub fn from_records(records: Vec<CandidateRecord>, options: SearchOptions) -> Self {
        Self::build(records, options, Instant::now(), 0)
    }

    pub fn records(&self) -> &[CandidateRecord] {
        &self.records
    }

    pub fn keys(&self) -> &[SearchKey] {
        &self.keys
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn built_at(&self) -> Instant {
        self.built_at
    }

    /// Monotonic build counter of the owning index (0 for standalone snapshots)
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether the snapshot is still within `ttl` at time `now`
    pub fn is_fresh(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.built_at) < ttl
    }

    /// Case-insensitive lookup of a name or alias
    pub fn find_exact(&self, query: &str) -> Option<&CandidateRecord> {
        self.exact.get(&exact_key(query)).map(|&idx| &self.records[idx])
    }

    pub fn get(&self, id: &str) -> Option<&CandidateRecord> {
        self.records.iter().find(|r| r.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brands() -> Vec<CandidateRecord> {
        vec![
            CandidateRecord::new("nike", "Nike").with_aliases(["Just Do It"]),
            CandidateRecord::new("adidas", "Adidas").with_aliases(["Three Stripes", "Nike"]),
            CandidateRecord::new("levis", "Levi's"),
        ]
    }

    #[test]
    fn test_keys_are_weighted() {
        let snapshot = IndexSnapshot::from_records(brands(), SearchOptions::default());

        let nike_keys: Vec<_> = snapshot.keys().iter().filter(|k| k.record == 0).collect();
        assert_eq!(nike_keys.len(), 2);
        assert_eq!(nike_keys[0].kind, KeyKind::Name);
        assert_eq!(nike_keys[0].weight, 1.0);
        assert_eq!(nike_keys[1].kind, KeyKind::Alias);
        assert_eq!(nike_keys[1].weight, 0.8);
        assert_eq!(nike_keys[1].sorted, "do it just");
    }

    #[test]
    fn test_find_exact_first_record_wins() {
        let snapshot = IndexSnapshot::from_records(brands(), SearchOptions::default());

        // "Nike" is also an alias of the second record
        assert_eq!(snapshot.find_exact("NIKE").unwrap().id, "nike");
        assert_eq!(snapshot.find_exact("  just  do it ").unwrap().id, "nike");
        assert_eq!(snapshot.find_exact("three stripes").unwrap().id, "adidas");
        assert!(snapshot.find_exact("puma").is_none());
    }

    #[test]
    fn test_freshness() {
        let built = Instant::now();
        let snapshot = IndexSnapshot::build(brands(), SearchOptions::default(), built, 3);

        assert_eq!(snapshot.generation(), 3);
        assert!(snapshot.is_fresh(built, Duration::from_secs(10)));
        assert!(!snapshot.is_fresh(built + Duration::from_secs(10), Duration::from_secs(10)));
        assert!(!snapshot.is_fresh(built, Duration::ZERO));
    }

    #[test]
    fn test_empty_names_are_skipped() {
        let records = vec![CandidateRecord::new("blank", "   ").with_aliases(["--"])];
        let snapshot = IndexSnapshot::from_records(records, SearchOptions::default());

        assert_eq!(snapshot.len(), 1);
        // "--" has an exact key but folds to nothing for fuzzy matching
        assert!(snapshot.keys().is_empty());
        assert!(snapshot.find_exact("--").is_some());
    }
}
