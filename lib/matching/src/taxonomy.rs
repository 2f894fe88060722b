//! Department-scoped category taxonomy
//!
//! Every entry lives under one top-level scope (women, men, kids, home).
//! Lookups are restricted to the scope named by the producer when that scope
//! is recognized, and fall back to the whole taxonomy otherwise.

use crate::fuzzy::{FuzzyMatcher, MatchResult};
use ahash::AHashMap;
use attrx_core::snapshot::{IndexSnapshot, SearchOptions};
use attrx_core::text::exact_key;
use attrx_core::CandidateRecord;
use serde::{Deserialize, Serialize};

/// Separator used in full labels ("Women > Tops > T-Shirts")
pub const PATH_SEPARATOR: &str = " > ";

/// Icon key for categories whose path has no mapped segment
pub const DEFAULT_ICON: &str = "tag";

const ICONS: &[(&str, &str)] = &[
    ("tops", "shirt"),
    ("bottoms", "pants"),
    ("dresses", "dress"),
    ("outerwear", "jacket"),
    ("suits", "suit"),
    ("shoes", "shoe"),
    ("bags", "bag"),
    ("accessories", "watch"),
    ("jewelry", "gem"),
    ("clothing", "shirt"),
    ("toys", "puzzle"),
    ("furniture", "sofa"),
    ("decor", "lamp"),
    ("kitchen", "utensils"),
];

type Group = (&'static str, &'static [(&'static str, &'static [&'static str])]);

const WOMEN: &[Group] = &[
    ("Tops", &[
        ("T-Shirts", &["tee", "tees", "t shirt", "tshirt"]),
        ("Blouses", &["blouse"]),
        ("Shirts", &["shirt"]),
        ("Sweaters", &["sweater", "jumper", "knitwear", "cardigan"]),
    ]),
    ("Bottoms", &[
        ("Jeans", &["jean", "denim jeans"]),
        ("Skirts", &["skirt"]),
        ("Trousers", &["pants", "trouser"]),
        ("Shorts", &[]),
    ]),
    ("Dresses", &[
        ("Dresses", &["dress"]),
        ("Jumpsuits", &["jumpsuit", "romper", "playsuit"]),
    ]),
    ("Outerwear", &[
        ("Coats", &["coat"]),
        ("Jackets", &["jacket"]),
    ]),
    ("Shoes", &[
        ("Sneakers", &["sneaker", "trainers"]),
        ("Boots", &["boot"]),
        ("Heels", &["heel", "pumps"]),
        ("Sandals", &["sandal"]),
    ]),
    ("Bags", &[
        ("Handbags", &["handbag", "purse"]),
        ("Backpacks", &["backpack"]),
    ]),
    ("Accessories", &[
        ("Jewelry", &["jewellery", "necklace", "earrings"]),
        ("Scarves", &["scarf"]),
        ("Belts", &["belt"]),
    ]),
];

const MEN: &[Group] = &[
    ("Tops", &[
        ("T-Shirts", &["tee", "tees", "t shirt", "tshirt"]),
        ("Shirts", &["shirt"]),
        ("Sweaters", &["sweater", "jumper", "knitwear"]),
        ("Hoodies", &["hoodie", "sweatshirt"]),
    ]),
    ("Bottoms", &[
        ("Jeans", &["jean"]),
        ("Trousers", &["pants", "chinos"]),
        ("Shorts", &[]),
    ]),
    ("Outerwear", &[
        ("Coats", &["coat"]),
        ("Jackets", &["jacket"]),
    ]),
    ("Suits", &[
        ("Suits", &["suit"]),
        ("Blazers", &["blazer", "sport coat"]),
    ]),
    ("Shoes", &[
        ("Sneakers", &["sneaker", "trainers"]),
        ("Boots", &["boot"]),
        ("Dress Shoes", &["loafers", "oxfords", "brogues"]),
    ]),
    ("Accessories", &[
        ("Watches", &["watch"]),
        ("Belts", &["belt"]),
        ("Hats", &["hat", "cap", "beanie"]),
    ]),
];

const KIDS: &[Group] = &[
    ("Clothing", &[
        ("Tops", &["top", "t shirt"]),
        ("Bottoms", &["pants", "trousers"]),
        ("Dresses", &["dress"]),
    ]),
    ("Shoes", &[("Shoes", &["sneakers", "boots"])]),
    ("Toys", &[("Toys", &["toy", "games"])]),
];

const HOME: &[Group] = &[
    ("Furniture", &[
        ("Chairs", &["chair"]),
        ("Tables", &["table", "desk"]),
        ("Storage", &["shelf", "shelves", "cabinet"]),
    ]),
    ("Decor", &[
        ("Lamps", &["lamp", "lighting"]),
        ("Rugs", &["rug", "carpet"]),
        ("Wall Art", &["poster", "painting", "print"]),
    ]),
    ("Kitchen", &[
        ("Cookware", &["pots", "pans"]),
        ("Tableware", &["plates", "dishes", "glasses"]),
    ]),
];

const SCOPES: &[(&str, &str, &[Group], &[&str])] = &[
    ("women", "Women", WOMEN, &["woman", "womens", "female", "ladies", "her"]),
    ("men", "Men", MEN, &["man", "mens", "male", "him"]),
    ("kids", "Kids", KIDS, &["kid", "children", "child", "baby", "boys", "girls"]),
    ("home", "Home", HOME, &["house", "living", "homeware"]),
];

/// One leaf category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxonomyEntry {
    pub id: String,
    /// Scope id the entry belongs to
    pub scope: String,
    /// Display segments from the scope down to the leaf
    pub path: Vec<String>,
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl TaxonomyEntry {
    pub fn label(&self) -> &str {
        self.path.last().map(String::as_str).unwrap_or("")
    }

    pub fn full_label(&self) -> String {
        self.path.join(PATH_SEPARATOR)
    }

    pub fn icon(&self) -> &'static str {
        icon_for(&self.path)
    }
}

/// Icon key for the most specific mapped path segment
pub fn icon_for(path: &[String]) -> &'static str {
    path.iter()
        .rev()
        .find_map(|segment| {
            let key = exact_key(segment);
            ICONS.iter().find(|(name, _)| *name == key).map(|(_, icon)| *icon)
        })
        .unwrap_or(DEFAULT_ICON)
}

/// Result of a scoped category lookup
#[derive(Debug, Clone)]
pub struct CategoryMatch<'a> {
    pub entry: Option<&'a TaxonomyEntry>,
    pub result: MatchResult,
    /// Whether the lookup was restricted to a recognized scope
    pub scoped: bool,
}

#[derive(Debug)]
pub struct Taxonomy {
    entries: Vec<TaxonomyEntry>,
    by_id: AHashMap<String, usize>,
    scope_aliases: AHashMap<String, String>,
    scoped: AHashMap<String, IndexSnapshot>,
    all: IndexSnapshot,
}

impl Taxonomy {
    /// Build a taxonomy from caller-supplied entries
    ///
    /// Each entry's scope id and first path segment are registered as names for
    /// that scope; more can be added with [`with_scope_alias`](Self::with_scope_alias).
    pub fn from_entries(entries: Vec<TaxonomyEntry>, options: SearchOptions) -> Self {
        let mut by_id = AHashMap::with_capacity(entries.len());
        let mut scope_aliases = AHashMap::new();
        let mut per_scope: AHashMap<String, Vec<CandidateRecord>> = AHashMap::new();
        let mut all = Vec::with_capacity(entries.len());

        for (idx, entry) in entries.iter().enumerate() {
            by_id.entry(entry.id.clone()).or_insert(idx);
            scope_aliases
                .entry(exact_key(&entry.scope))
                .or_insert_with(|| entry.scope.clone());
            if let Some(root) = entry.path.first() {
                scope_aliases
                    .entry(exact_key(root))
                    .or_insert_with(|| entry.scope.clone());
            }

            let record = to_record(entry);
            per_scope
                .entry(entry.scope.clone())
                .or_default()
                .push(record.clone());
            all.push(record);
        }

        let scoped = per_scope
            .into_iter()
            .map(|(scope, records)| (scope, IndexSnapshot::from_records(records, options)))
            .collect();

        Self {
            entries,
            by_id,
            scope_aliases,
            scoped,
            all: IndexSnapshot::from_records(all, options),
        }
    }

    /// Built-in marketplace taxonomy (women, men, kids, home)
    pub fn builtin(options: SearchOptions) -> Self {
        let mut entries = Vec::new();
        for (scope, scope_name, groups, _) in SCOPES {
            for (group, leaves) in *groups {
                for (label, aliases) in *leaves {
                    let path = vec![scope_name.to_string(), group.to_string(), label.to_string()];
                    entries.push(TaxonomyEntry {
                        id: slug(&path),
                        scope: scope.to_string(),
                        path,
                        aliases: aliases.iter().map(|a| a.to_string()).collect(),
                    });
                }
            }
        }

        let mut taxonomy = Self::from_entries(entries, options);
        for (scope, _, _, synonyms) in SCOPES {
            for synonym in *synonyms {
                taxonomy = taxonomy.with_scope_alias(synonym, scope);
            }
        }
        taxonomy
    }

    /// Register another name for a scope
    #[must_use]
    pub fn with_scope_alias(mut self, alias: &str, scope: &str) -> Self {
        self.scope_aliases.insert(exact_key(alias), scope.to_string());
        self
    }

    pub fn entries(&self) -> &[TaxonomyEntry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&TaxonomyEntry> {
        self.by_id.get(id).map(|&idx| &self.entries[idx])
    }

    /// Scope id for a free-text department label, if recognized
    pub fn resolve_scope(&self, department: &str) -> Option<&str> {
        let key = exact_key(department).replace('\'', "");
        self.scope_aliases
            .get(&key)
            .filter(|scope| self.scoped.contains_key(*scope))
            .map(String::as_str)
    }

    /// Match a raw category label within the department's scope
    pub fn resolve(&self, matcher: &FuzzyMatcher, department: &str, raw: &str) -> CategoryMatch<'_> {
        let scope = self.resolve_scope(department);
        let snapshot = scope
            .and_then(|s| self.scoped.get(s))
            .unwrap_or(&self.all);

        let result = matcher.match_query(raw, snapshot);
        let entry = result.candidate_id.as_deref().and_then(|id| self.get(id));

        CategoryMatch {
            entry,
            result,
            scoped: scope.is_some(),
        }
    }
}

fn to_record(entry: &TaxonomyEntry) -> CandidateRecord {
    let mut aliases = entry.aliases.clone();
    if entry.path.len() > 1 {
        aliases.push(entry.full_label());
        aliases.push(entry.path[1..].join(PATH_SEPARATOR));
    }
    CandidateRecord::new(entry.id.clone(), entry.label()).with_aliases(aliases)
}

fn slug(path: &[String]) -> String {
    let joined = path.join(" ");
    let mut out = String::with_capacity(joined.len());
    for c in joined.chars() {
        if c.is_alphanumeric() {
            out.extend(c.to_lowercase());
        } else if !out.ends_with('-') && !out.is_empty() {
            out.push('-');
        }
    }
    out.trim_end_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fuzzy::MatchType;

    fn taxonomy() -> Taxonomy {
        Taxonomy::builtin(SearchOptions::default())
    }

    #[test]
    fn test_slug_ids() {
        let t = taxonomy();
        let entry = t.get("women-tops-t-shirts").unwrap();
        assert_eq!(entry.full_label(), "Women > Tops > T-Shirts");
        assert_eq!(entry.label(), "T-Shirts");
    }

    #[test]
    fn test_scope_resolution() {
        let t = taxonomy();
        assert_eq!(t.resolve_scope("Women"), Some("women"));
        assert_eq!(t.resolve_scope("women's"), Some("women"));
        assert_eq!(t.resolve_scope(" MENS "), Some("men"));
        assert_eq!(t.resolve_scope("Children"), Some("kids"));
        assert_eq!(t.resolve_scope("unisex"), None);
        assert_eq!(t.resolve_scope(""), None);
    }

    #[test]
    fn test_scoped_exact_match() {
        let t = taxonomy();
        let matcher = FuzzyMatcher::default();

        let women = t.resolve(&matcher, "Women", "jeans");
        assert_eq!(women.entry.unwrap().id, "women-bottoms-jeans");
        assert!(women.scoped);

        let men = t.resolve(&matcher, "Men", "jeans");
        assert_eq!(men.entry.unwrap().id, "men-bottoms-jeans");
        assert_eq!(men.result.match_type, MatchType::Exact);
    }

    #[test]
    fn test_scope_excludes_other_departments() {
        let t = taxonomy();
        let matcher = FuzzyMatcher::default();

        // Dresses exist for women and kids, not men
        let men = t.resolve(&matcher, "Men", "Dresses");
        assert!(men.entry.map(|e| e.scope != "women").unwrap_or(true));
        assert_ne!(men.result.candidate_id.as_deref(), Some("women-dresses-dresses"));
    }

    #[test]
    fn test_fuzzy_label_in_scope() {
        let t = taxonomy();
        let result = t.resolve(&FuzzyMatcher::default(), "Women", "Sweeters");
        assert_eq!(result.result.match_type, MatchType::Fuzzy);
        assert_eq!(result.entry.unwrap().id, "women-tops-sweaters");
    }

    #[test]
    fn test_unknown_scope_searches_everything() {
        let t = taxonomy();
        let result = t.resolve(&FuzzyMatcher::default(), "", "Lamps");
        assert!(!result.scoped);
        assert_eq!(result.entry.unwrap().id, "home-decor-lamps");
    }

    #[test]
    fn test_full_path_alias() {
        let t = taxonomy();
        let result = t.resolve(&FuzzyMatcher::default(), "men", "Shoes > Dress Shoes");
        assert_eq!(result.entry.unwrap().id, "men-shoes-dress-shoes");
        assert_eq!(result.result.match_type, MatchType::Exact);
    }

    #[test]
    fn test_icons() {
        let t = taxonomy();
        assert_eq!(t.get("women-tops-blouses").unwrap().icon(), "shirt");
        assert_eq!(t.get("home-decor-rugs").unwrap().icon(), "lamp");
        assert_eq!(icon_for(&["Misc".to_string()]), DEFAULT_ICON);
        assert_eq!(icon_for(&[]), DEFAULT_ICON);
    }

    #[test]
    fn test_custom_entries() {
        let entries = vec![TaxonomyEntry {
            id: "pets-beds".into(),
            scope: "pets".into(),
            path: vec!["Pets".into(), "Beds".into()],
            aliases: vec!["dog bed".into()],
        }];
        let t = Taxonomy::from_entries(entries, SearchOptions::default())
            .with_scope_alias("animals", "pets");

        assert_eq!(t.resolve_scope("Animals"), Some("pets"));
        let result = t.resolve(&FuzzyMatcher::default(), "pets", "Dog Bed");
        assert_eq!(result.entry.unwrap().id, "pets-beds");
        assert_eq!(result.entry.unwrap().icon(), DEFAULT_ICON);
    }
}
