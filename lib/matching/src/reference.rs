//! Fixed reference tables for colors and materials
//!
//! Unlike brands these lists do not come from a source and never expire, so
//! each table owns a single standalone [`IndexSnapshot`].

use crate::fuzzy::{FuzzyMatcher, MatchResult};
use attrx_core::snapshot::{IndexSnapshot, SearchOptions};
use attrx_core::CandidateRecord;

const COLORS: &[(&str, &str, &[&str])] = &[
    ("black", "Black", &["jet black", "onyx", "noir"]),
    ("white", "White", &["off white", "ivory", "cream", "blanc"]),
    ("grey", "Grey", &["gray", "charcoal", "heather grey", "silver grey"]),
    ("beige", "Beige", &["tan", "camel", "nude", "sand", "khaki"]),
    ("brown", "Brown", &["chocolate", "cognac", "mocha"]),
    ("red", "Red", &["burgundy", "maroon", "wine", "crimson"]),
    ("pink", "Pink", &["rose", "blush", "fuchsia", "magenta"]),
    ("orange", "Orange", &["coral", "rust", "peach"]),
    ("yellow", "Yellow", &["mustard", "lemon"]),
    ("green", "Green", &["olive", "khaki green", "mint", "emerald", "sage"]),
    ("blue", "Blue", &["light blue", "sky blue", "royal blue", "denim blue", "turquoise"]),
    ("navy", "Navy", &["navy blue", "dark blue", "midnight blue"]),
    ("purple", "Purple", &["violet", "lilac", "lavender", "plum"]),
    ("gold", "Gold", &["golden"]),
    ("silver", "Silver", &["metallic silver"]),
    ("multicolor", "Multicolor", &["multi", "multicolour", "print", "patterned", "rainbow"]),
];

const MATERIALS: &[(&str, &str, &[&str])] = &[
    ("cotton", "Cotton", &["organic cotton", "100% cotton", "coton"]),
    ("polyester", "Polyester", &["poly", "recycled polyester"]),
    ("wool", "Wool", &["merino", "merino wool", "lambswool"]),
    ("cashmere", "Cashmere", &[]),
    ("silk", "Silk", &["satin silk", "mulberry silk"]),
    ("linen", "Linen", &["flax"]),
    ("denim", "Denim", &["jean", "jeans fabric"]),
    ("leather", "Leather", &["genuine leather", "real leather", "suede"]),
    ("faux-leather", "Faux Leather", &["vegan leather", "pu leather", "pleather", "synthetic leather"]),
    ("viscose", "Viscose", &["rayon", "modal", "lyocell", "tencel"]),
    ("nylon", "Nylon", &["polyamide"]),
    ("elastane", "Elastane", &["spandex", "lycra"]),
    ("acrylic", "Acrylic", &[]),
    ("fleece", "Fleece", &["polar fleece"]),
    ("down", "Down", &["feather", "goose down", "duck down"]),
    ("canvas", "Canvas", &[]),
    ("rubber", "Rubber", &[]),
    ("wood", "Wood", &["wooden", "oak", "pine", "walnut"]),
    ("metal", "Metal", &["steel", "iron", "aluminium", "aluminum", "brass"]),
    ("glass", "Glass", &[]),
    ("ceramic", "Ceramic", &["porcelain", "stoneware"]),
    ("plastic", "Plastic", &[]),
];

/// A small static list of canonical values with aliases
#[derive(Debug)]
pub struct ReferenceTable {
    name: String,
    snapshot: IndexSnapshot,
}

impl ReferenceTable {
    /// Build a table from caller-supplied entries
    pub fn from_entries(
        name: impl Into<String>,
        entries: Vec<CandidateRecord>,
        options: SearchOptions,
    ) -> Self {
        Self {
            name: name.into(),
            snapshot: IndexSnapshot::from_records(entries, options),
        }
    }

    /// Built-in color table
    pub fn colors(options: SearchOptions) -> Self {
        Self::from_entries("colors", builtin(COLORS), options)
    }

    /// Built-in material table
    pub fn materials(options: SearchOptions) -> Self {
        Self::from_entries("materials", builtin(MATERIALS), options)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn snapshot(&self) -> &IndexSnapshot {
        &self.snapshot
    }

    /// Exact-then-fuzzy lookup of a raw label
    pub fn resolve(&self, matcher: &FuzzyMatcher, raw: &str) -> MatchResult {
        matcher.match_query(raw, &self.snapshot)
    }
}

fn builtin(table: &[(&str, &str, &[&str])]) -> Vec<CandidateRecord> {
    table
        .iter()
        .map(|(id, name, aliases)| {
            CandidateRecord::new(*id, *name).with_aliases(aliases.iter().copied())
        })
        .collect()
}
