//! Attribute normalizer
//!
//! Turns one [`RawAttributes`] bag into one [`NormalizedProduct`]. Each field
//! is resolved on its own; a field that cannot be validated keeps its raw
//! label with a penalized confidence instead of failing the record.
//!
//! Confidence per field:
//!
//! | field              | validated                | unvalidated         |
//! |--------------------|--------------------------|---------------------|
//! | brand              | match confidence         | penalty × global    |
//! | category/color/material | match × global      | penalty × global    |
//! | condition          | global                   | penalty × global    |
//!
//! Missing fields produce [`NormalizedAttribute::empty`].

use crate::condition::Condition;
use crate::fuzzy::FuzzyMatcher;
use crate::product::{present, NormalizedAttribute, NormalizedCategory, NormalizedProduct, RawAttributes};
use crate::reference::ReferenceTable;
use crate::taxonomy::{Taxonomy, DEFAULT_ICON};
use attrx_core::snapshot::SearchOptions;
use attrx_core::{CandidateIndex, MatchConfig, Result};
use std::sync::Arc;
use tracing::debug;

pub struct AttributeNormalizer {
    matcher: FuzzyMatcher,
    brands: Arc<CandidateIndex>,
    taxonomy: Arc<Taxonomy>,
    colors: Arc<ReferenceTable>,
    materials: Arc<ReferenceTable>,
    penalty: f64,
}

impl AttributeNormalizer {
    /// Normalizer over a brand index and the built-in reference data
    pub fn new(config: &MatchConfig, brands: Arc<CandidateIndex>) -> Self {
        let options = SearchOptions::from(config);
        Self {
            matcher: FuzzyMatcher::new(config),
            brands,
            taxonomy: Arc::new(Taxonomy::builtin(options)),
            colors: Arc::new(ReferenceTable::colors(options)),
            materials: Arc::new(ReferenceTable::materials(options)),
            penalty: config.unvalidated_penalty,
        }
    }

    #[must_use]
    pub fn with_taxonomy(mut self, taxonomy: Arc<Taxonomy>) -> Self {
        self.taxonomy = taxonomy;
        self
    }

    #[must_use]
    pub fn with_colors(mut self, colors: Arc<ReferenceTable>) -> Self {
        self.colors = colors;
        self
    }

    #[must_use]
    pub fn with_materials(mut self, materials: Arc<ReferenceTable>) -> Self {
        self.materials = materials;
        self
    }

    pub fn brands(&self) -> &Arc<CandidateIndex> {
        &self.brands
    }

    /// Resolve every field of `raw`
    ///
    /// The only error is [`attrx_core::Error::SourceUnavailable`] from the
    /// brand index when it has never been built and its source is down.
    pub fn normalize(&self, raw: &RawAttributes) -> Result<NormalizedProduct> {
        let global = raw.global_confidence();
        let brand = self.normalize_brand(raw.brand.as_deref(), global)?;

        Ok(NormalizedProduct {
            category: self.normalize_category(
                raw.department.as_deref(),
                raw.category.as_deref(),
                global,
            ),
            color: self.normalize_color(raw.color.as_deref(), global),
            material: self.normalize_material(raw.material.as_deref(), global),
            brand,
            condition: self.normalize_condition(raw.condition.as_deref(), global),
            raw: raw.clone(),
            confidence: global,
        })
    }

    pub fn normalize_brand(&self, raw: Option<&str>, global: f64) -> Result<NormalizedAttribute> {
        let Some(label) = present(raw) else {
            return Ok(NormalizedAttribute::empty());
        };

        let snapshot = self.brands.get()?;
        let result = self.matcher.match_query(label, &snapshot);

        let attribute = match (&result.candidate_id, &result.candidate_name) {
            (Some(id), Some(name)) if result.is_match() => {
                NormalizedAttribute::validated(id.clone(), name.clone(), result.confidence)
            }
            _ => {
                debug!("brand '{}' not in index, keeping raw label", label);
                NormalizedAttribute::unvalidated(label, self.penalty * global)
            }
        };
        Ok(attribute.with_confirmation(result.needs_confirmation, result.suggestions))
    }

    pub fn normalize_category(
        &self,
        department: Option<&str>,
        raw: Option<&str>,
        global: f64,
    ) -> NormalizedCategory {
        let Some(label) = present(raw) else {
            return NormalizedCategory {
                attribute: NormalizedAttribute::empty(),
                path: Vec::new(),
                full_label: String::new(),
                icon: DEFAULT_ICON.to_string(),
            };
        };

        let found = self
            .taxonomy
            .resolve(&self.matcher, department.unwrap_or(""), label);

        match found.entry {
            Some(entry) => NormalizedCategory {
                attribute: NormalizedAttribute::validated(
                    entry.id.clone(),
                    entry.label(),
                    found.result.confidence * global,
                )
                .with_confirmation(found.result.needs_confirmation, Vec::new()),
                path: entry.path.clone(),
                full_label: entry.full_label(),
                icon: entry.icon().to_string(),
            },
            None => {
                debug!(
                    "category '{}' (department {:?}) not in taxonomy, keeping raw label",
                    label, department
                );
                NormalizedCategory {
                    attribute: NormalizedAttribute::unvalidated(label, self.penalty * global),
                    path: Vec::new(),
                    full_label: label.to_string(),
                    icon: DEFAULT_ICON.to_string(),
                }
            }
        }
    }

    pub fn normalize_color(&self, raw: Option<&str>, global: f64) -> NormalizedAttribute {
        self.normalize_static(&self.colors, raw, global)
    }

    pub fn normalize_material(&self, raw: Option<&str>, global: f64) -> NormalizedAttribute {
        self.normalize_static(&self.materials, raw, global)
    }

    pub fn normalize_condition(&self, raw: Option<&str>, global: f64) -> NormalizedAttribute {
        let Some(label) = present(raw) else {
            return NormalizedAttribute::empty();
        };

        match Condition::parse(label) {
            Some(condition) => {
                NormalizedAttribute::validated(condition.id(), condition.display_name(), global)
            }
            None => {
                debug!("unknown condition '{}', using default", label);
                let fallback = Condition::default();
                NormalizedAttribute {
                    id: fallback.id().to_string(),
                    ..NormalizedAttribute::unvalidated(fallback.display_name(), self.penalty * global)
                }
            }
        }
    }

    fn normalize_static(
        &self,
        table: &ReferenceTable,
        raw: Option<&str>,
        global: f64,
    ) -> NormalizedAttribute {
        let Some(label) = present(raw) else {
            return NormalizedAttribute::empty();
        };

        let result = table.resolve(&self.matcher, label);
        match (&result.candidate_id, &result.candidate_name) {
            (Some(id), Some(name)) if result.is_match() => {
                NormalizedAttribute::validated(id.clone(), name.clone(), result.confidence * global)
                    .with_confirmation(result.needs_confirmation, Vec::new())
            }
            _ => {
                debug!("{} '{}' not in reference table, keeping raw label", table.name(), label);
                NormalizedAttribute::unvalidated(label, self.penalty * global)
            }
        }
    }
}
