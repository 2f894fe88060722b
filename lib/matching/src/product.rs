//! Raw and normalized product attribute records
//!
//! Field names on the normalized side are the compatibility surface for
//! presentation layers and serialize as camelCase.

use crate::fuzzy::Suggestion;
use attrx_core::confidence::{clamp_unit, tier_of, ConfidenceTier};
use serde::{Deserialize, Serialize};

fn default_confidence() -> f64 {
    1.0
}

/// Attribute bag as handed over by the producer (AI model or manual entry)
///
/// Every field is optional; a missing global confidence is treated as 1.0
/// (manually entered data).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAttributes {
    /// Top-level department ("Women", "Men", ...) scoping the category lookup
    #[serde(default, alias = "genre", alias = "gender")]
    pub department: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub material: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default = "default_confidence")]
    pub confidence: f64,
}

impl Default for RawAttributes {
    fn default() -> Self {
        Self {
            department: None,
            category: None,
            color: None,
            material: None,
            brand: None,
            condition: None,
            confidence: default_confidence(),
        }
    }
}

impl RawAttributes {
    /// Producer confidence clamped into [0, 1]
    pub fn global_confidence(&self) -> f64 {
        clamp_unit(self.confidence)
    }
}

/// Trimmed value of an optional raw field, `None` when blank
pub(crate) fn present(field: Option<&str>) -> Option<&str> {
    field.map(str::trim).filter(|s| !s.is_empty())
}

/// One resolved attribute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedAttribute {
    /// Canonical id, empty when unvalidated
    pub id: String,
    pub display_name: String,
    pub confidence: f64,
    pub validated: bool,
    pub tier: ConfidenceTier,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub needs_confirmation: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<Suggestion>,
}

impl NormalizedAttribute {
    pub fn validated(id: impl Into<String>, display_name: impl Into<String>, confidence: f64) -> Self {
        Self::build(id.into(), display_name.into(), confidence, true)
    }

    /// Keep the raw label as-is; nothing in the reference data matched
    pub fn unvalidated(raw: impl Into<String>, confidence: f64) -> Self {
        Self::build(String::new(), raw.into(), confidence, false)
    }

    /// Field missing from the producer output
    pub fn empty() -> Self {
        Self::build(String::new(), String::new(), 0.0, false)
    }

    #[must_use]
    pub fn with_confirmation(mut self, needs_confirmation: bool, suggestions: Vec<Suggestion>) -> Self {
        self.needs_confirmation = needs_confirmation;
        self.suggestions = suggestions;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.display_name.is_empty()
    }

    fn build(id: String, display_name: String, confidence: f64, validated: bool) -> Self {
        let confidence = clamp_unit(confidence);
        Self {
            id,
            display_name,
            confidence,
            validated,
            tier: tier_of(confidence),
            needs_confirmation: false,
            suggestions: Vec::new(),
        }
    }
}

/// Category attribute with its place in the taxonomy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedCategory {
    #[serde(flatten)]
    pub attribute: NormalizedAttribute,
    pub path: Vec<String>,
    pub full_label: String,
    pub icon: String,
}

/// All attributes of one product, resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedProduct {
    pub category: NormalizedCategory,
    pub color: NormalizedAttribute,
    pub material: NormalizedAttribute,
    pub brand: NormalizedAttribute,
    pub condition: NormalizedAttribute,
    /// Producer input, untouched
    pub raw: RawAttributes,
    /// Producer confidence, clamped into [0, 1]
    pub confidence: f64,
}

impl NormalizedProduct {
    /// Fields that need a human look before publishing
    pub fn unverified_fields(&self) -> Vec<&'static str> {
        let fields = [
            ("category", &self.category.attribute),
            ("color", &self.color),
            ("material", &self.material),
            ("brand", &self.brand),
            ("condition", &self.condition),
        ];
        fields
            .into_iter()
            .filter(|(_, attr)| !attr.is_empty() && (!attr.validated || attr.needs_confirmation))
            .map(|(name, _)| name)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_defaults_and_aliases() {
        let raw: RawAttributes =
            serde_json::from_str(r#"{"genre": "Women", "brand": null}"#).unwrap();
        assert_eq!(raw.department.as_deref(), Some("Women"));
        assert!(raw.brand.is_none());
        assert_eq!(raw.confidence, 1.0);
    }

    #[test]
    fn test_global_confidence_clamped() {
        let raw = RawAttributes {
            confidence: 3.0,
            ..RawAttributes::default()
        };
        assert_eq!(raw.global_confidence(), 1.0);
    }

    #[test]
    fn test_present() {
        assert_eq!(present(Some("  Nike ")), Some("Nike"));
        assert_eq!(present(Some("   ")), None);
        assert_eq!(present(None), None);
    }

    #[test]
    fn test_attribute_tier_follows_confidence() {
        let attr = NormalizedAttribute::unvalidated("Teal-ish", 0.45);
        assert_eq!(attr.tier, ConfidenceTier::Medium);
        assert_eq!(attr.confidence, 0.45);
        assert!(attr.id.is_empty());

        let attr = NormalizedAttribute::validated("grey", "Grey", 1.4);
        assert_eq!(attr.confidence, 1.0);
        assert_eq!(attr.tier, ConfidenceTier::High);
    }

    #[test]
    fn test_category_serializes_flat() {
        let category = NormalizedCategory {
            attribute: NormalizedAttribute::validated("women-tops-t-shirts", "T-Shirts", 0.8),
            path: vec!["Women".into(), "Tops".into(), "T-Shirts".into()],
            full_label: "Women > Tops > T-Shirts".into(),
            icon: "shirt".into(),
        };
        let json = serde_json::to_value(&category).unwrap();
        assert_eq!(json["displayName"], "T-Shirts");
        assert_eq!(json["fullLabel"], "Women > Tops > T-Shirts");
        assert_eq!(json["tier"], "high");
        assert!(json.get("needsConfirmation").is_none());
    }
}
