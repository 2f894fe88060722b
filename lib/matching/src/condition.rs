use serde::{Deserialize, Serialize};

/// Canonical item condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    NewWithTags,
    NewWithoutTags,
    VeryGood,
    /// Fallback for anything unrecognized
    #[default]
    Good,
    Fair,
    Poor,
}

impl Condition {
    pub fn id(&self) -> &'static str {
        match self {
            Condition::NewWithTags => "new_with_tags",
            Condition::NewWithoutTags => "new_without_tags",
            Condition::VeryGood => "very_good",
            Condition::Good => "good",
            Condition::Fair => "fair",
            Condition::Poor => "poor",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Condition::NewWithTags => "New with tags",
            Condition::NewWithoutTags => "New without tags",
            Condition::VeryGood => "Very good",
            Condition::Good => "Good",
            Condition::Fair => "Fair",
            Condition::Poor => "Poor",
        }
    }

    /// Case-insensitive lookup; `-`, `_` and repeated spaces are ignored
    pub fn parse(raw: &str) -> Option<Condition> {
        let folded: String = raw
            .chars()
            .map(|c| if c == '-' || c == '_' { ' ' } else { c })
            .collect();
        let key = attrx_core::text::exact_key(&folded);

        let condition = match key.as_str() {
            "new with tags" | "new with tag" | "nwt" | "brand new" | "new" => Condition::NewWithTags,
            "new without tags" | "new without tag" | "nwot" | "like new" | "as new" | "mint" => {
                Condition::NewWithoutTags
            }
            "very good" | "excellent" | "great" | "gently used" => Condition::VeryGood,
            "good" | "used" | "used good" | "pre owned" => Condition::Good,
            "fair" | "acceptable" | "satisfactory" | "worn" | "used fair" => Condition::Fair,
            "poor" | "damaged" | "for parts" | "heavily used" => Condition::Poor,
            _ => return None,
        };
        Some(condition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_variants() {
        assert_eq!(Condition::parse("NWT"), Some(Condition::NewWithTags));
        assert_eq!(Condition::parse("new_with_tags"), Some(Condition::NewWithTags));
        assert_eq!(Condition::parse("Like-New"), Some(Condition::NewWithoutTags));
        assert_eq!(Condition::parse("  very   good "), Some(Condition::VeryGood));
        assert_eq!(Condition::parse("pre-owned"), Some(Condition::Good));
        assert_eq!(Condition::parse("Damaged"), Some(Condition::Poor));
    }

    #[test]
    fn test_unknown_is_none() {
        assert_eq!(Condition::parse("vintage-ish"), None);
        assert_eq!(Condition::parse(""), None);
        assert_eq!(Condition::default(), Condition::Good);
    }

    #[test]
    fn test_ids_round_trip_through_parse() {
        for c in [
            Condition::NewWithTags,
            Condition::NewWithoutTags,
            Condition::VeryGood,
            Condition::Good,
            Condition::Fair,
            Condition::Poor,
        ] {
            assert_eq!(Condition::parse(c.id()), Some(c));
            assert_eq!(serde_json::to_value(c).unwrap(), c.id());
        }
    }
}
