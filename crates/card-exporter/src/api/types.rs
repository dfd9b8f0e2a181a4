//! TCGdex API v2 response types.
//!
//! These types represent the JSON responses from the TCGdex API. Only the
//! fields the exporter reads are modelled; everything else is ignored.

use serde::{Deserialize, Deserializer, Serialize};

/// Full set, as returned by `/sets/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetDetails {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub card_count: Option<CardCount>,
    /// Card references in catalog order
    #[serde(default)]
    pub cards: Vec<CardBrief>,
    #[serde(default)]
    pub boosters: Option<Vec<Booster>>,
}

/// Card counts of a set
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CardCount {
    #[serde(default)]
    pub total: Option<u32>,
    #[serde(default)]
    pub official: Option<u32>,
}

/// Card reference inside a set listing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardBrief {
    pub id: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub local_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Booster pack
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booster {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
}

/// Full card, as returned by `/cards/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDetails {
    pub id: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub local_id: Option<String>,
    pub name: String,

    // Classification
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub rarity: Option<NamedValue>,
    #[serde(default)]
    pub stage: Option<NamedValue>,
    #[serde(default)]
    pub types: Option<Vec<String>>,
    #[serde(default)]
    pub subtypes: Option<Vec<String>>,
    #[serde(default)]
    pub suffix: Option<String>,
    /// Older spelling of `suffix`; some payloads carry both
    #[serde(default)]
    pub suffixe: Option<String>,

    // Evolution
    #[serde(default)]
    pub evolve_from: Option<String>,

    #[serde(default)]
    pub boosters: Option<Vec<Booster>>,
}

/// A field the catalog sends either as a plain string or as `{ "name": ... }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NamedValue {
    Text(String),
    Named {
        #[serde(default)]
        name: Option<String>,
    },
}

impl NamedValue {
    /// The display name, if any
    pub fn name(&self) -> Option<&str> {
        match self {
            NamedValue::Text(text) => Some(text),
            NamedValue::Named { name } => name.as_deref(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Number(serde_json::Number),
}

/// Accept local ids sent as `"12"` or `12`
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<StringOrNumber>::deserialize(deserializer)?;
    Ok(value.map(|v| match v {
        StringOrNumber::String(s) => s,
        StringOrNumber::Number(n) => n.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_deserializes_catalog_shape() {
        let set: SetDetails = serde_json::from_value(json!({
            "id": "A1",
            "name": "Genetic Apex",
            "releaseDate": "2024-10-30",
            "cardCount": { "total": 286, "official": 226, "firstEd": 0 },
            "cards": [
                { "id": "A1-001", "localId": "001", "name": "Bulbasaur", "image": "https://assets" },
                { "id": "A1-002", "localId": 2, "name": "Ivysaur" }
            ],
            "boosters": [{ "id": "boo_A1-mewtwo", "name": "Mewtwo" }],
            "serie": { "id": "tcgp", "name": "Pokémon TCG Pocket" }
        }))
        .unwrap();

        assert_eq!(set.release_date.as_deref(), Some("2024-10-30"));
        assert_eq!(set.card_count.as_ref().and_then(|c| c.official), Some(226));
        assert_eq!(set.cards.len(), 2);
        assert_eq!(set.cards[1].local_id.as_deref(), Some("2"));
        assert_eq!(set.boosters.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn test_set_without_optional_fields() {
        let set: SetDetails =
            serde_json::from_value(json!({ "id": "P-A", "name": "Promo-A" })).unwrap();

        assert!(set.release_date.is_none());
        assert!(set.card_count.is_none());
        assert!(set.cards.is_empty());
        assert!(set.boosters.is_none());
    }

    #[test]
    fn test_named_value_accepts_string_or_object() {
        let card: CardDetails = serde_json::from_value(json!({
            "id": "A1-129",
            "localId": "129",
            "name": "Mewtwo ex",
            "rarity": "Four Diamond",
            "stage": { "name": "Basic" },
            "evolveFrom": null,
            "suffixe": "EX"
        }))
        .unwrap();

        assert_eq!(card.rarity, Some(NamedValue::Text("Four Diamond".to_string())));
        assert_eq!(card.stage.as_ref().and_then(NamedValue::name), Some("Basic"));
        assert!(card.evolve_from.is_none());
        assert!(card.suffix.is_none());
        assert_eq!(card.suffixe.as_deref(), Some("EX"));
    }

    #[test]
    fn test_card_with_both_suffix_spellings() {
        let card: CardDetails = serde_json::from_value(json!({
            "id": "A1-129",
            "name": "Mewtwo",
            "suffix": "EX",
            "suffixe": "ex"
        }))
        .unwrap();

        assert_eq!(card.suffix.as_deref(), Some("EX"));
        assert_eq!(card.suffixe.as_deref(), Some("ex"));
    }

    #[test]
    fn test_named_object_without_name() {
        let value: NamedValue = serde_json::from_value(json!({ "id": 3 })).unwrap();
        assert_eq!(value.name(), None);
    }
}
