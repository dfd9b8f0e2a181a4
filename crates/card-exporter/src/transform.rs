//! Flattening of catalog records into export rows.

use crate::api::{Booster, CardDetails, NamedValue, SetDetails};
use once_cell::sync::Lazy;
use regex::Regex;
use shared::{ExportRow, NOT_AVAILABLE};

/// Standalone "ex" token in a card name, e.g. "Mewtwo ex"
///
/// The word boundary is ASCII-only, so a following accented letter still ends the token.
static EX_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(^|\s)ex((?-u:\b)|$)").expect("EX name pattern is valid")
});

/// Set-level columns shared by every row of one set
#[derive(Debug, Clone)]
pub struct SetColumns {
    pub name: String,
    pub code: String,
    pub release_date: String,
    pub total_cards: String,
    /// Pack name used for cards without booster association
    pub fallback_pack: String,
}

impl SetColumns {
    pub fn from_set(set: &SetDetails) -> Self {
        Self {
            name: set.name.clone(),
            code: set.id.clone(),
            release_date: non_empty(set.release_date.as_deref()),
            total_cards: total_cards(set),
            fallback_pack: fallback_pack_name(set),
        }
    }
}

/// Set booster names joined, or the set name when the set has none
pub fn fallback_pack_name(set: &SetDetails) -> String {
    set.boosters
        .as_deref()
        .and_then(join_booster_names)
        .unwrap_or_else(|| set.name.clone())
}

/// Official count, else total count; zero counts as missing
fn total_cards(set: &SetDetails) -> String {
    let count = set.card_count.as_ref().and_then(|count| {
        count
            .official
            .filter(|&n| n > 0)
            .or(count.total.filter(|&n| n > 0))
    });
    count
        .map(|n| n.to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn join_booster_names(boosters: &[Booster]) -> Option<String> {
    let joined = boosters
        .iter()
        .map(|b| b.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    (!joined.is_empty()).then_some(joined)
}

fn non_empty(value: Option<&str>) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or(NOT_AVAILABLE)
        .to_string()
}

fn named(value: Option<&NamedValue>) -> String {
    non_empty(value.and_then(NamedValue::name))
}

/// Types joined; the category is used only when there are no types
pub fn card_type(card: &CardDetails) -> String {
    let types = card.types.as_deref().unwrap_or_default().join(", ");
    if types.is_empty() {
        non_empty(card.category.as_deref())
    } else {
        types
    }
}

/// Whether the card is an EX variant
pub fn is_ex(card: &CardDetails) -> bool {
    let name_match = EX_NAME.is_match(&card.name);
    let subtype_match = card
        .subtypes
        .as_ref()
        .map(|subtypes| subtypes.iter().any(|s| s == "EX"))
        .unwrap_or(false);
    let suffix_match = [card.suffix.as_deref(), card.suffixe.as_deref()]
        .into_iter()
        .flatten()
        .any(|suffix| suffix.eq_ignore_ascii_case("ex"));

    name_match || subtype_match || suffix_match
}

/// Build the export row for one card of a set
pub fn build_row(set: &SetColumns, card: &CardDetails) -> ExportRow {
    let pack_name = card
        .boosters
        .as_deref()
        .and_then(join_booster_names)
        .unwrap_or_else(|| set.fallback_pack.clone());

    let card_number = card
        .local_id
        .clone()
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| card.id.clone());

    ExportRow {
        set_name: set.name.clone(),
        set_code: set.code.clone(),
        set_release_date: set.release_date.clone(),
        set_total_cards: set.total_cards.clone(),
        pack_name,
        card_name: card.name.clone(),
        card_number,
        card_rarity: named(card.rarity.as_ref()),
        card_type: card_type(card),
        pokemon_stage: named(card.stage.as_ref()),
        // An empty evolves-from is kept as-is; only a missing one becomes N/A
        evolves_from: card
            .evolve_from
            .clone()
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        ex: is_ex(card),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::CardCount;

    fn set_with(boosters: Option<Vec<&str>>) -> SetDetails {
        SetDetails {
            id: "A1".to_string(),
            name: "Genetic Apex".to_string(),
            release_date: Some("2024-10-30".to_string()),
            card_count: Some(CardCount {
                total: Some(286),
                official: Some(226),
            }),
            cards: Vec::new(),
            boosters: boosters.map(|names| {
                names
                    .into_iter()
                    .map(|name| Booster {
                        id: None,
                        name: name.to_string(),
                    })
                    .collect()
            }),
        }
    }

    fn card(name: &str) -> CardDetails {
        CardDetails {
            id: "A1-001".to_string(),
            local_id: Some("001".to_string()),
            name: name.to_string(),
            category: Some("Pokemon".to_string()),
            rarity: None,
            stage: None,
            types: None,
            subtypes: None,
            suffix: None,
            suffixe: None,
            evolve_from: None,
            boosters: None,
        }
    }

    #[test]
    fn test_fallback_pack_joins_set_boosters() {
        let set = set_with(Some(vec!["Mewtwo", "Charizard", "Pikachu"]));
        assert_eq!(fallback_pack_name(&set), "Mewtwo, Charizard, Pikachu");
    }

    #[test]
    fn test_fallback_pack_uses_set_name_without_boosters() {
        assert_eq!(fallback_pack_name(&set_with(None)), "Genetic Apex");
        assert_eq!(fallback_pack_name(&set_with(Some(vec![]))), "Genetic Apex");
    }

    #[test]
    fn test_card_without_boosters_inherits_fallback() {
        let set = SetColumns::from_set(&set_with(Some(vec!["Mewtwo", "Pikachu"])));
        let row = build_row(&set, &card("Bulbasaur"));
        assert_eq!(row.pack_name, "Mewtwo, Pikachu");

        let mut own = card("Bulbasaur");
        own.boosters = Some(vec![Booster {
            id: None,
            name: "Mewtwo".to_string(),
        }]);
        assert_eq!(build_row(&set, &own).pack_name, "Mewtwo");
    }

    #[test]
    fn test_total_cards_prefers_official() {
        let mut set = set_with(None);
        assert_eq!(SetColumns::from_set(&set).total_cards, "226");

        set.card_count = Some(CardCount {
            total: Some(24),
            official: Some(0),
        });
        assert_eq!(SetColumns::from_set(&set).total_cards, "24");

        set.card_count = None;
        assert_eq!(SetColumns::from_set(&set).total_cards, NOT_AVAILABLE);
    }

    #[test]
    fn test_missing_release_date() {
        let mut set = set_with(None);
        set.release_date = Some(String::new());
        assert_eq!(SetColumns::from_set(&set).release_date, NOT_AVAILABLE);
    }

    #[test]
    fn test_missing_optional_fields_default_to_na() {
        let set = SetColumns::from_set(&set_with(None));
        let mut c = card("Potion");
        c.category = None;
        let row = build_row(&set, &c);

        assert_eq!(row.card_rarity, NOT_AVAILABLE);
        assert_eq!(row.pokemon_stage, NOT_AVAILABLE);
        assert_eq!(row.card_type, NOT_AVAILABLE);
        assert_eq!(row.evolves_from, NOT_AVAILABLE);
    }

    #[test]
    fn test_named_fields() {
        let set = SetColumns::from_set(&set_with(None));
        let mut c = card("Ivysaur");
        c.rarity = Some(NamedValue::Named {
            name: Some("Two Diamond".to_string()),
        });
        c.stage = Some(NamedValue::Text("Stage1".to_string()));
        c.evolve_from = Some("Bulbasaur".to_string());

        let row = build_row(&set, &c);
        assert_eq!(row.card_rarity, "Two Diamond");
        assert_eq!(row.pokemon_stage, "Stage1");
        assert_eq!(row.evolves_from, "Bulbasaur");
    }

    #[test]
    fn test_card_number_falls_back_to_id() {
        let set = SetColumns::from_set(&set_with(None));
        let mut c = card("Bulbasaur");
        c.local_id = None;
        assert_eq!(build_row(&set, &c).card_number, "A1-001");

        c.local_id = Some(String::new());
        assert_eq!(build_row(&set, &c).card_number, "A1-001");
    }

    #[test]
    fn test_card_type_falls_back_to_category_only_when_types_empty() {
        let mut c = card("Bulbasaur");
        assert_eq!(card_type(&c), "Pokemon");

        c.types = Some(vec![]);
        assert_eq!(card_type(&c), "Pokemon");

        c.types = Some(vec!["Grass".to_string(), "Water".to_string()]);
        assert_eq!(card_type(&c), "Grass, Water");
    }

    #[test]
    fn test_ex_from_name() {
        assert!(is_ex(&card("Mewtwo ex")));
        assert!(is_ex(&card("Pikachu EX")));
        assert!(is_ex(&card("ex")));
        assert!(!is_ex(&card("Exeggcute")));
        assert!(!is_ex(&card("Alex")));
        assert!(!is_ex(&card("Mewtwo")));
    }

    #[test]
    fn test_ex_from_subtypes_and_suffix() {
        let mut c = card("Mewtwo");
        c.subtypes = Some(vec!["Basic".to_string(), "EX".to_string()]);
        assert!(is_ex(&c));

        c.subtypes = Some(vec!["ex".to_string()]);
        assert!(!is_ex(&c));

        c.suffix = Some("EX".to_string());
        assert!(is_ex(&c));

        c.suffix = Some("V".to_string());
        c.suffixe = Some("ex".to_string());
        assert!(is_ex(&c));
    }

    #[test]
    fn test_ex_followed_by_non_ascii_letter() {
        assert!(is_ex(&card("Mew exé")));
        assert!(!is_ex(&card("Mew exa")));
    }

    #[test]
    fn test_empty_evolves_from_is_kept() {
        let set = SetColumns::from_set(&set_with(None));
        let mut c = card("Bulbasaur");
        c.evolve_from = Some(String::new());

        assert_eq!(build_row(&set, &c).evolves_from, "");
    }

    #[test]
    fn test_set_fields_copied_to_row() {
        let set = SetColumns::from_set(&set_with(None));
        let row = build_row(&set, &card("Bulbasaur"));
        assert_eq!(row.set_name, "Genetic Apex");
        assert_eq!(row.set_code, "A1");
        assert_eq!(row.set_release_date, "2024-10-30");
        assert_eq!(row.set_total_cards, "226");
    }
}
