//! Data models for the export pipeline.
//!
//! One `ExportRow` is written per card; its field order is the CSV column order.

use serde::{Serialize, Serializer};

/// Placeholder written for any optional value that is absent.
pub const NOT_AVAILABLE: &str = "N/A";

/// Fixed column header of every exported CSV file.
pub const CSV_HEADER: [&str; 12] = [
    "set_name",
    "set_code",
    "set_release_date",
    "set_total_cards",
    "pack_name",
    "card_name",
    "card_number",
    "card_rarity",
    "card_type",
    "pokemon_stage",
    "evolves_from",
    "ex",
];

/// Flattened set + card record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRow {
    // Set fields (constant within one set's export)
    pub set_name: String,
    pub set_code: String,
    pub set_release_date: String,
    pub set_total_cards: String,

    pub pack_name: String,

    // Card fields
    pub card_name: String,
    pub card_number: String,
    pub card_rarity: String,
    pub card_type: String,
    pub pokemon_stage: String,
    pub evolves_from: String,

    /// Enhanced (EX) card variant
    #[serde(serialize_with = "yes_no")]
    pub ex: bool,
}

fn yes_no<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(if *value { "Yes" } else { "No" })
}
