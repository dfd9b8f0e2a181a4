//! Decklists resolved against the combined card CSV.
//!
//! Cards are keyed by lowercased name, lowercased set code and collector
//! number. A decklist line reads `<count> <card name> [<set code> <number>]`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Number of cards in a legal deck
pub const DECK_SIZE: usize = 20;

/// Energy types whose cards are all Pokémon
const POKEMON_TYPES: [&str; 10] = [
    "Metal",
    "Dragon",
    "Fire",
    "Lightning",
    "Darkness",
    "Water",
    "Grass",
    "Psychic",
    "Colorless",
    "Fighting",
];

/// Set code or collector number token
static CODE_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9-]+$").expect("code token pattern is valid"));

#[derive(Debug, Error)]
pub enum DeckError {
    #[error("failed to read card data from {}: {source}", .path.display())]
    CardData {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("decklist must contain exactly {expected} cards, found {found}")]
    Size { expected: usize, found: usize },
}

/// One row of the combined CSV, as far as decks need it
#[derive(Debug, Deserialize)]
struct CardRecord {
    card_name: String,
    #[serde(default)]
    set_code: String,
    card_number: String,
    card_type: String,
    pokemon_stage: String,
    ex: String,
    #[serde(default)]
    evolves_from: String,
    #[serde(default)]
    card_rarity: String,
}

/// Normalized card properties; all text is lowercase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardInfo {
    pub name: String,
    /// `pokemon` for any energy type, otherwise the lowercased type
    pub card_type: String,
    pub stage: String,
    pub ex: bool,
    pub evolves_from: Option<String>,
    pub rarity: String,
}

impl CardInfo {
    fn from_record(record: CardRecord) -> Self {
        let card_type = record.card_type.trim();
        let card_type = if POKEMON_TYPES.contains(&card_type) {
            "pokemon".to_string()
        } else {
            card_type.to_lowercase()
        };

        let evolves_from = record.evolves_from.trim().to_lowercase();
        let evolves_from =
            (!evolves_from.is_empty() && evolves_from != "n/a").then_some(evolves_from);

        Self {
            name: record.card_name.trim().to_lowercase(),
            card_type,
            stage: record.pokemon_stage.trim().to_lowercase(),
            ex: record.ex.trim().eq_ignore_ascii_case("yes"),
            evolves_from,
            rarity: record.card_rarity.trim().to_lowercase(),
        }
    }

    pub fn is_basic(&self) -> bool {
        self.card_type == "pokemon" && self.stage == "basic"
    }

    pub fn is_stage2(&self) -> bool {
        self.stage == "stage2"
    }

    pub fn is_rare_candy(&self) -> bool {
        self.name.contains("rare candy")
    }
}

type CardKey = (String, String, String);

/// Collector numbers compare numerically when they are all digits ("001" == "1")
fn normalize_number(number: &str) -> String {
    let number = number.trim();
    if !number.is_empty() && number.chars().all(|c| c.is_ascii_digit()) {
        let stripped = number.trim_start_matches('0');
        let digits = if stripped.is_empty() { "0" } else { stripped };
        digits.to_string()
    } else {
        number.to_string()
    }
}

/// Split `Froakie A1 87` into name, set code and number
fn parse_card_string(card: &str) -> (String, Option<String>, Option<String>) {
    let mut name_parts = Vec::new();
    let mut set_code = None;
    let mut number = None;

    for token in card.split_whitespace().rev() {
        if CODE_TOKEN.is_match(token) && number.is_none() {
            number = Some(normalize_number(token));
        } else if CODE_TOKEN.is_match(token) && set_code.is_none() {
            set_code = Some(token.to_lowercase());
        } else {
            name_parts.push(token);
        }
    }
    name_parts.reverse();

    (name_parts.join(" ").to_lowercase(), set_code, number)
}

/// Cards from the combined CSV, in file order
#[derive(Debug, Default)]
pub struct CardDatabase {
    entries: Vec<(CardKey, CardInfo)>,
    index: HashMap<CardKey, usize>,
}

impl CardDatabase {
    /// Load the combined CSV written by the combine step
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DeckError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| DeckError::CardData {
            path: path.to_path_buf(),
            source: e.into(),
        })?;

        let database = Self::from_reader(file).map_err(|source| DeckError::CardData {
            path: path.to_path_buf(),
            source,
        })?;

        info!(path = %path.display(), cards = database.len(), "Card data loaded");
        Ok(database)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, csv::Error> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut database = Self::default();
        for record in reader.deserialize::<CardRecord>() {
            let record = record?;
            let key = (
                record.card_name.trim().to_lowercase(),
                record.set_code.trim().to_lowercase(),
                normalize_number(&record.card_number),
            );
            database.insert(key, CardInfo::from_record(record));
        }

        Ok(database)
    }

    /// Later rows replace earlier ones but keep their position
    fn insert(&mut self, key: CardKey, info: CardInfo) {
        match self.index.get(&key) {
            Some(&idx) => self.entries[idx].1 = info,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, info));
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a card string; without an exact match, the first card with the
    /// same name (and set code, if given) wins
    pub fn lookup(&self, card: &str) -> Option<&CardInfo> {
        let (name, set_code, number) = parse_card_string(card);
        let key = (
            name.clone(),
            set_code.clone().unwrap_or_default(),
            number.unwrap_or_default(),
        );

        if let Some(&idx) = self.index.get(&key) {
            return Some(&self.entries[idx].1);
        }

        let found = self
            .entries
            .iter()
            .find(|((entry_name, entry_set, _), _)| {
                *entry_name == name && set_code.as_ref().map_or(true, |set| entry_set == set)
            })
            .map(|(_, info)| info);

        if found.is_none() {
            warn!(card = %name, "Card not found in card data");
        }
        found
    }

    /// Follow evolves-from links down to the basic Pokémon
    pub fn basic_ancestor(&self, name: &str) -> String {
        let mut current = name.trim().to_lowercase();
        let mut visited = HashSet::new();

        while !current.is_empty() && visited.insert(current.clone()) {
            let Some(info) = self
                .entries
                .iter()
                .map(|(_, info)| info)
                .find(|info| info.name == current)
            else {
                break;
            };

            match &info.evolves_from {
                Some(previous) => current = previous.clone(),
                None => return current,
            }
        }

        current
    }
}

/// Parse a decklist into one entry per card copy
///
/// Lines that do not start with a count are skipped, as are cards missing
/// from the card data.
pub fn parse_decklist(text: &str, database: &CardDatabase) -> Result<Vec<CardInfo>, DeckError> {
    let mut deck = Vec::new();

    for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
        let Some((count, card)) = line.split_once(char::is_whitespace) else {
            continue;
        };
        let Ok(count) = count.parse::<usize>() else {
            debug!(line = line, "Skipping line without card count");
            continue;
        };

        if let Some(info) = database.lookup(card.trim()) {
            deck.extend(std::iter::repeat(info.clone()).take(count));
        }
    }

    if deck.len() != DECK_SIZE {
        warn!(found = deck.len(), "Decklist does not contain {} cards", DECK_SIZE);
        return Err(DeckError::Size {
            expected: DECK_SIZE,
            found: deck.len(),
        });
    }

    for (card, basic) in missing_basics(&deck, database) {
        warn!(
            card = %card,
            basic = %basic,
            "Stage 2 and Rare Candy present, but the basic it evolves from is missing"
        );
    }

    Ok(deck)
}

/// Stage 2 cards that Rare Candy could target but whose basic is absent
pub fn missing_basics(deck: &[CardInfo], database: &CardDatabase) -> Vec<(String, String)> {
    if !deck.iter().any(CardInfo::is_rare_candy) {
        return Vec::new();
    }

    let names: HashSet<&str> = deck.iter().map(|card| card.name.as_str()).collect();
    let mut missing = Vec::new();

    for card in deck.iter().filter(|card| card.is_stage2()) {
        let basic = match &card.evolves_from {
            Some(previous) => database.basic_ancestor(previous),
            None => card.name.clone(),
        };
        if !basic.is_empty() && !names.contains(basic.as_str()) {
            missing.push((card.name.clone(), basic));
        }
    }

    missing.dedup();
    missing
}
