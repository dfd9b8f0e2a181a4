//! Card exporter library for turning TCGdex card sets into CSV files.
//!
//! This library fetches set and card metadata from the TCGdex API v2,
//! flattens every card into an export row and writes one CSV per set.
//! Decklists can be checked against the combined CSV.

pub mod api;
pub mod deck;
pub mod error;
pub mod exporter;
pub mod transform;
pub mod writer;

pub use api::{CatalogProvider, TcgdexClient};
pub use deck::{parse_decklist, CardDatabase, CardInfo, DeckError};
pub use error::{ExportError, ExportResult};
pub use exporter::{ExportStats, Exporter, SetExport};
pub use writer::{combine_csv_files, write_set_csv, CombineStats};
