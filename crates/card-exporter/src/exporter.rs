//! Main export orchestrator.
//!
//! Processes sets strictly one after another: fetch the set, fetch every card
//! of it concurrently, flatten and write the set's CSV.

use crate::api::CatalogProvider;
use crate::error::ExportResult;
use crate::transform::{build_row, SetColumns};
use crate::writer::write_set_csv;
use futures::future::try_join_all;
use shared::{ExportPaths, ExportRow};
use std::path::PathBuf;
use tracing::info;

/// Statistics for an export run
#[derive(Debug, Clone, Default)]
pub struct ExportStats {
    pub sets_exported: usize,
    pub rows_written: usize,
    pub files: Vec<PathBuf>,
}

/// Result of exporting one set
#[derive(Debug, Clone)]
pub struct SetExport {
    pub set_name: String,
    pub path: PathBuf,
    pub rows: usize,
}

/// Set exporter over any catalog provider
pub struct Exporter<P> {
    provider: P,
    paths: ExportPaths,
}

impl<P: CatalogProvider> Exporter<P> {
    /// Create a new exporter writing into `paths`
    pub fn new(provider: P, paths: ExportPaths) -> Self {
        Self { provider, paths }
    }

    /// Export every set in order, stopping at the first failure
    ///
    /// The output directory must already exist.
    pub async fn run(&self, set_ids: &[String]) -> ExportResult<ExportStats> {
        let mut stats = ExportStats::default();

        for (idx, set_id) in set_ids.iter().enumerate() {
            info!(
                progress = %format!("{}/{}", idx + 1, set_ids.len()),
                set_id = %set_id,
                "Processing set"
            );

            let export = self.export_set(set_id).await?;
            stats.sets_exported += 1;
            stats.rows_written += export.rows;
            stats.files.push(export.path);
        }

        info!(
            sets = stats.sets_exported,
            rows = stats.rows_written,
            "Export complete"
        );

        Ok(stats)
    }

    /// Fetch, flatten and write a single set
    pub async fn export_set(&self, set_id: &str) -> ExportResult<SetExport> {
        let (columns, rows) = self.fetch_set_rows(set_id).await?;

        let path = self.paths.set_csv(set_id, &columns.name);
        let written = write_set_csv(&path, &rows)?;

        info!(
            set_id = set_id,
            rows = written,
            path = %path.display(),
            "Exported set"
        );

        Ok(SetExport {
            set_name: columns.name,
            path,
            rows: written,
        })
    }

    /// Fetch a set and all of its cards as export rows
    pub async fn fetch_set_rows(
        &self,
        set_id: &str,
    ) -> ExportResult<(SetColumns, Vec<ExportRow>)> {
        let set = self.provider.get_set(set_id).await?;
        info!(
            set_id = %set.id,
            set_name = %set.name,
            cards = set.cards.len(),
            "Fetched set"
        );

        // try_join_all yields results in listing order regardless of completion order
        let cards = try_join_all(
            set.cards
                .iter()
                .map(|card| self.provider.get_card(&card.id)),
        )
        .await?;

        let columns = SetColumns::from_set(&set);
        let rows = cards.iter().map(|card| build_row(&columns, card)).collect();

        Ok((columns, rows))
    }
}
