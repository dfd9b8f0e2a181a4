//! CSV output: one file per set, plus the combined all-sets file.

use crate::error::{ExportError, ExportResult};
use csv::{StringRecord, WriterBuilder};
use shared::{ExportRow, CSV_HEADER};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Write all rows of one set, replacing any existing file
///
/// The header is always written, even for a set without cards.
pub fn write_set_csv(path: &Path, rows: &[ExportRow]) -> ExportResult<usize> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|e| ExportError::csv(path, e))?;

    writer
        .write_record(CSV_HEADER)
        .map_err(|e| ExportError::csv(path, e))?;

    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| ExportError::csv(path, e))?;
    }

    writer.flush().map_err(|e| ExportError::io(path, e))?;

    debug!(path = %path.display(), rows = rows.len(), "CSV written");
    Ok(rows.len())
}

/// Statistics for a combine run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CombineStats {
    pub files_read: usize,
    pub rows_written: usize,
}

/// Concatenate CSV files (in the given order) into `output` under one header
///
/// `output` itself is skipped if it appears among the inputs.
pub fn combine_csv_files(inputs: &[PathBuf], output: &Path) -> ExportResult<CombineStats> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| ExportError::io(parent, e))?;
    }

    let output_canonical = output.canonicalize().ok();
    let inputs: Vec<&PathBuf> = inputs
        .iter()
        .filter(|input| match &output_canonical {
            Some(out) => input.canonicalize().ok().as_ref() != Some(out),
            None => true,
        })
        .collect();

    let mut stats = CombineStats::default();
    let mut header: Option<StringRecord> = None;
    let mut records = Vec::new();

    for input in inputs {
        let mut reader = csv::Reader::from_path(input).map_err(|e| ExportError::csv(input, e))?;
        let file_header = reader
            .headers()
            .map_err(|e| ExportError::csv(input, e))?
            .clone();

        match &header {
            Some(expected) if *expected != file_header => {
                return Err(ExportError::HeaderMismatch {
                    path: input.clone(),
                });
            }
            Some(_) => {}
            None => header = Some(file_header),
        }

        for record in reader.records() {
            records.push(record.map_err(|e| ExportError::csv(input, e))?);
        }

        stats.files_read += 1;
        debug!(path = %input.display(), "Combined file");
    }

    let header = header.unwrap_or_else(|| StringRecord::from(CSV_HEADER.to_vec()));

    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_path(output)
        .map_err(|e| ExportError::csv(output, e))?;
    writer
        .write_record(&header)
        .map_err(|e| ExportError::csv(output, e))?;
    for record in &records {
        writer
            .write_record(record)
            .map_err(|e| ExportError::csv(output, e))?;
    }
    writer.flush().map_err(|e| ExportError::io(output, e))?;

    stats.rows_written = records.len();
    info!(
        files = stats.files_read,
        rows = stats.rows_written,
        output = %output.display(),
        "Combined CSV files"
    );

    Ok(stats)
}
