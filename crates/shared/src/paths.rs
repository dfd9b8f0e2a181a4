//! File path utilities for export output.
//!
//! All per-set CSV files live directly in the export directory; their names
//! are derived from the set id and display name.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Characters that may not appear in an exported file name.
pub const FORBIDDEN_FILENAME_CHARS: [char; 10] =
    ['/', '\\', '?', '%', '*', ':', '|', '"', '<', '>'];

/// Replace every forbidden character (and space) with `-`
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c == ' ' || FORBIDDEN_FILENAME_CHARS.contains(&c) {
                '-'
            } else {
                c
            }
        })
        .collect()
}

/// File path manager for export output
#[derive(Debug, Clone)]
pub struct ExportPaths {
    root: PathBuf,
}

impl ExportPaths {
    /// Create a new ExportPaths with the given output directory
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Get the output directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the output directory if it does not exist
    pub fn create_dirs(&self) -> Result<()> {
        std::fs::create_dir_all(&self.root)
            .with_context(|| format!("Failed to create directory: {}", self.root.display()))?;
        Ok(())
    }

    /// CSV file for one set, e.g. `A1-Genetic-Apex.csv`
    pub fn set_csv(&self, set_id: &str, set_name: &str) -> PathBuf {
        let stem = sanitize_filename(&format!("{}-{}", set_id, set_name));
        self.root.join(format!("{}.csv", stem))
    }

    /// All CSV files in the output directory, sorted by file name
    pub fn list_csv_files(&self) -> Result<Vec<PathBuf>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in std::fs::read_dir(&self.root)
            .with_context(|| format!("Failed to read directory: {}", self.root.display()))?
        {
            let path = entry?.path();
            let is_csv = path
                .extension()
                .map(|ext| ext.eq_ignore_ascii_case("csv"))
                .unwrap_or(false);
            if path.is_file() && is_csv {
                files.push(path);
            }
        }

        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_sanitize_replaces_forbidden_chars() {
        assert_eq!(sanitize_filename("Genetic Apex"), "Genetic-Apex");
        assert_eq!(
            sanitize_filename(r#"a/b\c?d%e*f:g|h"i<j>k l"#),
            "a-b-c-d-e-f-g-h-i-j-k-l"
        );
        assert_eq!(sanitize_filename("Promo-A"), "Promo-A");
    }

    #[test]
    fn test_set_csv_path() {
        let paths = ExportPaths::new("/data");

        assert_eq!(
            paths.set_csv("A1", "Genetic Apex"),
            PathBuf::from("/data/A1-Genetic-Apex.csv")
        );
        assert_eq!(
            paths.set_csv("A2a", "Triumphant Light"),
            PathBuf::from("/data/A2a-Triumphant-Light.csv")
        );
    }

    #[test]
    fn test_set_csv_file_name_has_no_forbidden_chars() {
        let paths = ExportPaths::new("/data");
        let path = paths.set_csv("X:1", "Odd <Name>?");
        let name = path.file_name().unwrap().to_string_lossy().to_string();

        assert!(!name.contains(' '));
        assert!(!name.chars().any(|c| FORBIDDEN_FILENAME_CHARS.contains(&c)));
    }

    #[test]
    fn test_list_csv_files_sorted() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let paths = ExportPaths::new(temp_dir.path());

        std::fs::write(temp_dir.path().join("B.csv"), "x")?;
        std::fs::write(temp_dir.path().join("A.csv"), "x")?;
        std::fs::write(temp_dir.path().join("notes.txt"), "x")?;
        std::fs::create_dir(temp_dir.path().join("logs"))?;

        let files = paths.list_csv_files()?;
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["A.csv", "B.csv"]);

        Ok(())
    }

    #[test]
    fn test_create_dirs() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let paths = ExportPaths::new(temp_dir.path().join("nested").join("out"));

        assert!(paths.list_csv_files()?.is_empty());
        paths.create_dirs()?;
        assert!(paths.root().exists());

        Ok(())
    }
}
