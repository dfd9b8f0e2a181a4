//! Shared library for the card exporter workspace.
//!
//! This crate provides common functionality used by the exporter binary:
//! - Configuration management
//! - Export row model and CSV header
//! - Output path utilities
//! - Logging infrastructure

pub mod config;
pub mod logging;
pub mod models;
pub mod paths;

// Re-export commonly used types
pub use config::{Config, ConfigSource};
pub use logging::LogConfig;
pub use models::*;
pub use paths::ExportPaths;

/// Common result type using anyhow::Error
pub type Result<T> = anyhow::Result<T>;
