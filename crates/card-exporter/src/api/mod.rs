//! TCGdex API v2 client implementation.
//!
//! This module provides the catalog lookup seam used by the exporter and an
//! HTTP implementation of it for the public TCGdex API.

pub mod client;
pub mod types;

pub use client::{CatalogProvider, TcgdexClient};
pub use types::*;
