//! Durable catalog configuration types

use crate::constants::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Catalog (SQLite-backed durable index) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Path to the SQLite database file; relative to the workspace data directory if not absolute
    pub path: PathBuf,

    /// SQLite busy timeout in milliseconds
    pub busy_timeout_ms: u32,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_CATALOG_FILENAME),
            busy_timeout_ms: CATALOG_BUSY_TIMEOUT_MS,
        }
    }
}
