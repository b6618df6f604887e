//! Project path functions - single source of truth for file paths.
//!
//! ## Environment Variables
//!
//! - `DATA_DIR`: Override the base data directory (default: "data")
//! - `CATALOG_PATH`: Override the catalog file (see config.rs)

use std::env;
use std::sync::OnceLock;

/// Lazily initialized data directory from DATA_DIR env var
static DATA_DIR_VALUE: OnceLock<String> = OnceLock::new();

/// Get the base data directory (from DATA_DIR env var or default "data")
pub fn data_dir() -> &'static str {
  DATA_DIR_VALUE.get_or_init(|| env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string()))
}

/// Content directory (catalog files)
pub fn content_dir() -> String {
  format!("{}/content", data_dir())
}

/// Default catalog file; the built-in catalog is used when it is absent
pub fn catalog_path() -> String {
  format!("{}/catalog.json", content_dir())
}
