//! Catalog file loading - reads item definitions from a JSON catalog file.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::domain::{Item, ModuleType};

/// Container for items in a catalog file.
#[derive(Debug, Deserialize)]
pub struct CatalogFile {
  pub items: Vec<Item>,
}

/// Catalog loading and validation errors.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
  #[error("Catalog file not found: {0}")]
  FileNotFound(String),
  #[error("IO error reading {0}: {1}")]
  Io(String, String),
  #[error("Parse error in {0}: {1}")]
  Parse(String, String),
  #[error("Duplicate {module} item id: {id}")]
  DuplicateId { module: ModuleType, id: String },
  #[error("Empty {0} item id")]
  EmptyId(ModuleType),
}

impl CatalogError {
  /// Returns a user-facing error message without exposing filesystem paths.
  pub fn user_message(&self) -> &'static str {
    match self {
      CatalogError::FileNotFound(_) => "Catalog file not found",
      CatalogError::Io(_, _) => "Failed to read catalog file",
      CatalogError::Parse(_, _) => "Failed to parse catalog file",
      CatalogError::DuplicateId { .. } | CatalogError::EmptyId(_) => "Catalog contains invalid items",
    }
  }
}

/// Load items from a catalog file.
pub fn load_catalog_file(path: &Path) -> Result<Vec<Item>, CatalogError> {
  if !path.exists() {
    return Err(CatalogError::FileNotFound(path.display().to_string()));
  }

  let content = fs::read_to_string(path)
    .map_err(|e| CatalogError::Io(path.display().to_string(), e.to_string()))?;

  let data: CatalogFile = serde_json::from_str(&content)
    .map_err(|e| CatalogError::Parse(path.display().to_string(), e.to_string()))?;

  tracing::debug!("Read {} items from {}", data.items.len(), path.display());
  Ok(data.items)
}
