//! Catalog source configuration

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Where the command-line driver reads its catalog from
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogConfig {
    /// Path to a YAML or JSON catalog file
    pub path: Option<PathBuf>,
}

impl CatalogConfig {
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// File extension of the configured path, if any
    pub fn extension(&self) -> Option<&str> {
        self.path()
            .and_then(Path::extension)
            .and_then(|ext| ext.to_str())
    }
}
