use crate::conference::Catalog;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while reading a catalog file
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read catalog '{}': {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid TOML in catalog '{}': {}", .path.display(), .source)]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid JSON in catalog '{}': {}", .path.display(), .source)]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// On-disk catalog format, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Toml,
    Json,
}

impl CatalogFormat {
    /// `.json` files are JSON, everything else is TOML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => CatalogFormat::Json,
            _ => CatalogFormat::Toml,
        }
    }
}

/// Read-only access to a conference catalog file
pub struct Storage {
    file_path: PathBuf,
}

impl Storage {
    pub fn new(file_path: impl AsRef<Path>) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
        }
    }

    pub fn format(&self) -> CatalogFormat {
        CatalogFormat::from_path(&self.file_path)
    }

    pub fn load(&self) -> Result<Catalog, StorageError> {
        let content = fs::read_to_string(&self.file_path).map_err(|source| StorageError::Io {
            path: self.file_path.clone(),
            source,
        })?;

        let catalog = self.parse(&content)?;
        tracing::info!(
            path = %self.file_path.display(),
            conferences = catalog.len(),
            "loaded conference catalog"
        );
        Ok(catalog)
    }

    /// Parse catalog text in this storage's format
    pub fn parse(&self, content: &str) -> Result<Catalog, StorageError> {
        match self.format() {
            CatalogFormat::Toml => toml::from_str(content).map_err(|source| StorageError::Toml {
                path: self.file_path.clone(),
                source,
            }),
            CatalogFormat::Json => {
                serde_json::from_str(content).map_err(|source| StorageError::Json {
                    path: self.file_path.clone(),
                    source,
                })
            }
        }
    }
}
