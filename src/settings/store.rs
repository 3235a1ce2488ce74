//! Durable settings storage
//!
//! The editor only ever calls [`SettingsStore::save`] and never waits on it.

use super::Settings;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Collaborator that writes committed settings somewhere durable
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn save(&self, settings: &Settings) -> Result<(), String>;
}

#[async_trait]
impl<T: SettingsStore + ?Sized> SettingsStore for Arc<T> {
    async fn save(&self, settings: &Settings) -> Result<(), String> {
        (**self).save(settings).await
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to encode settings: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Settings kept as pretty-printed JSON in a single file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored settings, or defaults when nothing was saved yet.
    ///
    /// # Errors
    ///
    /// Fails when the file exists but cannot be read or parsed.
    pub async fn load(&self) -> Result<Settings, StoreError> {
        let data = match tokio::fs::read(&self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "No saved settings, using defaults");
                return Ok(Settings::default());
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        serde_json::from_slice(&data).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Write through a temporary file and rename it into place.
    ///
    /// # Errors
    ///
    /// Fails on any filesystem error.
    pub async fn write(&self, settings: &Settings) -> Result<(), StoreError> {
        let io_err = |source: std::io::Error| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
        }

        let bytes = serde_json::to_vec_pretty(settings)?;
        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, bytes).await.map_err(io_err)?;
        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .map_err(io_err)
    }
}

#[async_trait]
impl SettingsStore for JsonFileStore {
    async fn save(&self, settings: &Settings) -> Result<(), String> {
        self.write(settings).await.map_err(|e| e.to_string())
    }
}
