// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Local filesystem storage backend.

use super::{archive_key, current_key, zones, Storage, StorageError};
use crate::models::Snapshot;
use async_trait::async_trait;
use chrono::Utc;
use std::path::{Path, PathBuf};

/// Filesystem-backed storage rooted at a base directory.
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    /// Create a local backend, ensuring the `current/` and `archive/`
    /// directories exist under the root.
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self, StorageError> {
        let root = root.as_ref().to_path_buf();
        for zone in [zones::CURRENT, zones::ARCHIVE] {
            std::fs::create_dir_all(root.join(zone))
                .map_err(|e| StorageError::Io(e.to_string()))?;
        }
        Ok(Self { root })
    }

    fn full_path(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn version_existing(&self, file_key: &str) -> Result<Option<String>, StorageError> {
        let current_path = self.full_path(&current_key(file_key));
        if !current_path.exists() {
            return Ok(None);
        }

        let archive = archive_key(file_key, Utc::now());
        let archive_path = self.full_path(&archive);
        tokio::fs::copy(&current_path, &archive_path)
            .await
            .map_err(|e| StorageError::Io(e.to_string()))?;

        tracing::info!(file_key = %file_key, archive_key = %archive, "Archived current snapshot");
        Ok(Some(archive))
    }

    async fn read(&self, key: &str) -> Result<Snapshot, StorageError> {
        let path = self.full_path(key);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StorageError::NotFound(key.to_string()));
            }
            Err(e) => return Err(StorageError::Io(e.to_string())),
        };
        Snapshot::from_csv(&bytes).map_err(|e| StorageError::Decode(e.to_string()))
    }

    async fn write(&self, key: &str, snapshot: &Snapshot) -> Result<(), StorageError> {
        let bytes = snapshot
            .to_csv()
            .map_err(|e| StorageError::Decode(e.to_string()))?;
        tokio::fs::write(self.full_path(key), bytes)
            .await
            .map_err(|e| StorageError::Io(e.to_string()))
    }
}
