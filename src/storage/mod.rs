// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Storage layer for snapshot files.
//!
//! Keys live in two zones: `current/{name}` holds the latest accepted
//! snapshot of a logical file, and `archive/` holds every superseded
//! version under a timestamped name. Archive entries are never overwritten.

pub mod gcs;
pub mod local;

pub use gcs::GcsStorage;
pub use local::LocalStorage;

use crate::models::Snapshot;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Storage key prefixes as constants.
pub mod zones {
    pub const CURRENT: &str = "current";
    pub const ARCHIVE: &str = "archive";
}

/// The `current/` key for a logical file name.
pub fn current_key(file_key: &str) -> String {
    format!("{}/{}", zones::CURRENT, file_key)
}

/// Mint an archive key for a logical file name at the given instant:
/// `archive/{stem}_{YYYYMMDD_HHMMSS}.csv`.
pub fn archive_key(file_key: &str, now: DateTime<Utc>) -> String {
    let name = file_key.rsplit('/').next().unwrap_or(file_key);
    let stem = name.rsplit_once('.').map(|(s, _)| s).unwrap_or(name);
    format!(
        "{}/{}_{}.csv",
        zones::ARCHIVE,
        stem,
        crate::time_utils::format_archive_timestamp(now)
    )
}

/// Port for snapshot persistence.
///
/// Backends differ only in where bytes live; key layout and archive naming
/// are shared. Selected once at startup from configuration.
#[async_trait]
pub trait Storage: Send + Sync {
    /// If a snapshot exists at `current/{file_key}`, copy it byte-for-byte
    /// to a fresh archive key and return that key. Returns `Ok(None)` when
    /// there is no current snapshot; absence is not an error. The source
    /// is never deleted or mutated.
    async fn version_existing(&self, file_key: &str) -> Result<Option<String>, StorageError>;

    /// Decode the snapshot stored at `key`. A missing key or undecodable
    /// content is a `StorageError`.
    async fn read(&self, key: &str) -> Result<Snapshot, StorageError>;

    /// Persist a snapshot at `key`, overwriting any existing object.
    async fn write(&self, key: &str, snapshot: &Snapshot) -> Result<(), StorageError>;
}

/// Errors from storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Failed to read {0}: not found")]
    NotFound(String),

    #[error("I/O failure: {0}")]
    Io(String),

    #[error("Failed to decode snapshot: {0}")]
    Decode(String),

    #[error("Storage backend error: {0}")]
    Backend(String),
}
