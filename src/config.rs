// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! Configuration is read once at startup; nothing rereads the environment
//! during request handling.

use std::env;

/// Which storage backend holds the snapshot files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageMode {
    /// Local filesystem, rooted at `local_root`.
    Local,
    /// Google Cloud Storage bucket.
    Gcs,
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Storage backend selector
    pub storage_mode: StorageMode,
    /// Root directory for local storage (local mode only)
    pub local_root: String,
    /// GCS bucket name (gcs mode only)
    pub bucket: Option<String>,
    /// Optional endpoint for processing-complete notifications.
    /// Unset disables notification entirely.
    pub notify_endpoint: Option<String>,
    /// Server port
    pub port: u16,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            storage_mode: StorageMode::Local,
            local_root: "local_testing".to_string(),
            bucket: None,
            notify_endpoint: None,
            port: 8080,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// `STORAGE_MODE=gcs` requires `STORAGE_BUCKET`; startup fails fast
    /// when it is absent rather than discovering the problem on the first
    /// upload event.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let storage_mode = match env::var("STORAGE_MODE")
            .unwrap_or_else(|_| "local".to_string())
            .to_lowercase()
            .as_str()
        {
            "local" => StorageMode::Local,
            "gcs" => StorageMode::Gcs,
            other => return Err(ConfigError::UnknownStorageMode(other.to_string())),
        };

        let bucket = match env::var("STORAGE_BUCKET") {
            Ok(b) => Some(b.trim().to_string()),
            Err(_) if storage_mode == StorageMode::Gcs => {
                return Err(ConfigError::Missing("STORAGE_BUCKET"));
            }
            Err(_) => None,
        };

        Ok(Self {
            storage_mode,
            local_root: env::var("LOCAL_STORAGE_PATH")
                .unwrap_or_else(|_| "local_testing".to_string()),
            bucket,
            notify_endpoint: env::var("NOTIFY_ENDPOINT")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Unsupported STORAGE_MODE: {0}")]
    UnknownStorageMode(String),
}
