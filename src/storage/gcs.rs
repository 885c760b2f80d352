// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Google Cloud Storage backend over the JSON API.
//!
//! Uses plain REST calls with a bearer token from the metadata server
//! rather than the full SDK; the three operations we need (stat, copy,
//! get/put object) map one-to-one onto API endpoints.

use super::{archive_key, current_key, Storage, StorageError};
use crate::models::Snapshot;
use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

const API_BASE: &str = "https://storage.googleapis.com/storage/v1";
const UPLOAD_BASE: &str = "https://storage.googleapis.com/upload/storage/v1";
const METADATA_TOKEN_URL: &str =
    "http://metadata.google.internal/computeMetadata/v1/instance/service-accounts/default/token";

/// Access token cached until shortly before expiry.
struct CachedToken {
    token: String,
    expires_at: Instant,
}

/// GCS-backed storage for one bucket.
pub struct GcsStorage {
    bucket: String,
    http: reqwest::Client,
    token: Mutex<Option<CachedToken>>,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

impl GcsStorage {
    pub fn new(bucket: &str) -> Self {
        Self {
            bucket: bucket.to_string(),
            http: reqwest::Client::new(),
            token: Mutex::new(None),
        }
    }

    /// Fetch (or reuse) a bearer token from the metadata server.
    async fn access_token(&self) -> Result<String, StorageError> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref() {
            if token.expires_at > Instant::now() {
                return Ok(token.token.clone());
            }
        }

        let response = self
            .http
            .get(METADATA_TOKEN_URL)
            .header("Metadata-Flavor", "Google")
            .send()
            .await
            .map_err(|e| StorageError::Backend(format!("metadata token fetch failed: {e}")))?;
        if !response.status().is_success() {
            return Err(StorageError::Backend(format!(
                "metadata token fetch failed: HTTP {}",
                response.status()
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| StorageError::Backend(format!("metadata token decode failed: {e}")))?;

        // Refresh one minute early so in-flight requests never race expiry.
        let expires_at =
            Instant::now() + Duration::from_secs(token.expires_in.saturating_sub(60));
        let access_token = token.access_token.clone();
        *cached = Some(CachedToken {
            token: token.access_token,
            expires_at,
        });
        Ok(access_token)
    }

    fn object_url(&self, key: &str) -> String {
        format!(
            "{API_BASE}/b/{}/o/{}",
            self.bucket,
            urlencoding::encode(key)
        )
    }

    /// Whether an object exists, via a metadata GET.
    async fn object_exists(&self, key: &str) -> Result<bool, StorageError> {
        let token = self.access_token().await?;
        let response = self
            .http
            .get(self.object_url(key))
            .bearer_auth(&token)
            .send()
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;

        match response.status() {
            s if s.is_success() => Ok(true),
            reqwest::StatusCode::NOT_FOUND => Ok(false),
            s => Err(StorageError::Backend(format!(
                "stat {key} failed: HTTP {s}"
            ))),
        }
    }

    /// Server-side copy of one object to another key in the same bucket.
    async fn copy_object(&self, src: &str, dst: &str) -> Result<(), StorageError> {
        let token = self.access_token().await?;
        let url = format!(
            "{}/copyTo/b/{}/o/{}",
            self.object_url(src),
            self.bucket,
            urlencoding::encode(dst)
        );
        let response = self
            .http
            .post(url)
            .bearer_auth(&token)
            .header(reqwest::header::CONTENT_LENGTH, 0)
            .send()
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;

        if !response.status().is_success() {
            return Err(StorageError::Backend(format!(
                "copy {src} -> {dst} failed: HTTP {}",
                response.status()
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl Storage for GcsStorage {
    async fn version_existing(&self, file_key: &str) -> Result<Option<String>, StorageError> {
        let current = current_key(file_key);
        if !self.object_exists(&current).await? {
            return Ok(None);
        }

        let archive = archive_key(file_key, Utc::now());
        self.copy_object(&current, &archive).await?;
        tracing::info!(file_key = %file_key, archive_key = %archive, "Archived current snapshot");
        Ok(Some(archive))
    }

    async fn read(&self, key: &str) -> Result<Snapshot, StorageError> {
        let token = self.access_token().await?;
        let response = self
            .http
            .get(format!("{}?alt=media", self.object_url(key)))
            .bearer_auth(&token)
            .send()
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;

        match response.status() {
            s if s.is_success() => {}
            reqwest::StatusCode::NOT_FOUND => {
                return Err(StorageError::NotFound(key.to_string()));
            }
            s => {
                return Err(StorageError::Backend(format!(
                    "read {key} failed: HTTP {s}"
                )));
            }
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        Snapshot::from_csv(&bytes).map_err(|e| StorageError::Decode(e.to_string()))
    }

    async fn write(&self, key: &str, snapshot: &Snapshot) -> Result<(), StorageError> {
        let bytes = snapshot
            .to_csv()
            .map_err(|e| StorageError::Decode(e.to_string()))?;
        let token = self.access_token().await?;
        let url = format!(
            "{UPLOAD_BASE}/b/{}/o?uploadType=media&name={}",
            self.bucket,
            urlencoding::encode(key)
        );
        let response = self
            .http
            .post(url)
            .bearer_auth(&token)
            .header(reqwest::header::CONTENT_TYPE, "text/csv")
            .body(bytes)
            .send()
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;

        if !response.status().is_success() {
            return Err(StorageError::Backend(format!(
                "write {key} failed: HTTP {}",
                response.status()
            )));
        }
        Ok(())
    }
}
