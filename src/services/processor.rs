// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Versioning orchestrator: archive, load, validate, diff, persist.

use crate::error::Result;
use crate::services::{diff, validator};
use crate::storage::{current_key, Storage};
use std::sync::Arc;

/// Result of one processing run. Created fresh per invocation, never
/// persisted.
#[derive(Debug, Clone)]
pub struct ProcessingOutcome {
    pub new_count: usize,
    /// Newly seen workout ids, sorted.
    pub new_workout_ids: Vec<String>,
}

/// Processes uploaded snapshots and identifies new workout records.
pub struct WorkoutProcessor {
    storage: Arc<dyn Storage>,
}

impl WorkoutProcessor {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Process one uploaded snapshot.
    ///
    /// Steps run strictly in order; archiving must capture the pre-update
    /// state before anything else touches storage:
    /// 1. archive the existing `current/{file_key}` if there is one,
    /// 2. read the uploaded snapshot at `file_key`,
    /// 3. validate its structure,
    /// 4. diff its workout ids against the just-archived generation,
    /// 5. persist it as the new `current/{file_key}` (even with zero new
    ///    ids, so `current` always reflects the latest ingest).
    ///
    /// Any failure short-circuits the remaining steps. There is no
    /// rollback: archiving only copies, and a failed later step leaves
    /// `current` unmodified for the next run to re-archive.
    pub async fn process_file(&self, file_key: &str) -> Result<ProcessingOutcome> {
        let archived_key = self.storage.version_existing(file_key).await?;

        let new_snapshot = self.storage.read(file_key).await?;
        validator::validate(&new_snapshot)?;

        let previous = match &archived_key {
            Some(key) => {
                // The archive copy was minted moments ago; failing to read
                // it back is fatal, not an empty diff.
                Some(self.storage.read(key).await?)
            }
            None => None,
        };

        let new_ids = diff::compute_new_ids(&new_snapshot, previous.as_ref());

        self.storage
            .write(&current_key(file_key), &new_snapshot)
            .await?;

        tracing::info!(
            file_key = %file_key,
            new_count = new_ids.len(),
            archived = archived_key.is_some(),
            "Snapshot processed"
        );

        Ok(ProcessingOutcome {
            new_count: new_ids.len(),
            new_workout_ids: new_ids.into_iter().collect(),
        })
    }
}
