// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Structural validation of workout snapshots.

use crate::error::AppError;
use crate::models::{Snapshot, REQUIRED_COLUMNS};
use crate::services::identity::extract_workout_id;

/// Validate snapshot structure: required columns present, at least one
/// record. Rows whose link carries no workout id are logged but never fail
/// validation; the extractor drops them downstream.
///
/// Validation is structural only. Numeric ranges and dates are the export
/// producer's problem.
pub fn validate(snapshot: &Snapshot) -> Result<(), AppError> {
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|col| !snapshot.has_column(col))
        .collect();
    if !missing.is_empty() {
        return Err(AppError::Validation(format!(
            "Missing required columns: {}",
            missing.join(", ")
        )));
    }

    if snapshot.is_empty() {
        return Err(AppError::Validation("Snapshot is empty".to_string()));
    }

    let invalid_links: Vec<&str> = snapshot
        .column_values("Link")
        .into_iter()
        .flatten()
        .filter(|link| extract_workout_id(link).is_none())
        .collect();
    if !invalid_links.is_empty() {
        tracing::warn!(
            count = invalid_links.len(),
            "Found rows with invalid workout links"
        );
        tracing::debug!(links = ?invalid_links, "Invalid links");
    }

    Ok(())
}
