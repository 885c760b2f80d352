// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Set-difference of workout ids between snapshot generations.

use crate::models::Snapshot;
use crate::services::identity::extract_workout_id;
use std::collections::BTreeSet;

/// All workout ids in a snapshot. Rows without an extractable id are
/// dropped; duplicates collapse under set semantics.
pub fn workout_ids(snapshot: &Snapshot) -> BTreeSet<String> {
    snapshot
        .column_values("Link")
        .into_iter()
        .flatten()
        .filter_map(extract_workout_id)
        .collect()
}

/// Ids present in `new` but absent from `previous`.
///
/// With no previous snapshot this is the first processing of the logical
/// file and every id is new. Diffing runs against only the single most
/// recently archived generation: an id that vanishes and later reappears
/// counts as new again. That tradeoff bounds every run to two snapshots
/// of I/O and is intended behavior, not an oversight.
pub fn compute_new_ids(new: &Snapshot, previous: Option<&Snapshot>) -> BTreeSet<String> {
    let new_ids = workout_ids(new);
    match previous {
        Some(previous) => {
            let existing = workout_ids(previous);
            new_ids.difference(&existing).cloned().collect()
        }
        None => new_ids,
    }
}
