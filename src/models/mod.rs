// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for workout snapshots.

pub mod snapshot;

pub use snapshot::{Snapshot, SnapshotError, REQUIRED_COLUMNS};
