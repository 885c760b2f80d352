// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use std::path::Path;
use std::sync::Arc;
use workout_ingest::config::Config;
use workout_ingest::services::Notifier;
use workout_ingest::storage::LocalStorage;
use workout_ingest::AppState;

pub const HEADER: &str = "Date Submitted,Workout Date,Activity Type,Calories Burned (kcal),Distance (mi),Workout Time (seconds),Link";

/// Build a CSV export from workout ids, one row per id.
#[allow(dead_code)]
pub fn export_with_ids(ids: &[&str]) -> String {
    let rows: Vec<String> = ids
        .iter()
        .map(|id| {
            format!("2026-01-05,2026-01-04,Run,350,3.1,1800,https://www.mapmyfitness.com/workout/{id}")
        })
        .collect();
    format!("{HEADER}\n{}\n", rows.join("\n"))
}

/// Create a test app backed by local storage under `root`, with
/// notifications disabled. Returns the router and shared state.
#[allow(dead_code)]
pub fn create_test_app(root: &Path) -> (axum::Router, Arc<AppState>) {
    let config = Config {
        local_root: root.to_string_lossy().into_owned(),
        ..Config::default()
    };
    let storage = Arc::new(LocalStorage::new(root).expect("local storage init"));

    let state = Arc::new(AppState {
        config,
        storage,
        notifier: Notifier::disabled(),
    });

    (workout_ingest::routes::create_router(state.clone()), state)
}
