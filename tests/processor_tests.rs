// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Integration tests for the versioning pipeline against local storage.

mod common;

use common::{export_with_ids, HEADER};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use workout_ingest::error::AppError;
use workout_ingest::services::WorkoutProcessor;
use workout_ingest::storage::LocalStorage;

const FILE_KEY: &str = "user2632022_workout_history.csv";

fn processor_for(root: &Path) -> WorkoutProcessor {
    let storage = Arc::new(LocalStorage::new(root).expect("local storage init"));
    WorkoutProcessor::new(storage)
}

fn write_upload(root: &Path, content: &str) {
    fs::write(root.join(FILE_KEY), content).unwrap();
}

fn archive_entries(root: &Path) -> Vec<std::path::PathBuf> {
    let mut entries: Vec<_> = fs::read_dir(root.join("archive"))
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    entries.sort();
    entries
}

#[tokio::test]
async fn test_first_run_reports_every_id() {
    let dir = tempfile::tempdir().unwrap();
    let processor = processor_for(dir.path());
    write_upload(dir.path(), &export_with_ids(&["7434147697", "7434147698"]));

    let outcome = processor.process_file(FILE_KEY).await.unwrap();

    assert_eq!(outcome.new_count, 2);
    assert_eq!(
        outcome.new_workout_ids,
        vec!["7434147697".to_string(), "7434147698".to_string()]
    );
    // No previous generation existed, so nothing was archived.
    assert!(archive_entries(dir.path()).is_empty());
    assert!(dir.path().join("current").join(FILE_KEY).exists());
}

#[tokio::test]
async fn test_rerun_of_same_content_finds_nothing_new() {
    let dir = tempfile::tempdir().unwrap();
    let processor = processor_for(dir.path());
    write_upload(dir.path(), &export_with_ids(&["7434147697", "7434147698"]));

    let first = processor.process_file(FILE_KEY).await.unwrap();
    assert_eq!(first.new_count, 2);

    let second = processor.process_file(FILE_KEY).await.unwrap();
    assert_eq!(second.new_count, 0);
    assert!(second.new_workout_ids.is_empty());
}

#[tokio::test]
async fn test_superset_upload_reports_only_the_added_id() {
    let dir = tempfile::tempdir().unwrap();
    let processor = processor_for(dir.path());

    write_upload(dir.path(), &export_with_ids(&["7434147697", "7434147698"]));
    processor.process_file(FILE_KEY).await.unwrap();

    // Same two records plus one new, deliberately reordered.
    write_upload(
        dir.path(),
        &export_with_ids(&["7434147699", "7434147697", "7434147698"]),
    );
    let outcome = processor.process_file(FILE_KEY).await.unwrap();

    assert_eq!(outcome.new_count, 1);
    assert_eq!(outcome.new_workout_ids, vec!["7434147699".to_string()]);
}

#[tokio::test]
async fn test_missing_column_fails_and_leaves_current_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let processor = processor_for(dir.path());

    write_upload(dir.path(), &export_with_ids(&["7434147697"]));
    processor.process_file(FILE_KEY).await.unwrap();
    let current_path = dir.path().join("current").join(FILE_KEY);
    let current_before = fs::read(&current_path).unwrap();

    // Header without Activity Type.
    let bad = "Date Submitted,Workout Date,Calories Burned (kcal),Distance (mi),Workout Time (seconds),Link\n2026-01-05,2026-01-04,350,3.1,1800,https://x.com/workout/5\n";
    write_upload(dir.path(), bad);

    let err = processor.process_file(FILE_KEY).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert!(err.to_string().contains("Activity Type"));

    // Validation failed before the persist step.
    assert_eq!(fs::read(&current_path).unwrap(), current_before);
}

#[tokio::test]
async fn test_empty_upload_fails_validation() {
    let dir = tempfile::tempdir().unwrap();
    let processor = processor_for(dir.path());
    write_upload(dir.path(), &format!("{HEADER}\n"));

    let err = processor.process_file(FILE_KEY).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_missing_upload_is_a_storage_error() {
    let dir = tempfile::tempdir().unwrap();
    let processor = processor_for(dir.path());

    let err = processor.process_file(FILE_KEY).await.unwrap_err();
    assert!(matches!(err, AppError::Storage(_)));
}

#[tokio::test]
async fn test_unparseable_links_are_skipped_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let processor = processor_for(dir.path());

    let upload = format!(
        "{HEADER}\n\
        2026-01-05,2026-01-04,Run,350,3.1,1800,https://x.com/workout/7434147697\n\
        2026-01-06,2026-01-05,Run,400,4.0,2000,no-workout-link-here\n"
    );
    write_upload(dir.path(), &upload);

    let outcome = processor.process_file(FILE_KEY).await.unwrap();
    assert_eq!(outcome.new_count, 1);
    assert_eq!(outcome.new_workout_ids, vec!["7434147697".to_string()]);
}

#[tokio::test]
async fn test_archive_holds_previous_content_and_current_the_new() {
    let dir = tempfile::tempdir().unwrap();
    let processor = processor_for(dir.path());
    let current_path = dir.path().join("current").join(FILE_KEY);

    write_upload(dir.path(), &export_with_ids(&["7434147697"]));
    processor.process_file(FILE_KEY).await.unwrap();
    let first_generation = fs::read(&current_path).unwrap();

    write_upload(dir.path(), &export_with_ids(&["7434147697", "7434147698"]));
    processor.process_file(FILE_KEY).await.unwrap();

    let archives = archive_entries(dir.path());
    assert_eq!(archives.len(), 1);
    let archive_name = archives[0].file_name().unwrap().to_string_lossy();
    assert!(archive_name.starts_with("user2632022_workout_history_"));
    assert!(archive_name.ends_with(".csv"));

    // Previous current is byte-identical in the archive; current holds the
    // newly ingested snapshot.
    assert_eq!(fs::read(&archives[0]).unwrap(), first_generation);
    let current_after = fs::read(&current_path).unwrap();
    assert_ne!(current_after, first_generation);
    assert!(String::from_utf8(current_after)
        .unwrap()
        .contains("7434147698"));
}

#[tokio::test]
async fn test_vanished_id_counts_as_new_when_it_reappears() {
    // Diffing runs against only the most recent archive, so an id that
    // disappears for a generation is reported again on return.
    let dir = tempfile::tempdir().unwrap();
    let processor = processor_for(dir.path());

    write_upload(dir.path(), &export_with_ids(&["1111", "2222"]));
    processor.process_file(FILE_KEY).await.unwrap();

    write_upload(dir.path(), &export_with_ids(&["2222"]));
    let dropped = processor.process_file(FILE_KEY).await.unwrap();
    assert_eq!(dropped.new_count, 0);

    write_upload(dir.path(), &export_with_ids(&["1111", "2222"]));
    let returned = processor.process_file(FILE_KEY).await.unwrap();
    assert_eq!(returned.new_workout_ids, vec!["1111".to_string()]);
}
