// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Processing endpoint: maps inbound triggers to a file key and runs the
//! versioning pipeline.

use crate::error::AppError;
use crate::services::WorkoutProcessor;
use crate::AppState;
use axum::{
    extract::{Json, State},
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Processing routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/process", post(handle_trigger))
}

/// Inbound trigger. Either a direct invocation naming the file, or a
/// storage-upload event carrying bucket/object records.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum TriggerPayload {
    Direct {
        file_key: String,
    },
    Event {
        #[serde(rename = "Records")]
        records: Vec<EventRecord>,
    },
}

#[derive(Deserialize, Debug)]
struct EventRecord {
    storage_event: StorageEvent,
}

#[derive(Deserialize, Debug)]
struct StorageEvent {
    #[serde(default)]
    bucket: String,
    object_key: String,
}

/// Success envelope.
#[derive(Serialize)]
struct ProcessResponse {
    message: String,
    file_processed: String,
    new_workout_ids: Vec<String>,
}

/// Resolve the file key from a trigger payload.
fn file_key_from_payload(payload: serde_json::Value) -> Result<String, AppError> {
    let trigger: TriggerPayload = serde_json::from_value(payload)
        .map_err(|_| AppError::BadRequest("Unrecognized trigger payload".to_string()))?;

    match trigger {
        TriggerPayload::Direct { file_key } => Ok(file_key),
        TriggerPayload::Event { records } => {
            let record = records.into_iter().next().ok_or_else(|| {
                AppError::BadRequest("Storage event contains no records".to_string())
            })?;
            tracing::info!(
                bucket = %record.storage_event.bucket,
                object_key = %record.storage_event.object_key,
                "Storage event trigger"
            );
            Ok(record.storage_event.object_key)
        }
    }
}

/// Handle a processing trigger (POST).
async fn handle_trigger(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<serde_json::Value>,
) -> Result<Json<ProcessResponse>, AppError> {
    let file_key = file_key_from_payload(payload)?;
    tracing::info!(file_key = %file_key, "Processing file");

    let processor = WorkoutProcessor::new(state.storage.clone());
    let outcome = processor.process_file(&file_key).await?;

    // Best-effort summary; the notifier logs and swallows its own failures.
    state
        .notifier
        .notify_processed(&file_key, outcome.new_count)
        .await;

    Ok(Json(ProcessResponse {
        message: format!("Successfully processed {} new workouts", outcome.new_count),
        file_processed: file_key,
        new_workout_ids: outcome.new_workout_ids,
    }))
}
