// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout-Ingest API Server
//!
//! Ingests workout history CSV exports, archives superseded snapshots,
//! and reports which workout ids are new since the previous version.

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use workout_ingest::{
    config::{Config, StorageMode},
    services::Notifier,
    storage::{GcsStorage, LocalStorage, Storage},
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging for GCP
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Workout-Ingest API");

    // Select storage backend
    let storage: Arc<dyn Storage> = match config.storage_mode {
        StorageMode::Local => {
            tracing::info!(root = %config.local_root, "Using local storage");
            Arc::new(LocalStorage::new(&config.local_root).expect("Failed to init local storage"))
        }
        StorageMode::Gcs => {
            let bucket = config
                .bucket
                .as_deref()
                .expect("STORAGE_BUCKET is required in gcs mode");
            tracing::info!(bucket = %bucket, "Using GCS storage");
            Arc::new(GcsStorage::new(bucket))
        }
    };

    let notifier = Notifier::new(config.notify_endpoint.clone());
    if config.notify_endpoint.is_some() {
        tracing::info!("Notification endpoint configured");
    }

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        storage,
        notifier,
    });

    // Build router
    let app = workout_ingest::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("workout_ingest=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
