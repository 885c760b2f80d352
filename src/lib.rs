// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout-Ingest: detect new workout records in periodic history exports
//!
//! This crate provides the backend for ingesting workout history CSV
//! snapshots, archiving the previously accepted version of each logical
//! file, and reporting which workout ids appear for the first time.

pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod storage;
pub mod time_utils;

use config::Config;
use services::Notifier;
use std::sync::Arc;
use storage::Storage;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub storage: Arc<dyn Storage>,
    pub notifier: Notifier,
}
