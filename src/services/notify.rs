// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Best-effort processing-complete notifications.
//!
//! Delivery is fire-and-forget: every failure is converted into a logged
//! event at this boundary and never propagates to the processing run.

use crate::time_utils::format_utc_rfc3339;
use chrono::Utc;
use serde::Serialize;

/// Summary message posted after a successful run.
#[derive(Debug, Serialize)]
pub struct ProcessedMessage {
    pub file_processed: String,
    pub new_records: usize,
    pub timestamp: String,
    pub status: String,
}

/// Notification sink posting summaries to a configured endpoint.
#[derive(Clone)]
pub struct Notifier {
    http: reqwest::Client,
    endpoint: Option<String>,
}

impl Notifier {
    /// Create a notifier. `None` disables delivery entirely.
    pub fn new(endpoint: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint,
        }
    }

    /// Disabled notifier for tests and local runs.
    pub fn disabled() -> Self {
        Self::new(None)
    }

    /// Announce a completed run. Never fails; errors are logged and
    /// swallowed here.
    pub async fn notify_processed(&self, file_key: &str, new_records: usize) {
        let Some(endpoint) = &self.endpoint else {
            tracing::debug!("Notification endpoint not configured, skipping");
            return;
        };

        let message = ProcessedMessage {
            file_processed: file_key.to_string(),
            new_records,
            timestamp: format_utc_rfc3339(Utc::now()),
            status: "success".to_string(),
        };

        match self.http.post(endpoint).json(&message).send().await {
            Ok(response) if response.status().is_success() => {
                tracing::info!(file_key = %file_key, new_records, "Notification sent");
            }
            Ok(response) => {
                tracing::error!(
                    status = %response.status(),
                    "Failed to send notification"
                );
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to send notification");
            }
        }
    }
}
