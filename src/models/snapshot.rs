// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Decoded workout-history snapshot.
//!
//! A snapshot is one CSV export at one point in time: a header row naming
//! the columns plus zero or more record rows. Snapshots are immutable once
//! decoded; every transformation produces a new value.

/// Columns every workout export must carry. Order in the file is irrelevant.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "Date Submitted",
    "Workout Date",
    "Activity Type",
    "Calories Burned (kcal)",
    "Distance (mi)",
    "Workout Time (seconds)",
    "Link",
];

/// One decoded tabular snapshot: ordered columns and rows parallel to them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Snapshot {
    /// Build a snapshot directly from columns and rows.
    ///
    /// Short rows are padded with empty cells so every row stays parallel
    /// to the header.
    pub fn new(columns: Vec<String>, mut rows: Vec<Vec<String>>) -> Self {
        let width = columns.len();
        for row in &mut rows {
            row.resize(width, String::new());
        }
        Self { columns, rows }
    }

    /// Decode a snapshot from CSV bytes. The first row is the header.
    pub fn from_csv(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(bytes);

        let columns: Vec<String> = reader
            .headers()
            .map_err(|e| SnapshotError::Decode(e.to_string()))?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| SnapshotError::Decode(e.to_string()))?;
            rows.push(record.iter().map(|v| v.to_string()).collect());
        }

        Ok(Self::new(columns, rows))
    }

    /// Encode the snapshot back to CSV bytes, header first.
    pub fn to_csv(&self) -> Result<Vec<u8>, SnapshotError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record(&self.columns)
            .map_err(|e| SnapshotError::Encode(e.to_string()))?;
        for row in &self.rows {
            writer
                .write_record(row)
                .map_err(|e| SnapshotError::Encode(e.to_string()))?;
        }
        writer
            .into_inner()
            .map_err(|e| SnapshotError::Encode(e.to_string()))
    }

    /// Column names in file order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the snapshot holds zero records.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether the snapshot carries the named column.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Per-record values of one column, or `None` if the column is absent.
    /// Absent cells read as empty strings.
    pub fn column_values(&self, name: &str) -> Option<impl Iterator<Item = &str> + '_> {
        let idx = self.columns.iter().position(|c| c == name)?;
        Some(self.rows.iter().map(move |row| row[idx].as_str()))
    }
}

/// Errors from snapshot encoding/decoding.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("Failed to decode CSV: {0}")]
    Decode(String),

    #[error("Failed to encode CSV: {0}")]
    Encode(String),
}
