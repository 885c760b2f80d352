// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout id extraction from export links.

use regex::Regex;
use std::sync::LazyLock;

static WORKOUT_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/workout/(\d+)").expect("workout id pattern is valid"));

/// Extract the workout id from a record's link field.
///
/// The id is the digit run following a `/workout/` path segment. Empty or
/// non-matching input yields `None`; this never fails.
pub fn extract_workout_id(link: &str) -> Option<String> {
    WORKOUT_ID
        .captures(link)
        .map(|caps| caps[1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_id_from_full_url() {
        assert_eq!(
            extract_workout_id("https://www.mapmyfitness.com/workout/7434147697"),
            Some("7434147697".to_string())
        );
    }

    #[test]
    fn test_extracts_id_with_trailing_path() {
        assert_eq!(
            extract_workout_id("https://example.com/workout/123/details?utm=x"),
            Some("123".to_string())
        );
    }

    #[test]
    fn test_no_workout_segment() {
        assert_eq!(extract_workout_id("https://example.com/run/123"), None);
    }

    #[test]
    fn test_non_numeric_id() {
        assert_eq!(extract_workout_id("https://example.com/workout/abc"), None);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(extract_workout_id(""), None);
    }
}
