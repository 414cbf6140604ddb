//! Availability statuses and submission normalization.
//!
//! A member's submission is a set of calendar dates they are free on. The
//! ledger stores it as one row per day, replaced wholesale on every
//! resubmission; this module validates and normalizes the raw input before
//! anything is written.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::trip_window::TripWindow;
use crate::types::{CalendarDate, DATE_FORMAT};

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// How a member reported a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityStatus {
    Free,
    Flexible,
    Busy,
}

impl AvailabilityStatus {
    /// Only `free` days count toward a day's quorum. `flexible` is recorded
    /// but never counted.
    pub fn counts_toward_quorum(self) -> bool {
        match self {
            AvailabilityStatus::Free => true,
            AvailabilityStatus::Flexible | AvailabilityStatus::Busy => false,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AvailabilityStatus::Free => "free",
            AvailabilityStatus::Flexible => "flexible",
            AvailabilityStatus::Busy => "busy",
        }
    }
}

impl fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AvailabilityStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "free" => Ok(AvailabilityStatus::Free),
            "flexible" => Ok(AvailabilityStatus::Flexible),
            "busy" => Ok(AvailabilityStatus::Busy),
            other => Err(CoreError::Validation(format!(
                "Unknown availability status '{other}'"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// Returned by submission and self-review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AvailabilitySummary {
    /// Days in the trip window, inclusive.
    pub total_dates: u32,
    /// Distinct days the member is stored as free on.
    pub submitted_dates: u32,
}

impl AvailabilitySummary {
    pub fn new(window: &TripWindow, submitted_dates: usize) -> Self {
        Self {
            total_dates: window.total_days(),
            submitted_dates: submitted_dates as u32,
        }
    }
}

// ---------------------------------------------------------------------------
// Parsing and normalization
// ---------------------------------------------------------------------------

/// Parse a strict `YYYY-MM-DD` date.
pub fn parse_date(raw: &str) -> Result<CalendarDate, CoreError> {
    // chrono accepts unpadded fields; the wire format does not.
    if raw.len() != 10 {
        return Err(CoreError::Validation(format!(
            "dates must be in YYYY-MM-DD format, got '{raw}'"
        )));
    }
    CalendarDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| {
        CoreError::Validation(format!("dates must be in YYYY-MM-DD format, got '{raw}'"))
    })
}

/// Format a date in the wire format.
pub fn format_date(date: CalendarDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse raw submitted strings, skipping blank entries.
///
/// The first malformed entry fails the whole call.
pub fn parse_submitted_dates<S: AsRef<str>>(raw: &[S]) -> Result<Vec<CalendarDate>, CoreError> {
    raw.iter()
        .map(|s| s.as_ref().trim())
        .filter(|s| !s.is_empty())
        .map(parse_date)
        .collect()
}

/// Validate a submission against the trip window and deduplicate it.
///
/// Every date must lie inside `window`; the first one that does not fails
/// the call with [`CoreError::InvalidDate`] before anything is written.
/// Duplicates are dropped silently. The result is sorted ascending.
pub fn normalize_submission(
    window: &TripWindow,
    dates: impl IntoIterator<Item = CalendarDate>,
) -> Result<Vec<CalendarDate>, CoreError> {
    let mut unique = BTreeSet::new();
    for date in dates {
        if !window.contains(date) {
            return Err(CoreError::InvalidDate(format!(
                "date out of trip range: {} (trip runs {} to {})",
                format_date(date),
                format_date(window.start()),
                format_date(window.end()),
            )));
        }
        unique.insert(date);
    }

    if unique.is_empty() {
        return Err(CoreError::Validation("no valid dates to save".into()));
    }

    Ok(unique.into_iter().collect())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> CalendarDate {
        CalendarDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn december_window() -> TripWindow {
        TripWindow::new(date(2025, 12, 1), date(2025, 12, 5)).unwrap()
    }

    #[test]
    fn only_free_counts_toward_quorum() {
        assert!(AvailabilityStatus::Free.counts_toward_quorum());
        assert!(!AvailabilityStatus::Flexible.counts_toward_quorum());
        assert!(!AvailabilityStatus::Busy.counts_toward_quorum());
    }

    #[test]
    fn status_round_trips_through_str() {
        for status in [
            AvailabilityStatus::Free,
            AvailabilityStatus::Flexible,
            AvailabilityStatus::Busy,
        ] {
            assert_eq!(status.as_str().parse::<AvailabilityStatus>().unwrap(), status);
        }
        assert!("maybe".parse::<AvailabilityStatus>().is_err());
    }

    #[test]
    fn parse_skips_blank_entries() {
        let parsed = parse_submitted_dates(&["2025-12-01", "  ", "", "2025-12-03"]).unwrap();
        assert_eq!(parsed, vec![date(2025, 12, 1), date(2025, 12, 3)]);
    }

    #[test]
    fn parse_rejects_unpadded_and_garbage() {
        assert_matches!(parse_date("2025-12-1"), Err(CoreError::Validation(_)));
        assert_matches!(parse_date("01/12/2025"), Err(CoreError::Validation(_)));
        assert_matches!(parse_date("2025-02-30"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn normalize_dedupes_and_sorts() {
        let out = normalize_submission(
            &december_window(),
            [date(2025, 12, 3), date(2025, 12, 1), date(2025, 12, 3)],
        )
        .unwrap();
        assert_eq!(out, vec![date(2025, 12, 1), date(2025, 12, 3)]);
    }

    #[test]
    fn normalize_rejects_out_of_window_date() {
        let result = normalize_submission(
            &december_window(),
            [date(2025, 12, 2), date(2025, 12, 6)],
        );
        assert_matches!(result, Err(CoreError::InvalidDate(msg)) if msg.contains("2025-12-06"));
    }

    #[test]
    fn normalize_rejects_empty_submission() {
        let result = normalize_submission(&december_window(), []);
        assert_matches!(result, Err(CoreError::Validation(_)));
    }

    #[test]
    fn summary_counts_window_days() {
        let summary = AvailabilitySummary::new(&december_window(), 2);
        assert_eq!(summary.total_dates, 5);
        assert_eq!(summary.submitted_dates, 2);
    }
}
