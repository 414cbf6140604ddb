//! Period extraction (gaps-and-islands over daily counts).
//!
//! A day qualifies when at least `min_availability_member` accepted members
//! are free on it. Consecutive qualifying days form a run; a non-qualifying
//! day or a calendar gap closes the current run. Runs shorter than
//! `min_days` are dropped.

use serde::Serialize;

use crate::aggregation::DailyCount;
use crate::error::CoreError;
use crate::trip_window::days_inclusive;
use crate::types::CalendarDate;

// ---------------------------------------------------------------------------
// Parameters
// ---------------------------------------------------------------------------

/// Fallback minimum run length when the caller supplies nothing or `<= 0`.
pub const DEFAULT_MIN_DAYS: u32 = 1;

/// Fallback quorum threshold when the caller supplies nothing or `<= 0`.
pub const DEFAULT_MIN_AVAILABILITY_MEMBER: u32 = 1;

/// Effective extraction thresholds, always `>= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExtractParams {
    pub min_days: u32,
    pub min_availability_member: u32,
}

impl ExtractParams {
    /// Build parameters from raw request values, substituting the defaults
    /// for missing or non-positive inputs.
    pub fn from_request(min_days: Option<i64>, min_availability_member: Option<i64>) -> Self {
        Self {
            min_days: positive_or(min_days, DEFAULT_MIN_DAYS),
            min_availability_member: positive_or(
                min_availability_member,
                DEFAULT_MIN_AVAILABILITY_MEMBER,
            ),
        }
    }
}

impl Default for ExtractParams {
    fn default() -> Self {
        Self {
            min_days: DEFAULT_MIN_DAYS,
            min_availability_member: DEFAULT_MIN_AVAILABILITY_MEMBER,
        }
    }
}

fn positive_or(value: Option<i64>, default: u32) -> u32 {
    match value {
        Some(v) if v > 0 => u32::try_from(v).unwrap_or(u32::MAX),
        _ => default,
    }
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// A maximal run of qualifying days, before ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawPeriod {
    pub start_date: CalendarDate,
    pub end_date: CalendarDate,
    /// Smallest daily free count within the run.
    pub min_free: u32,
    pub duration_days: u32,
}

/// Run under construction during the scan.
struct OpenRun {
    start: CalendarDate,
    end: CalendarDate,
    min_free: u32,
}

impl OpenRun {
    fn close(self) -> RawPeriod {
        RawPeriod {
            start_date: self.start,
            end_date: self.end,
            min_free: self.min_free,
            duration_days: days_inclusive(self.start, self.end),
        }
    }
}

/// Extract qualifying periods from `daily` in a single left-to-right pass.
///
/// `daily` must be strictly ascending by date. Anything else is a
/// programming error upstream and is reported as [`CoreError::Internal`].
/// Gaps between dates are allowed and always close the current run.
pub fn extract_periods(
    daily: &[DailyCount],
    params: ExtractParams,
) -> Result<Vec<RawPeriod>, CoreError> {
    ensure_strictly_ascending(daily)?;

    let threshold = params.min_availability_member.max(1);
    let min_days = params.min_days.max(1);

    let mut periods = Vec::new();
    let mut current: Option<OpenRun> = None;

    let close = |run: OpenRun, periods: &mut Vec<RawPeriod>| {
        let period = run.close();
        if period.duration_days >= min_days {
            periods.push(period);
        }
    };

    for day in daily {
        if day.free_count < threshold {
            if let Some(run) = current.take() {
                close(run, &mut periods);
            }
            continue;
        }

        let extends = current
            .as_ref()
            .is_some_and(|run| run.end.succ_opt() == Some(day.date));

        if extends {
            if let Some(run) = current.as_mut() {
                run.end = day.date;
                run.min_free = run.min_free.min(day.free_count);
            }
        } else {
            if let Some(run) = current.take() {
                close(run, &mut periods);
            }
            current = Some(OpenRun {
                start: day.date,
                end: day.date,
                min_free: day.free_count,
            });
        }
    }

    if let Some(run) = current.take() {
        close(run, &mut periods);
    }

    Ok(periods)
}

fn ensure_strictly_ascending(daily: &[DailyCount]) -> Result<(), CoreError> {
    match daily.windows(2).find(|pair| pair[1].date <= pair[0].date) {
        Some(pair) => Err(CoreError::Internal(format!(
            "daily counts out of order: {} followed by {}",
            pair[0].date, pair[1].date
        ))),
        None => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
