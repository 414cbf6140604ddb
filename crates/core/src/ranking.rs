//! Period ranking.
//!
//! Orders extracted periods by bottleneck attendance, then length, then
//! start date, and numbers them densely from 1.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::periods::RawPeriod;
use crate::types::CalendarDate;

// ---------------------------------------------------------------------------
// Rank label
// ---------------------------------------------------------------------------

/// Attendance class of a period, derived from its bottleneck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodRank {
    /// Every accepted member is free on every day.
    Full,
    /// At least half of the accepted members are free on every day.
    Majority,
    Partial,
}

impl PeriodRank {
    pub fn from_bottleneck(min_free: u32, total_members: u32) -> Self {
        if total_members > 0 && min_free >= total_members {
            PeriodRank::Full
        } else if total_members > 0 && u64::from(min_free) * 2 >= u64::from(total_members) {
            PeriodRank::Majority
        } else {
            PeriodRank::Partial
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PeriodRank::Full => "full",
            PeriodRank::Majority => "majority",
            PeriodRank::Partial => "partial",
        }
    }
}

impl fmt::Display for PeriodRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Ranked period
// ---------------------------------------------------------------------------

/// A period in its final ranked form, ready to persist.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedPeriod {
    /// Dense 1-based position in rank order.
    pub period_number: u32,
    pub start_date: CalendarDate,
    pub end_date: CalendarDate,
    pub duration_days: u32,
    pub min_free_count: u32,
    pub total_members: u32,
    pub availability_percentage: f64,
    pub rank: PeriodRank,
}

/// Rank comparator: higher bottleneck first, then longer, then earlier.
pub fn compare_periods(a: &RawPeriod, b: &RawPeriod) -> Ordering {
    b.min_free
        .cmp(&a.min_free)
        .then_with(|| b.duration_days.cmp(&a.duration_days))
        .then_with(|| a.start_date.cmp(&b.start_date))
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `min_free / total_members * 100`, rounded to two decimals; `0` when
/// there are no members.
pub fn availability_percentage(min_free: u32, total_members: u32) -> f64 {
    if total_members == 0 {
        return 0.0;
    }
    round2(f64::from(min_free) / f64::from(total_members) * 100.0)
}

/// Sort `raw` into rank order and assign period numbers `1..=N`.
///
/// Pure and deterministic: the comparator is total over distinct periods
/// and the sort is stable, so identical input always yields identical
/// numbering.
pub fn rank_periods(raw: &[RawPeriod], total_members: u32) -> Vec<RankedPeriod> {
    let mut ordered = raw.to_vec();
    ordered.sort_by(compare_periods);

    ordered
        .into_iter()
        .enumerate()
        .map(|(i, p)| RankedPeriod {
            period_number: i as u32 + 1,
            start_date: p.start_date,
            end_date: p.end_date,
            duration_days: p.duration_days,
            min_free_count: p.min_free,
            total_members,
            availability_percentage: availability_percentage(p.min_free, total_members),
            rank: PeriodRank::from_bottleneck(p.min_free, total_members),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> CalendarDate {
        CalendarDate::from_ymd_opt(2025, 12, d).unwrap()
    }

    fn raw(start: u32, end: u32, min_free: u32) -> RawPeriod {
        RawPeriod {
            start_date: date(start),
            end_date: date(end),
            min_free,
            duration_days: end - start + 1,
        }
    }

    #[test]
    fn higher_bottleneck_ranks_first() {
        let ranked = rank_periods(&[raw(1, 10, 1), raw(20, 21, 3)], 4);
        assert_eq!(ranked[0].start_date, date(20));
        assert_eq!(ranked[1].start_date, date(1));
    }

    #[test]
    fn longer_period_breaks_bottleneck_tie() {
        let ranked = rank_periods(&[raw(1, 2, 2), raw(5, 9, 2)], 4);
        assert_eq!(ranked[0].start_date, date(5));
    }

    #[test]
    fn earlier_start_breaks_remaining_tie() {
        let ranked = rank_periods(&[raw(10, 12, 2), raw(1, 3, 2)], 4);
        assert_eq!(ranked[0].start_date, date(1));
        assert_eq!(ranked[1].start_date, date(10));
    }

    #[test]
    fn period_numbers_are_dense() {
        let ranked = rank_periods(&[raw(1, 1, 1), raw(3, 4, 2), raw(6, 9, 1)], 2);
        let numbers: Vec<_> = ranked.iter().map(|p| p.period_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn ranking_is_deterministic() {
        let input = [raw(6, 9, 1), raw(1, 1, 1), raw(3, 4, 2), raw(12, 15, 1)];
        assert_eq!(rank_periods(&input, 3), rank_periods(&input, 3));
    }

    #[test]
    fn percentage_rounds_to_two_decimals() {
        assert_eq!(availability_percentage(2, 2), 100.0);
        assert_eq!(availability_percentage(1, 2), 50.0);
        assert_eq!(availability_percentage(1, 3), 33.33);
        assert_eq!(availability_percentage(2, 3), 66.67);
    }

    #[test]
    fn percentage_is_zero_without_members() {
        assert_eq!(availability_percentage(0, 0), 0.0);
        assert_eq!(availability_percentage(3, 0), 0.0);
    }

    #[test]
    fn rank_label_from_bottleneck() {
        assert_eq!(PeriodRank::from_bottleneck(4, 4), PeriodRank::Full);
        assert_eq!(PeriodRank::from_bottleneck(2, 4), PeriodRank::Majority);
        assert_eq!(PeriodRank::from_bottleneck(1, 4), PeriodRank::Partial);
        assert_eq!(PeriodRank::from_bottleneck(0, 0), PeriodRank::Partial);
    }

    #[test]
    fn empty_input_ranks_to_empty() {
        assert!(rank_periods(&[], 5).is_empty());
    }
}
