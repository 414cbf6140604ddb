//! Daily quorum aggregation.
//!
//! Turns one consistent snapshot of the accepted-member set and their
//! ledger rows into a per-day count of free members covering the whole
//! trip window.

use std::collections::{BTreeSet, HashSet};

use serde::Serialize;

use crate::availability::AvailabilityStatus;
use crate::trip_window::TripWindow;
use crate::types::{CalendarDate, DbId};

/// Number of accepted members free on one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    pub date: CalendarDate,
    pub free_count: u32,
}

/// One ledger row as read for aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailabilityEntry {
    pub user_id: DbId,
    pub date: CalendarDate,
    pub status: AvailabilityStatus,
}

/// Membership and ledger state captured once at the start of a generation
/// run. Everything downstream works from this value only, so membership
/// changes that land mid-run cannot leak into the result.
#[derive(Debug, Clone, Default)]
pub struct AvailabilitySnapshot {
    pub accepted_members: BTreeSet<DbId>,
    pub entries: Vec<AvailabilityEntry>,
}

impl AvailabilitySnapshot {
    pub fn total_members(&self) -> u32 {
        self.accepted_members.len() as u32
    }
}

/// Count free accepted members for every day of `window`.
///
/// Always yields exactly `window.total_days()` entries in ascending date
/// order, zero-count days included. Rows from members outside the accepted
/// set, rows outside the window, and repeated `(user, date)` rows are
/// ignored. An empty member set yields all zeros.
pub fn aggregate_daily_counts(
    window: &TripWindow,
    snapshot: &AvailabilitySnapshot,
) -> Vec<DailyCount> {
    let mut counts = vec![0u32; window.total_days() as usize];
    let mut seen: HashSet<(DbId, CalendarDate)> = HashSet::new();

    for entry in &snapshot.entries {
        if !entry.status.counts_toward_quorum()
            || !snapshot.accepted_members.contains(&entry.user_id)
        {
            continue;
        }
        let Some(offset) = window.offset_of(entry.date) else {
            continue;
        };
        if seen.insert((entry.user_id, entry.date)) {
            counts[offset] += 1;
        }
    }

    window
        .days()
        .zip(counts)
        .map(|(date, free_count)| DailyCount { date, free_count })
        .collect()
}

/// Days on which every accepted member is free. Zero when there are no
/// accepted members.
pub fn all_members_available_days(daily: &[DailyCount], total_members: u32) -> u32 {
    if total_members == 0 {
        return 0;
    }
    daily
        .iter()
        .filter(|d| d.free_count == total_members)
        .count() as u32
}
