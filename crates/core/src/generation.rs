//! Period generation pipeline: aggregate, extract, rank.
//!
//! [`plan_generation`] is the whole computation of a generation run. It
//! takes the snapshot read at the start of the run and returns everything
//! that must be persisted and reported, without touching storage.

use serde::Serialize;

use crate::aggregation::{
    aggregate_daily_counts, all_members_available_days, AvailabilitySnapshot, DailyCount,
};
use crate::error::CoreError;
use crate::periods::{extract_periods, ExtractParams};
use crate::ranking::{rank_periods, RankedPeriod};
use crate::trip_window::TripWindow;

/// Outcome class of a generation run. None of these are errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationStatus {
    Generated,
    /// The trip has members but no run met the thresholds.
    NoQualifyingPeriods,
    /// The trip has no accepted members; there was nothing to compute.
    NoEligibleMembers,
}

/// Summary reported alongside the generated periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GenerationStats {
    pub total_periods: u32,
    pub total_members: u32,
    pub all_members_available_days: u32,
    pub min_days: u32,
    pub min_availability_member: u32,
    pub status: GenerationStatus,
}

/// Result of [`plan_generation`].
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationPlan {
    pub daily_counts: Vec<DailyCount>,
    pub periods: Vec<RankedPeriod>,
    pub stats: GenerationStats,
}

/// Run the aggregation, extraction and ranking steps over one snapshot.
pub fn plan_generation(
    window: &TripWindow,
    snapshot: &AvailabilitySnapshot,
    params: ExtractParams,
) -> Result<GenerationPlan, CoreError> {
    let total_members = snapshot.total_members();
    let daily_counts = aggregate_daily_counts(window, snapshot);
    let raw = extract_periods(&daily_counts, params)?;
    let periods = rank_periods(&raw, total_members);

    let status = if total_members == 0 {
        GenerationStatus::NoEligibleMembers
    } else if periods.is_empty() {
        GenerationStatus::NoQualifyingPeriods
    } else {
        GenerationStatus::Generated
    };

    let stats = GenerationStats {
        total_periods: periods.len() as u32,
        total_members,
        all_members_available_days: all_members_available_days(&daily_counts, total_members),
        min_days: params.min_days,
        min_availability_member: params.min_availability_member,
        status,
    };

    Ok(GenerationPlan {
        daily_counts,
        periods,
        stats,
    })
}
