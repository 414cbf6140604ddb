//! Generated period rows.

use serde::Serialize;
use sqlx::FromRow;
use tripsync_core::types::{CalendarDate, DbId, Timestamp};

/// A row from the `available_periods` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AvailablePeriod {
    pub id: DbId,
    pub trip_id: DbId,
    pub period_number: i32,
    pub start_date: CalendarDate,
    pub end_date: CalendarDate,
    pub duration_days: i32,
    /// Bottleneck: the fewest free members on any day of the period.
    pub free_count: i32,
    pub flexible_count: i32,
    pub total_members: i32,
    pub availability_percentage: f64,
    pub rank: String,
    pub created_at: Timestamp,
}
