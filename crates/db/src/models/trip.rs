//! Trip rows as seen by availability planning.

use serde::Serialize;
use sqlx::FromRow;
use tripsync_core::error::CoreError;
use tripsync_core::trip_window::TripWindow;
use tripsync_core::types::{CalendarDate, DbId, Timestamp};

/// A row from the `trips` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Trip {
    pub id: DbId,
    pub name: String,
    pub creator_id: DbId,
    pub start_date: CalendarDate,
    pub end_date: CalendarDate,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Trip {
    /// The trip's date window. Fails if the stored range is inverted.
    pub fn window(&self) -> Result<TripWindow, CoreError> {
        TripWindow::new(self.start_date, self.end_date)
    }
}
