//! Inclusive calendar-date range of a trip.

use serde::Serialize;

use crate::error::CoreError;
use crate::types::CalendarDate;

/// The inclusive `[start, end]` date range of a trip.
///
/// Construction through [`TripWindow::new`] guarantees `end >= start`, so
/// every window spans at least one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TripWindow {
    start: CalendarDate,
    end: CalendarDate,
}

impl TripWindow {
    /// Build a window, rejecting inverted ranges with
    /// [`CoreError::InvalidTripWindow`].
    pub fn new(start: CalendarDate, end: CalendarDate) -> Result<Self, CoreError> {
        if end < start {
            return Err(CoreError::InvalidTripWindow { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> CalendarDate {
        self.start
    }

    pub fn end(&self) -> CalendarDate {
        self.end
    }

    /// Whether `date` lies within the window (both ends inclusive).
    pub fn contains(&self, date: CalendarDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of calendar days in the window, inclusive.
    pub fn total_days(&self) -> u32 {
        days_inclusive(self.start, self.end)
    }

    /// Every date of the window in ascending order.
    pub fn days(&self) -> impl Iterator<Item = CalendarDate> {
        self.start.iter_days().take(self.total_days() as usize)
    }

    /// Zero-based position of `date` within the window, if it is inside.
    pub fn offset_of(&self, date: CalendarDate) -> Option<usize> {
        if self.contains(date) {
            Some((date - self.start).num_days() as usize)
        } else {
            None
        }
    }
}

/// Inclusive day count between two dates; `end` must not precede `start`.
pub fn days_inclusive(start: CalendarDate, end: CalendarDate) -> u32 {
    ((end - start).num_days() + 1) as u32
}
