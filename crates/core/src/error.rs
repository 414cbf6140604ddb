use crate::types::{CalendarDate, DbId};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// A submitted date falls outside the trip window.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// The trip's own date range is inverted. This is a data-integrity
    /// fault in the trip record, not something the caller can fix.
    #[error("Invalid trip window: end date {end} is before start date {start}")]
    InvalidTripWindow {
        start: CalendarDate,
        end: CalendarDate,
    },

    /// Missing or invalid credentials.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated, but not a participant of the trip.
    #[error("Not authorized: {0}")]
    NotAuthorized(String),

    /// A transactional replace could not commit. Safe to retry.
    #[error("Storage conflict: {0}")]
    StorageConflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Whether the caller may retry the same request unchanged.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CoreError::StorageConflict(_))
    }
}
