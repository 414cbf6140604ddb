//! Inputs read from the availability ledger.

use tripsync_core::aggregation::AvailabilitySnapshot;

use crate::models::trip::Trip;

/// Everything a generation run reads, captured in one transaction.
#[derive(Debug, Clone)]
pub struct GenerationSnapshot {
    pub trip: Trip,
    pub availability: AvailabilitySnapshot,
}
