//! Persisted platform events.

use serde::Serialize;
use sqlx::FromRow;
use tripsync_core::types::{DbId, Timestamp};

/// A row from the `events` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Event {
    pub id: DbId,
    pub event_type: String,
    pub trip_id: Option<DbId>,
    pub actor_user_id: Option<DbId>,
    pub payload: serde_json::Value,
    pub created_at: Timestamp,
}
