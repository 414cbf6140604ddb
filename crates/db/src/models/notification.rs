//! Notification entity model and DTO.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tripsync_core::types::{DbId, Timestamp};

/// A row from the `notifications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub user_id: DbId,
    pub trip_id: Option<DbId>,
    pub notification_type: String,
    pub title: String,
    pub message: Option<String>,
    pub data: Option<serde_json::Value>,
    pub action_url: Option<String>,
    pub is_read: bool,
    pub read_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for inserting a notification.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateNotification {
    pub user_id: DbId,
    pub trip_id: Option<DbId>,
    pub notification_type: String,
    pub title: String,
    pub message: Option<String>,
    pub data: Option<serde_json::Value>,
    pub action_url: Option<String>,
}
