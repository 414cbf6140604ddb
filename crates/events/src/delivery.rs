//! Notification delivery seam.
//!
//! [`NotificationSink`] is where a finished notification leaves this crate.
//! Production uses [`DbNotificationSink`], which writes to the
//! `notifications` inbox table; tests substitute their own sinks.

use async_trait::async_trait;
use serde::Serialize;
use tripsync_core::error::CoreError;
use tripsync_core::notifications::validate_notification_content;
use tripsync_core::types::DbId;
use tripsync_db::models::notification::CreateNotification;
use tripsync_db::repositories::NotificationRepo;
use tripsync_db::DbPool;

// ---------------------------------------------------------------------------
// Outgoing notification
// ---------------------------------------------------------------------------

/// A notification addressed to one user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutgoingNotification {
    pub user_id: DbId,
    pub trip_id: Option<DbId>,
    pub notification_type: String,
    pub title: String,
    pub message: Option<String>,
    pub data: Option<serde_json::Value>,
    pub action_url: Option<String>,
}

impl OutgoingNotification {
    pub fn validate(&self) -> Result<(), DeliveryError> {
        validate_notification_content(
            &self.title,
            self.message.as_deref(),
            self.action_url.as_deref(),
        )
        .map_err(|e| match e {
            CoreError::Validation(msg) => DeliveryError::Invalid(msg),
            other => DeliveryError::Invalid(other.to_string()),
        })
    }
}

impl From<&OutgoingNotification> for CreateNotification {
    fn from(n: &OutgoingNotification) -> Self {
        CreateNotification {
            user_id: n.user_id,
            trip_id: n.trip_id,
            notification_type: n.notification_type.clone(),
            title: n.title.clone(),
            message: n.message.clone(),
            data: n.data.clone(),
            action_url: n.action_url.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    /// The content can never be accepted. Not retried.
    #[error("invalid notification: {0}")]
    Invalid(String),

    /// The sink failed in a way that may clear up on its own.
    #[error("delivery failed: {0}")]
    Transient(String),

    #[error("delivery attempt timed out after {0:?}")]
    TimedOut(std::time::Duration),
}

impl DeliveryError {
    pub fn is_retryable(&self) -> bool {
        !matches!(self, DeliveryError::Invalid(_))
    }
}

// ---------------------------------------------------------------------------
// Sink
// ---------------------------------------------------------------------------

/// Destination for outgoing notifications.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Deliver one notification. Called once per attempt.
    async fn deliver(&self, notification: &OutgoingNotification) -> Result<(), DeliveryError>;
}

/// Writes notifications to the `notifications` table.
pub struct DbNotificationSink {
    pool: DbPool,
}

impl DbNotificationSink {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationSink for DbNotificationSink {
    async fn deliver(&self, notification: &OutgoingNotification) -> Result<(), DeliveryError> {
        let input = CreateNotification::from(notification);
        NotificationRepo::create(&self.pool, &input)
            .await
            .map(|_| ())
            .map_err(classify_sqlx_error)
    }
}

/// Constraint and data errors mean the row will never insert; everything
/// else (pool exhaustion, I/O) is worth another try.
fn classify_sqlx_error(err: sqlx::Error) -> DeliveryError {
    match &err {
        sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
            // string_data_right_truncation, foreign_key_violation, not_null_violation
            Some("22001") | Some("23503") | Some("23502") => {
                DeliveryError::Invalid(db_err.message().to_string())
            }
            _ => DeliveryError::Transient(err.to_string()),
        },
        _ => DeliveryError::Transient(err.to_string()),
    }
}
