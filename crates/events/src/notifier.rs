//! Fire-and-forget result notifications.
//!
//! [`ResultNotifier`] hands notifications to a [`NotificationSink`] on a
//! detached task. The caller never waits: a slow or failing sink cannot
//! delay or fail the request that produced the result. Each recipient is
//! delivered independently with its own bounded retry and a timeout on
//! every attempt. Failures are logged and then dropped.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use serde_json::json;
use tokio::task::JoinHandle;
use tokio_util::task::TaskTracker;
use tripsync_core::generation::GenerationStats;
use tripsync_core::notifications::{trip_url, TYPE_AVAILABILITY_UPDATED, TYPE_TRIP_UPDATE};
use tripsync_core::retry::RetryPolicy;
use tripsync_core::types::DbId;

use crate::delivery::{DeliveryError, NotificationSink, OutgoingNotification};

/// Outcome of one fan-out, for logging and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    pub delivered: usize,
    pub failed: usize,
}

/// Details of a member's availability submission, sent to the trip creator.
#[derive(Debug, Clone)]
pub struct SubmissionNotice {
    pub trip_id: DbId,
    pub trip_name: String,
    pub creator_id: DbId,
    pub submitter_id: DbId,
    pub submitter_name: String,
    pub submitted_days: usize,
}

pub struct ResultNotifier {
    sink: Arc<dyn NotificationSink>,
    policy: RetryPolicy,
    frontend_url: String,
    tracker: TaskTracker,
}

impl ResultNotifier {
    pub fn new(
        sink: Arc<dyn NotificationSink>,
        policy: RetryPolicy,
        frontend_url: impl Into<String>,
    ) -> Self {
        Self {
            sink,
            policy,
            frontend_url: frontend_url.into(),
            tracker: TaskTracker::new(),
        }
    }

    /// Tell every recipient that the trip has a new period set.
    ///
    /// Call only after the period set has been committed. Returns at once;
    /// the handle may be dropped without cancelling delivery.
    pub fn notify_generated(
        &self,
        trip_id: DbId,
        trip_name: &str,
        recipients: &[DbId],
        stats: &GenerationStats,
    ) -> JoinHandle<DeliveryReport> {
        let message = format!(
            "{} new suggested periods generated for {trip_name}",
            stats.total_periods
        );
        let data = json!({
            "trip_id": trip_id,
            "trip_name": trip_name,
            "total_periods": stats.total_periods,
            "min_days": stats.min_days,
            "min_availability_member": stats.min_availability_member,
        });

        let notifications = recipients
            .iter()
            .map(|&user_id| OutgoingNotification {
                user_id,
                trip_id: Some(trip_id),
                notification_type: TYPE_TRIP_UPDATE.to_string(),
                title: "Updated availability periods".to_string(),
                message: Some(message.clone()),
                data: Some(data.clone()),
                action_url: Some(trip_url(&self.frontend_url, trip_id)),
            })
            .collect();

        self.dispatch("periods_generated", notifications)
    }

    /// Tell the trip creator that a member submitted availability.
    pub fn notify_availability_submitted(
        &self,
        notice: &SubmissionNotice,
    ) -> JoinHandle<DeliveryReport> {
        let notification = OutgoingNotification {
            user_id: notice.creator_id,
            trip_id: Some(notice.trip_id),
            notification_type: TYPE_AVAILABILITY_UPDATED.to_string(),
            title: "Availability submitted".to_string(),
            message: Some(format!(
                "{} submitted availability for {} ({} days)",
                notice.submitter_name, notice.trip_name, notice.submitted_days
            )),
            data: Some(json!({
                "trip_id": notice.trip_id,
                "trip_name": notice.trip_name,
                "user_id": notice.submitter_id,
                "user_display_name": notice.submitter_name,
                "submitted_days": notice.submitted_days,
            })),
            action_url: Some(trip_url(&self.frontend_url, notice.trip_id)),
        };

        self.dispatch("availability_submitted", vec![notification])
    }

    /// Stop accepting new work and wait up to `grace` for in-flight
    /// deliveries. Returns `false` if some were still running.
    pub async fn shutdown(&self, grace: Duration) -> bool {
        self.tracker.close();
        tokio::time::timeout(grace, self.tracker.wait())
            .await
            .is_ok()
    }

    fn dispatch(
        &self,
        kind: &'static str,
        notifications: Vec<OutgoingNotification>,
    ) -> JoinHandle<DeliveryReport> {
        let sink = Arc::clone(&self.sink);
        let policy = self.policy;

        self.tracker.spawn(async move {
            let outcomes = join_all(
                notifications
                    .iter()
                    .map(|n| deliver_with_retry(sink.as_ref(), policy, n)),
            )
            .await;

            let mut report = DeliveryReport::default();
            for (notification, outcome) in notifications.iter().zip(outcomes) {
                match outcome {
                    Ok(()) => report.delivered += 1,
                    Err(e) => {
                        report.failed += 1;
                        tracing::error!(
                            kind,
                            user_id = notification.user_id,
                            trip_id = ?notification.trip_id,
                            error = %e,
                            "Notification dropped",
                        );
                    }
                }
            }

            tracing::debug!(
                kind,
                delivered = report.delivered,
                failed = report.failed,
                "Notification fan-out finished",
            );
            report
        })
    }
}

/// Deliver one notification, retrying transient failures within `policy`.
pub async fn deliver_with_retry(
    sink: &dyn NotificationSink,
    policy: RetryPolicy,
    notification: &OutgoingNotification,
) -> Result<(), DeliveryError> {
    notification.validate()?;

    let mut attempt = 1;
    loop {
        let result = match policy.attempt_timeout {
            Some(limit) => tokio::time::timeout(limit, sink.deliver(notification))
                .await
                .unwrap_or(Err(DeliveryError::TimedOut(limit))),
            None => sink.deliver(notification).await,
        };

        match result {
            Ok(()) => return Ok(()),
            Err(e) if e.is_retryable() && policy.should_retry(attempt) => {
                let delay = policy.backoff(attempt);
                tracing::warn!(
                    attempt,
                    user_id = notification.user_id,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "Notification attempt failed, retrying",
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
