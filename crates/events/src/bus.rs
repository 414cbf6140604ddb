//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is shared via `Arc<EventBus>` across the application.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tripsync_core::types::DbId;

// ---------------------------------------------------------------------------
// PlatformEvent
// ---------------------------------------------------------------------------

/// Something that happened to a trip.
///
/// Built with [`PlatformEvent::new`] and the `with_*` builder methods.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformEvent {
    /// Dot-separated event name, e.g. `"periods.generated"`.
    pub event_type: String,

    pub trip_id: Option<DbId>,

    /// The user whose request caused the event.
    pub actor_user_id: Option<DbId>,

    /// Event-specific data.
    pub payload: serde_json::Value,

    pub timestamp: DateTime<Utc>,
}

impl PlatformEvent {
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            trip_id: None,
            actor_user_id: None,
            payload: serde_json::Value::Object(Default::default()),
            timestamp: Utc::now(),
        }
    }

    pub fn with_trip(mut self, trip_id: DbId) -> Self {
        self.trip_id = Some(trip_id);
        self
    }

    pub fn with_actor(mut self, user_id: DbId) -> Self {
        self.actor_user_id = Some(user_id);
        self
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// Fan-out bus: every subscriber receives every published event.
pub struct EventBus {
    sender: broadcast::Sender<PlatformEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full the oldest unread events are dropped and slow
    /// receivers observe `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish to all current subscribers. Dropped if there are none.
    pub fn publish(&self, event: PlatformEvent) {
        // A send error only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PlatformEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscriber_receives_published_event() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        bus.publish(
            PlatformEvent::new("periods.generated")
                .with_trip(42)
                .with_actor(7)
                .with_payload(serde_json::json!({ "total_periods": 3 })),
        );

        let received = rx.recv().await.unwrap();
        assert_eq!(received.event_type, "periods.generated");
        assert_eq!(received.trip_id, Some(42));
        assert_eq!(received.actor_user_id, Some(7));
        assert_eq!(received.payload["total_periods"], 3);
    }

    #[tokio::test]
    async fn every_subscriber_gets_a_copy() {
        let bus = EventBus::default();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(PlatformEvent::new("availability.submitted"));

        assert_eq!(rx1.recv().await.unwrap().event_type, "availability.submitted");
        assert_eq!(rx2.recv().await.unwrap().event_type, "availability.submitted");
    }

    #[test]
    fn publish_without_subscribers_is_a_no_op() {
        EventBus::default().publish(PlatformEvent::new("orphan"));
    }

    #[test]
    fn new_event_has_empty_optional_fields() {
        let event = PlatformEvent::new("bare");
        assert!(event.trip_id.is_none());
        assert!(event.actor_user_id.is_none());
        assert!(event.payload.is_object());
    }
}
