//! Durable event persistence service.
//!
//! [`EventPersistence`] drains an [`EventBus`](crate::bus::EventBus)
//! subscription into the `events` table. It runs as a long-lived background
//! task and stops when the bus is dropped.

use tokio::sync::broadcast;
use tripsync_core::types::DbId;
use tripsync_db::repositories::EventRepo;
use tripsync_db::DbPool;

use crate::bus::PlatformEvent;

pub struct EventPersistence;

impl EventPersistence {
    /// Persist every event received on `receiver` until the channel closes.
    pub async fn run(pool: DbPool, mut receiver: broadcast::Receiver<PlatformEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    if let Err(e) = Self::persist(&pool, &event).await {
                        tracing::error!(
                            error = %e,
                            event_type = %event.event_type,
                            "Failed to persist event"
                        );
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(
                        skipped = n,
                        "Event persistence lagged, some events were not persisted"
                    );
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, persistence shutting down");
                    break;
                }
            }
        }
    }

    async fn persist(pool: &DbPool, event: &PlatformEvent) -> Result<DbId, sqlx::Error> {
        EventRepo::insert(
            pool,
            &event.event_type,
            event.trip_id,
            event.actor_user_id,
            &event.payload,
        )
        .await
    }
}
