//! Repository for the `events` audit table.

use sqlx::PgPool;
use tripsync_core::types::DbId;

use crate::models::event::Event;

/// Column list for `events` queries.
const COLUMNS: &str = "id, event_type, trip_id, actor_user_id, payload, created_at";

pub struct EventRepo;

impl EventRepo {
    /// Insert a new event row, returning the generated ID.
    pub async fn insert(
        pool: &PgPool,
        event_type: &str,
        trip_id: Option<DbId>,
        actor_user_id: Option<DbId>,
        payload: &serde_json::Value,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO events (event_type, trip_id, actor_user_id, payload) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id",
        )
        .bind(event_type)
        .bind(trip_id)
        .bind(actor_user_id)
        .bind(payload)
        .fetch_one(pool)
        .await
    }

    /// Events recorded for a trip, oldest first.
    pub async fn list_for_trip(pool: &PgPool, trip_id: DbId) -> Result<Vec<Event>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM events WHERE trip_id = $1 ORDER BY id");
        sqlx::query_as::<_, Event>(&query)
            .bind(trip_id)
            .fetch_all(pool)
            .await
    }
}
