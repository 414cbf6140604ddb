//! Read access to `trips` and `trip_members`.
//!
//! Trips and memberships are written by the trip management service;
//! availability planning only reads them.

use sqlx::PgPool;
use tripsync_core::types::DbId;

use crate::models::trip::Trip;

/// Column list for `trips` queries.
const COLUMNS: &str = "id, name, creator_id, start_date, end_date, created_at, updated_at";

pub struct TripRepo;

impl TripRepo {
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Trip>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM trips WHERE id = $1");
        sqlx::query_as::<_, Trip>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether `user_id` may act on the trip: the creator, or anyone with a
    /// membership row regardless of its status.
    pub async fn is_participant(
        pool: &PgPool,
        trip_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM trips WHERE id = $1 AND creator_id = $2) \
                 OR EXISTS (SELECT 1 FROM trip_members WHERE trip_id = $1 AND user_id = $2)",
        )
        .bind(trip_id)
        .bind(user_id)
        .fetch_one(pool)
        .await
    }
}
