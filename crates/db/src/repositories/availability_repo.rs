//! Repository for the `availabilities` ledger.

use std::collections::BTreeSet;

use sqlx::PgPool;
use tripsync_core::aggregation::{AvailabilityEntry, AvailabilitySnapshot};
use tripsync_core::types::{CalendarDate, DbId};

use crate::models::availability::GenerationSnapshot;
use crate::models::status::{AvailabilityStatusId, MemberStatus, StatusId};
use crate::models::trip::Trip;

pub struct AvailabilityRepo;

impl AvailabilityRepo {
    /// Replace the member's whole ledger for the trip with `dates`, all
    /// stored as free, and flag the membership as submitted.
    ///
    /// Runs in one transaction holding a per-member advisory lock, so
    /// concurrent replaces for the same member apply one after the other and
    /// readers see either the old set or the new set, never a mix. Returns
    /// the number of rows written, or `None` without writing anything if
    /// `user_id` is not a participant of the trip.
    pub async fn replace_for_member(
        pool: &PgPool,
        trip_id: DbId,
        user_id: DbId,
        dates: &[CalendarDate],
    ) -> Result<Option<u64>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query(
            "SELECT pg_advisory_xact_lock(\
                 hashtextextended(format('availability:%s:%s', $1::bigint, $2::bigint), 0))",
        )
        .bind(trip_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        let participant: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM trips WHERE id = $1 AND creator_id = $2) \
                 OR EXISTS (SELECT 1 FROM trip_members WHERE trip_id = $1 AND user_id = $2)",
        )
        .bind(trip_id)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;
        if !participant {
            return Ok(None);
        }

        sqlx::query("DELETE FROM availabilities WHERE trip_id = $1 AND user_id = $2")
            .bind(trip_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        let inserted = sqlx::query(
            "INSERT INTO availabilities (trip_id, user_id, date, status_id) \
             SELECT $1, $2, d, $4 FROM UNNEST($3::date[]) AS t(d)",
        )
        .bind(trip_id)
        .bind(user_id)
        .bind(dates)
        .bind(AvailabilityStatusId::Free.id())
        .execute(&mut *tx)
        .await?
        .rows_affected();

        sqlx::query(
            "UPDATE trip_members \
             SET availability_submitted = true, updated_at = NOW() \
             WHERE trip_id = $1 AND user_id = $2",
        )
        .bind(trip_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(inserted))
    }

    /// Dates the member has on file for the trip, ascending.
    pub async fn list_dates_for_member(
        pool: &PgPool,
        trip_id: DbId,
        user_id: DbId,
    ) -> Result<Vec<CalendarDate>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT date FROM availabilities \
             WHERE trip_id = $1 AND user_id = $2 \
             ORDER BY date",
        )
        .bind(trip_id)
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Read the trip, its accepted members and their ledger rows from one
    /// REPEATABLE READ snapshot. Returns `None` if the trip does not exist.
    pub async fn load_generation_snapshot(
        pool: &PgPool,
        trip_id: DbId,
    ) -> Result<Option<GenerationSnapshot>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await?;

        let trip = sqlx::query_as::<_, Trip>(
            "SELECT id, name, creator_id, start_date, end_date, created_at, updated_at \
             FROM trips WHERE id = $1",
        )
        .bind(trip_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(trip) = trip else {
            tx.rollback().await?;
            return Ok(None);
        };

        let accepted_members: BTreeSet<DbId> = sqlx::query_scalar::<_, DbId>(
            "SELECT user_id FROM trip_members WHERE trip_id = $1 AND status_id = $2",
        )
        .bind(trip_id)
        .bind(MemberStatus::Accepted.id())
        .fetch_all(&mut *tx)
        .await?
        .into_iter()
        .collect();

        let rows: Vec<(DbId, CalendarDate, StatusId)> = sqlx::query_as(
            "SELECT a.user_id, a.date, a.status_id \
             FROM availabilities a \
             JOIN trip_members tm ON tm.trip_id = a.trip_id AND tm.user_id = a.user_id \
             WHERE a.trip_id = $1 AND tm.status_id = $2 \
               AND a.date BETWEEN $3 AND $4",
        )
        .bind(trip_id)
        .bind(MemberStatus::Accepted.id())
        .bind(trip.start_date)
        .bind(trip.end_date)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        let entries = rows
            .into_iter()
            .filter_map(|(user_id, date, status_id)| {
                match AvailabilityStatusId::from_id(status_id) {
                    Some(status) => Some(AvailabilityEntry {
                        user_id,
                        date,
                        status: status.into(),
                    }),
                    None => {
                        tracing::warn!(trip_id, user_id, status_id, "Unknown availability status");
                        None
                    }
                }
            })
            .collect();

        Ok(Some(GenerationSnapshot {
            trip,
            availability: AvailabilitySnapshot {
                accepted_members,
                entries,
            },
        }))
    }
}
