//! Repository for the `available_periods` table.

use sqlx::PgPool;
use tripsync_core::ranking::RankedPeriod;
use tripsync_core::types::{CalendarDate, DbId};

use crate::models::period::AvailablePeriod;

/// Column list for `available_periods` queries.
const COLUMNS: &str = "id, trip_id, period_number, start_date, end_date, duration_days, \
    free_count, flexible_count, total_members, availability_percentage, rank, created_at";

pub struct PeriodRepo;

impl PeriodRepo {
    /// Replace the trip's full period set with `periods`.
    ///
    /// The trip row is locked first, so concurrent replaces for the same
    /// trip commit one after the other and the last one wins whole. Readers
    /// never see a partial set. Fails with `RowNotFound` if the trip is
    /// gone. Returns the stored rows ordered by period number.
    pub async fn replace_for_trip(
        pool: &PgPool,
        trip_id: DbId,
        periods: &[RankedPeriod],
    ) -> Result<Vec<AvailablePeriod>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query_scalar::<_, DbId>("SELECT id FROM trips WHERE id = $1 FOR UPDATE")
            .bind(trip_id)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM available_periods WHERE trip_id = $1")
            .bind(trip_id)
            .execute(&mut *tx)
            .await?;

        let mut stored = if periods.is_empty() {
            Vec::new()
        } else {
            let columns = PeriodColumns::from_periods(periods);
            let query = format!(
                "INSERT INTO available_periods \
                    (trip_id, period_number, start_date, end_date, duration_days, \
                     free_count, flexible_count, total_members, availability_percentage, rank) \
                 SELECT $1, p.period_number, p.start_date, p.end_date, p.duration_days, \
                        p.free_count, 0, p.total_members, p.availability_percentage, p.rank \
                 FROM UNNEST($2::int4[], $3::date[], $4::date[], $5::int4[], \
                             $6::int4[], $7::int4[], $8::float8[], $9::text[]) \
                   AS p(period_number, start_date, end_date, duration_days, \
                        free_count, total_members, availability_percentage, rank) \
                 RETURNING {COLUMNS}"
            );
            sqlx::query_as::<_, AvailablePeriod>(&query)
                .bind(trip_id)
                .bind(&columns.period_numbers)
                .bind(&columns.start_dates)
                .bind(&columns.end_dates)
                .bind(&columns.durations)
                .bind(&columns.free_counts)
                .bind(&columns.total_members)
                .bind(&columns.percentages)
                .bind(&columns.ranks)
                .fetch_all(&mut *tx)
                .await?
        };

        tx.commit().await?;

        stored.sort_by_key(|p| p.period_number);
        Ok(stored)
    }

    /// The trip's current period set, ordered by period number.
    pub async fn list_for_trip(
        pool: &PgPool,
        trip_id: DbId,
    ) -> Result<Vec<AvailablePeriod>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM available_periods \
             WHERE trip_id = $1 \
             ORDER BY period_number"
        );
        sqlx::query_as::<_, AvailablePeriod>(&query)
            .bind(trip_id)
            .fetch_all(pool)
            .await
    }
}

/// Column-major view of a period set for a single UNNEST insert.
struct PeriodColumns {
    period_numbers: Vec<i32>,
    start_dates: Vec<CalendarDate>,
    end_dates: Vec<CalendarDate>,
    durations: Vec<i32>,
    free_counts: Vec<i32>,
    total_members: Vec<i32>,
    percentages: Vec<f64>,
    ranks: Vec<String>,
}

impl PeriodColumns {
    fn from_periods(periods: &[RankedPeriod]) -> Self {
        let n = periods.len();
        let mut cols = Self {
            period_numbers: Vec::with_capacity(n),
            start_dates: Vec::with_capacity(n),
            end_dates: Vec::with_capacity(n),
            durations: Vec::with_capacity(n),
            free_counts: Vec::with_capacity(n),
            total_members: Vec::with_capacity(n),
            percentages: Vec::with_capacity(n),
            ranks: Vec::with_capacity(n),
        };
        // Counts are bounded by the trip length and member count, far below i32::MAX.
        for p in periods {
            cols.period_numbers.push(p.period_number as i32);
            cols.start_dates.push(p.start_date);
            cols.end_dates.push(p.end_date);
            cols.durations.push(p.duration_days as i32);
            cols.free_counts.push(p.min_free_count as i32);
            cols.total_members.push(p.total_members as i32);
            cols.percentages.push(p.availability_percentage);
            cols.ranks.push(p.rank.as_str().to_string());
        }
        cols
    }
}
