//! Integration tests for the period store.

mod common;

use common::{create_trip, create_user, date};
use sqlx::PgPool;
use tripsync_core::ranking::{PeriodRank, RankedPeriod};
use tripsync_core::retry::RetryPolicy;
use tripsync_db::repositories::PeriodRepo;
use tripsync_db::with_conflict_retry;

fn period(number: u32, start: u32, end: u32, min_free: u32) -> RankedPeriod {
    RankedPeriod {
        period_number: number,
        start_date: date(2025, 12, start),
        end_date: date(2025, 12, end),
        duration_days: end - start + 1,
        min_free_count: min_free,
        total_members: 2,
        availability_percentage: f64::from(min_free) * 50.0,
        rank: PeriodRank::from_bottleneck(min_free, 2),
    }
}

async fn setup(pool: &PgPool) -> i64 {
    let owner = create_user(pool, "owner@example.com").await;
    create_trip(pool, owner, date(2025, 12, 1), date(2025, 12, 10)).await
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn replace_stores_full_set_in_order(pool: PgPool) {
    let trip_id = setup(&pool).await;
    let periods = vec![period(1, 2, 3, 2), period(2, 6, 9, 1)];

    let stored = PeriodRepo::replace_for_trip(&pool, trip_id, &periods)
        .await
        .unwrap();

    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0].period_number, 1);
    assert_eq!(stored[0].free_count, 2);
    assert_eq!(stored[0].flexible_count, 0);
    assert_eq!(stored[0].rank, "full");
    assert_eq!(stored[1].duration_days, 4);
    assert_eq!(stored[1].availability_percentage, 50.0);
    assert_eq!(stored[1].rank, "majority");
    assert_eq!(stored[0].created_at, stored[1].created_at);

    let listed = PeriodRepo::list_for_trip(&pool, trip_id).await.unwrap();
    let numbers: Vec<_> = listed.iter().map(|p| p.period_number).collect();
    assert_eq!(numbers, vec![1, 2]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn replace_discards_previous_set(pool: PgPool) {
    let trip_id = setup(&pool).await;
    PeriodRepo::replace_for_trip(&pool, trip_id, &[period(1, 1, 1, 1), period(2, 3, 4, 1)])
        .await
        .unwrap();
    PeriodRepo::replace_for_trip(&pool, trip_id, &[period(1, 7, 8, 2)])
        .await
        .unwrap();

    let listed = PeriodRepo::list_for_trip(&pool, trip_id).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].start_date, date(2025, 12, 7));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn empty_replace_clears_the_set(pool: PgPool) {
    let trip_id = setup(&pool).await;
    PeriodRepo::replace_for_trip(&pool, trip_id, &[period(1, 1, 2, 1)])
        .await
        .unwrap();

    let stored = PeriodRepo::replace_for_trip(&pool, trip_id, &[]).await.unwrap();

    assert!(stored.is_empty());
    assert!(PeriodRepo::list_for_trip(&pool, trip_id).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn replace_for_missing_trip_fails(pool: PgPool) {
    let err = PeriodRepo::replace_for_trip(&pool, 424_242, &[period(1, 1, 2, 1)])
        .await
        .unwrap_err();
    assert!(matches!(err, sqlx::Error::RowNotFound));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn failed_replace_keeps_previous_set(pool: PgPool) {
    let trip_id = setup(&pool).await;
    PeriodRepo::replace_for_trip(&pool, trip_id, &[period(1, 1, 2, 2), period(2, 5, 6, 1)])
        .await
        .unwrap();

    // Period number 0 violates ck_available_periods_number after the delete ran.
    let broken = [period(1, 3, 4, 2), period(0, 8, 9, 1)];
    let err = PeriodRepo::replace_for_trip(&pool, trip_id, &broken)
        .await
        .unwrap_err();
    assert!(matches!(err, sqlx::Error::Database(_)));

    let listed = PeriodRepo::list_for_trip(&pool, trip_id).await.unwrap();
    let kept: Vec<_> = listed
        .iter()
        .map(|p| (p.period_number, p.start_date))
        .collect();
    assert_eq!(kept, vec![(1, date(2025, 12, 1)), (2, date(2025, 12, 5))]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn concurrent_replaces_never_interleave(pool: PgPool) {
    let trip_id = setup(&pool).await;
    let policy = RetryPolicy::store_default();
    let set_a = vec![period(1, 1, 2, 2), period(2, 4, 5, 1)];
    let set_b = vec![period(1, 8, 10, 1)];

    let run = |periods: Vec<RankedPeriod>| {
        let pool = pool.clone();
        async move {
            with_conflict_retry(&policy, "replace_periods", || {
                PeriodRepo::replace_for_trip(&pool, trip_id, &periods)
            })
            .await
        }
    };

    let (ra, rb) = futures::join!(run(set_a.clone()), run(set_b.clone()));
    ra.unwrap();
    rb.unwrap();

    let listed = PeriodRepo::list_for_trip(&pool, trip_id).await.unwrap();
    let starts: Vec<_> = listed.iter().map(|p| p.start_date).collect();
    let starts_a: Vec<_> = set_a.iter().map(|p| p.start_date).collect();
    let starts_b: Vec<_> = set_b.iter().map(|p| p.start_date).collect();
    assert!(starts == starts_a || starts == starts_b, "interleaved set: {starts:?}");
}
