//! Fixture helpers shared by the repository tests.

#![allow(dead_code)]

use chrono::NaiveDate;
use sqlx::PgPool;
use tripsync_db::models::status::MemberStatus;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub async fn create_user(pool: &PgPool, email: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO users (email) VALUES ($1) RETURNING id")
        .bind(email)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn create_trip(pool: &PgPool, creator_id: i64, start: NaiveDate, end: NaiveDate) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO trips (name, creator_id, start_date, end_date) \
         VALUES ('Ski week', $1, $2, $3) RETURNING id",
    )
    .bind(creator_id)
    .bind(start)
    .bind(end)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn add_member(pool: &PgPool, trip_id: i64, user_id: i64, status: MemberStatus) {
    sqlx::query("INSERT INTO trip_members (trip_id, user_id, status_id) VALUES ($1, $2, $3)")
        .bind(trip_id)
        .bind(user_id)
        .bind(status.id())
        .execute(pool)
        .await
        .unwrap();
}

pub async fn set_member_status(pool: &PgPool, trip_id: i64, user_id: i64, status: MemberStatus) {
    sqlx::query("UPDATE trip_members SET status_id = $3 WHERE trip_id = $1 AND user_id = $2")
        .bind(trip_id)
        .bind(user_id)
        .bind(status.id())
        .execute(pool)
        .await
        .unwrap();
}
