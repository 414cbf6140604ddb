//! Shared helpers for the API integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use chrono::NaiveDate;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use tripsync_api::auth::jwt::{generate_access_token, JwtConfig};
use tripsync_api::config::{ServerConfig, DEFAULT_FRONTEND_URL};
use tripsync_api::router::build_app_router;
use tripsync_api::state::AppState;
use tripsync_db::models::status::MemberStatus;
use tripsync_events::{DbNotificationSink, EventBus, ResultNotifier};

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 5,
        db_max_connections: 5,
        frontend_url: DEFAULT_FRONTEND_URL.to_string(),
        notify_attempt_timeout_ms: 5_000,
        notify_max_attempts: 2,
        store_max_attempts: 3,
        jwt: JwtConfig {
            secret: "test-secret".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the full application router over `pool`, with the same middleware
/// stack production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_notifier(pool).0
}

/// Like [`build_test_app`], but also hands back the notifier so a test can
/// wait for background deliveries.
pub fn build_test_app_with_notifier(pool: PgPool) -> (Router, Arc<ResultNotifier>) {
    let config = test_config();
    let notifier = Arc::new(ResultNotifier::new(
        Arc::new(DbNotificationSink::new(pool.clone())),
        config.notify_retry_policy(),
        config.frontend_url.clone(),
    ));

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        event_bus: Arc::new(EventBus::default()),
        notifier: Arc::clone(&notifier),
    };

    (build_app_router(state, &config), notifier)
}

/// A valid bearer token for `user_id`.
pub fn token_for(user_id: i64) -> String {
    generate_access_token(user_id, &test_config().jwt).unwrap()
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get_auth(app: Router, uri: &str, user_id: i64) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header("authorization", format!("Bearer {}", token_for(user_id)))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    user_id: i64,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("authorization", format!("Bearer {}", token_for(user_id)))
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_auth(app: Router, uri: &str, user_id: i64) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("authorization", format!("Bearer {}", token_for(user_id)))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub async fn create_user(pool: &PgPool, email: &str, display_name: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO users (email, display_name) VALUES ($1, $2) RETURNING id")
        .bind(email)
        .bind(display_name)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn create_trip(
    pool: &PgPool,
    name: &str,
    creator_id: i64,
    start: NaiveDate,
    end: NaiveDate,
) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO trips (name, creator_id, start_date, end_date) \
         VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(name)
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

/// A December trip running from the 1st to the 5th with two accepted
/// members; `alice` created it.
pub struct TwoMemberTrip {
    pub trip_id: i64,
    pub alice: i64,
    pub bob: i64,
}

pub async fn two_member_trip(pool: &PgPool) -> TwoMemberTrip {
    let alice = create_user(pool, "alice@example.com", "Alice").await;
    let bob = create_user(pool, "bob@example.com", "Bob").await;
    let trip_id = create_trip(pool, "Ski week", alice, date(2025, 12, 1), date(2025, 12, 5)).await;
    add_member(pool, trip_id, alice, MemberStatus::Accepted).await;
    add_member(pool, trip_id, bob, MemberStatus::Accepted).await;
    TwoMemberTrip {
        trip_id,
        alice,
        bob,
    }
}
