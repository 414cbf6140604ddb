//! Integration tests for the notification inbox and event log.

mod common;

use common::{create_trip, create_user, date};
use sqlx::PgPool;
use tripsync_db::models::notification::CreateNotification;
use tripsync_db::repositories::{EventRepo, NotificationRepo};

fn note(user_id: i64, trip_id: i64, title: &str) -> CreateNotification {
    CreateNotification {
        user_id,
        trip_id: Some(trip_id),
        notification_type: "trip_update".to_string(),
        title: title.to_string(),
        message: None,
        data: Some(serde_json::json!({ "trip_id": trip_id })),
        action_url: None,
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn inbox_lifecycle(pool: PgPool) {
    let user = create_user(&pool, "member@example.com").await;
    let trip = create_trip(&pool, user, date(2025, 12, 1), date(2025, 12, 3)).await;

    let first = NotificationRepo::create(&pool, &note(user, trip, "first")).await.unwrap();
    NotificationRepo::create(&pool, &note(user, trip, "second")).await.unwrap();

    assert_eq!(NotificationRepo::unread_count(&pool, user).await.unwrap(), 2);

    let listed = NotificationRepo::list_for_user(&pool, user, false, 10, 0).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].title, "second");

    assert!(NotificationRepo::mark_read(&pool, first, user).await.unwrap());
    assert!(!NotificationRepo::mark_read(&pool, first, user).await.unwrap());

    let unread = NotificationRepo::list_for_user(&pool, user, true, 10, 0).await.unwrap();
    assert_eq!(unread.len(), 1);
    assert_eq!(unread[0].title, "second");

    assert_eq!(NotificationRepo::mark_all_read(&pool, user).await.unwrap(), 1);
    assert_eq!(NotificationRepo::unread_count(&pool, user).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn mark_read_is_scoped_to_owner(pool: PgPool) {
    let owner = create_user(&pool, "owner@example.com").await;
    let other = create_user(&pool, "other@example.com").await;
    let trip = create_trip(&pool, owner, date(2025, 12, 1), date(2025, 12, 3)).await;
    let id = NotificationRepo::create(&pool, &note(owner, trip, "mine")).await.unwrap();

    assert!(!NotificationRepo::mark_read(&pool, id, other).await.unwrap());
    assert_eq!(NotificationRepo::unread_count(&pool, owner).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn events_are_listed_per_trip(pool: PgPool) {
    let user = create_user(&pool, "member@example.com").await;
    let trip = create_trip(&pool, user, date(2025, 12, 1), date(2025, 12, 3)).await;
    let payload = serde_json::json!({ "total_periods": 2 });

    EventRepo::insert(&pool, "periods.generated", Some(trip), Some(user), &payload)
        .await
        .unwrap();

    let events = EventRepo::list_for_trip(&pool, trip).await.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event_type, "periods.generated");
    assert_eq!(events[0].payload["total_periods"], 2);
}
