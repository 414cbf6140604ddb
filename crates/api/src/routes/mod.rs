pub mod health;
pub mod notification;
pub mod trips;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /trips/{trip_id}/dates                             trip window (GET)
/// /trips/{trip_id}/availability                      replace own availability (POST)
/// /trips/{trip_id}/availability/me                   own availability (GET)
/// /trips/{trip_id}/availability/generate-periods     recompute periods (POST)
/// /trips/{trip_id}/available-periods                 stored periods (GET)
///
/// /notifications                                     list (GET)
/// /notifications/unread-count                        unread count (GET)
/// /notifications/read-all                            mark all read (POST)
/// /notifications/{id}/read                           mark one read (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/trips", trips::router())
        .nest("/notifications", notification::router())
}
