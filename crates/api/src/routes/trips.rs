//! Route definitions for trip availability and periods.
//!
//! All endpoints require authentication and trip participation.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{availability, periods};
use crate::state::AppState;

/// Routes mounted at `/trips`.
///
/// ```text
/// GET    /{trip_id}/dates                          -> get_trip_dates
/// POST   /{trip_id}/availability                   -> submit_availability
/// GET    /{trip_id}/availability/me                -> get_my_availability
/// POST   /{trip_id}/availability/generate-periods  -> generate_periods
/// GET    /{trip_id}/available-periods              -> list_periods
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{trip_id}/dates", get(availability::get_trip_dates))
        .route(
            "/{trip_id}/availability",
            post(availability::submit_availability),
        )
        .route(
            "/{trip_id}/availability/me",
            get(availability::get_my_availability),
        )
        .route(
            "/{trip_id}/availability/generate-periods",
            post(periods::generate_periods),
        )
        .route("/{trip_id}/available-periods", get(periods::list_periods))
}
