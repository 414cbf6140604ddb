//! Handlers for a member's own availability.
//!
//! All endpoints require authentication and trip participation.

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tripsync_core::availability::{
    format_date, normalize_submission, parse_submitted_dates, AvailabilitySummary,
};
use tripsync_core::error::CoreError;
use tripsync_core::notifications::EVENT_AVAILABILITY_SUBMITTED;
use tripsync_core::types::{CalendarDate, DbId};
use tripsync_db::models::trip::Trip;
use tripsync_db::repositories::{AvailabilityRepo, UserRepo};
use tripsync_db::with_conflict_retry;
use tripsync_events::{PlatformEvent, SubmissionNotice};

use crate::error::AppResult;
use crate::handlers::ensure_participant;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct TripDatesResponse {
    pub trip_id: DbId,
    pub name: String,
    pub start_date: String,
    pub end_date: String,
    pub total_dates: u32,
}

/// Body of `POST /trips/{trip_id}/availability`.
#[derive(Debug, Deserialize)]
pub struct SubmitAvailabilityRequest {
    /// `YYYY-MM-DD` strings. Blank entries are ignored.
    pub dates: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub trip_id: DbId,
    pub user_id: DbId,
    pub dates: Vec<String>,
    pub summary: AvailabilitySummary,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/trips/{trip_id}/dates
pub async fn get_trip_dates(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(trip_id): Path<DbId>,
) -> AppResult<Json<DataResponse<TripDatesResponse>>> {
    let trip = ensure_participant(&state.pool, trip_id, auth.user_id).await?;
    let window = trip.window()?;

    Ok(Json(DataResponse {
        data: TripDatesResponse {
            trip_id: trip.id,
            name: trip.name,
            start_date: format_date(window.start()),
            end_date: format_date(window.end()),
            total_dates: window.total_days(),
        },
    }))
}

/// POST /api/v1/trips/{trip_id}/availability
///
/// Replace the caller's whole availability set for the trip. Every date is
/// checked against the trip window before anything is written.
pub async fn submit_availability(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(trip_id): Path<DbId>,
    Json(input): Json<SubmitAvailabilityRequest>,
) -> AppResult<Json<DataResponse<AvailabilityResponse>>> {
    let trip = ensure_participant(&state.pool, trip_id, auth.user_id).await?;
    let window = trip.window()?;
    let dates = normalize_submission(&window, parse_submitted_dates(&input.dates)?)?;

    let policy = state.config.store_retry_policy();
    with_conflict_retry(&policy, "replace_availability", || {
        AvailabilityRepo::replace_for_member(&state.pool, trip_id, auth.user_id, &dates)
    })
    .await?
    .ok_or_else(|| CoreError::NotAuthorized("You are not a member of this trip".into()))?;

    tracing::info!(
        trip_id,
        user_id = auth.user_id,
        submitted_dates = dates.len(),
        "Availability replaced"
    );

    state.event_bus.publish(
        PlatformEvent::new(EVENT_AVAILABILITY_SUBMITTED)
            .with_trip(trip_id)
            .with_actor(auth.user_id)
            .with_payload(json!({ "submitted_days": dates.len() })),
    );

    if trip.creator_id != auth.user_id {
        notify_creator(&state, &trip, auth.user_id, dates.len()).await;
    }

    Ok(Json(DataResponse {
        data: AvailabilityResponse {
            trip_id,
            user_id: auth.user_id,
            summary: AvailabilitySummary::new(&window, dates.len()),
            dates: format_dates(&dates),
        },
    }))
}

/// GET /api/v1/trips/{trip_id}/availability/me
pub async fn get_my_availability(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(trip_id): Path<DbId>,
) -> AppResult<Json<DataResponse<AvailabilityResponse>>> {
    let trip = ensure_participant(&state.pool, trip_id, auth.user_id).await?;
    let window = trip.window()?;
    let dates = AvailabilityRepo::list_dates_for_member(&state.pool, trip_id, auth.user_id).await?;

    Ok(Json(DataResponse {
        data: AvailabilityResponse {
            trip_id,
            user_id: auth.user_id,
            summary: AvailabilitySummary::new(&window, dates.len()),
            dates: format_dates(&dates),
        },
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn format_dates(dates: &[CalendarDate]) -> Vec<String> {
    dates.iter().copied().map(format_date).collect()
}

/// The submission is already committed here, so a failed name lookup only
/// degrades the message.
async fn notify_creator(state: &AppState, trip: &Trip, submitter_id: DbId, submitted_days: usize) {
    let submitter_name = match UserRepo::display_name(&state.pool, submitter_id).await {
        Ok(Some(name)) => name,
        Ok(None) => "A member".to_string(),
        Err(e) => {
            tracing::warn!(error = %e, user_id = submitter_id, "Failed to load display name");
            "A member".to_string()
        }
    };

    state
        .notifier
        .notify_availability_submitted(&SubmissionNotice {
            trip_id: trip.id,
            trip_name: trip.name.clone(),
            creator_id: trip.creator_id,
            submitter_id,
            submitter_name,
            submitted_days,
        });
}
