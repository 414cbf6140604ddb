//! Handlers for generating and reading a trip's suggested periods.

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tripsync_core::error::CoreError;
use tripsync_core::generation::{plan_generation, GenerationStats};
use tripsync_core::notifications::EVENT_PERIODS_GENERATED;
use tripsync_core::periods::ExtractParams;
use tripsync_core::types::DbId;
use tripsync_db::models::period::AvailablePeriod;
use tripsync_db::repositories::{AvailabilityRepo, PeriodRepo};
use tripsync_db::with_conflict_retry;
use tripsync_events::PlatformEvent;

use crate::error::AppResult;
use crate::handlers::ensure_participant;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Body of `POST /trips/{trip_id}/availability/generate-periods`.
///
/// Missing or non-positive values fall back to `1`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GeneratePeriodsRequest {
    pub min_days: Option<i64>,
    pub min_availability_member: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct GeneratePeriodsResponse {
    pub periods: Vec<AvailablePeriod>,
    pub stats: GenerationStats,
}

/// POST /api/v1/trips/{trip_id}/availability/generate-periods
///
/// Recompute the trip's periods from one consistent snapshot, replace the
/// stored set, and notify accepted members in the background.
pub async fn generate_periods(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(trip_id): Path<DbId>,
    Json(input): Json<GeneratePeriodsRequest>,
) -> AppResult<Json<DataResponse<GeneratePeriodsResponse>>> {
    ensure_participant(&state.pool, trip_id, auth.user_id).await?;
    let params = ExtractParams::from_request(input.min_days, input.min_availability_member);

    let snapshot = AvailabilityRepo::load_generation_snapshot(&state.pool, trip_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Trip",
            id: trip_id,
        })?;
    let window = snapshot.trip.window()?;
    let plan = plan_generation(&window, &snapshot.availability, params)?;

    let policy = state.config.store_retry_policy();
    let stored = with_conflict_retry(&policy, "replace_periods", || {
        PeriodRepo::replace_for_trip(&state.pool, trip_id, &plan.periods)
    })
    .await?;

    let stats = plan.stats;
    tracing::info!(
        trip_id,
        user_id = auth.user_id,
        total_periods = stats.total_periods,
        total_members = stats.total_members,
        min_days = stats.min_days,
        min_availability_member = stats.min_availability_member,
        "Periods generated"
    );

    state.event_bus.publish(
        PlatformEvent::new(EVENT_PERIODS_GENERATED)
            .with_trip(trip_id)
            .with_actor(auth.user_id)
            .with_payload(json!({
                "total_periods": stats.total_periods,
                "total_members": stats.total_members,
                "min_days": stats.min_days,
                "min_availability_member": stats.min_availability_member,
                "status": stats.status,
            })),
    );

    let recipients: Vec<DbId> = snapshot
        .availability
        .accepted_members
        .iter()
        .copied()
        .collect();
    state
        .notifier
        .notify_generated(trip_id, &snapshot.trip.name, &recipients, &stats);

    Ok(Json(DataResponse {
        data: GeneratePeriodsResponse {
            periods: stored,
            stats,
        },
    }))
}

/// GET /api/v1/trips/{trip_id}/available-periods
///
/// The stored set, ordered by period number. Never recomputes.
pub async fn list_periods(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(trip_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<AvailablePeriod>>>> {
    ensure_participant(&state.pool, trip_id, auth.user_id).await?;
    let periods = PeriodRepo::list_for_trip(&state.pool, trip_id).await?;
    Ok(Json(DataResponse { data: periods }))
}
