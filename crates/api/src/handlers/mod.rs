pub mod availability;
pub mod notification;
pub mod periods;

use tripsync_core::error::CoreError;
use tripsync_core::types::DbId;
use tripsync_db::models::trip::Trip;
use tripsync_db::repositories::TripRepo;
use tripsync_db::DbPool;

use crate::error::AppResult;

/// Load the trip and check that `user_id` is its creator or has a
/// membership row. 404 if the trip is missing, 403 if the user is not part
/// of it.
pub(crate) async fn ensure_participant(
    pool: &DbPool,
    trip_id: DbId,
    user_id: DbId,
) -> AppResult<Trip> {
    let trip = TripRepo::find_by_id(pool, trip_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Trip",
            id: trip_id,
        })?;

    if !TripRepo::is_participant(pool, trip_id, user_id).await? {
        return Err(CoreError::NotAuthorized("You are not a member of this trip".into()).into());
    }

    Ok(trip)
}
