//! Handlers for the `/notifications` inbox.
//!
//! All endpoints require authentication via [`AuthUser`].

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use tripsync_core::error::CoreError;
use tripsync_core::types::DbId;
use tripsync_db::models::notification::Notification;
use tripsync_db::repositories::NotificationRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /notifications`.
#[derive(Debug, Deserialize)]
pub struct NotificationQuery {
    /// If `true`, return only unread notifications.
    pub unread_only: Option<bool>,
    /// Defaults to 50, capped at 100.
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

const MAX_LIMIT: i64 = 100;
const DEFAULT_LIMIT: i64 = 50;

#[derive(Debug, Serialize)]
pub struct UnreadCount {
    pub count: i64,
}

#[derive(Debug, Serialize)]
pub struct MarkedRead {
    pub marked_read: u64,
}

/// GET /api/v1/notifications
pub async fn list_notifications(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<NotificationQuery>,
) -> AppResult<Json<DataResponse<Vec<Notification>>>> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let offset = params.offset.unwrap_or(0).max(0);
    let unread_only = params.unread_only.unwrap_or(false);

    let notifications =
        NotificationRepo::list_for_user(&state.pool, auth.user_id, unread_only, limit, offset)
            .await?;

    Ok(Json(DataResponse {
        data: notifications,
    }))
}

/// POST /api/v1/notifications/{id}/read
///
/// 204 on success; 404 if the notification is not the caller's or is
/// already read.
pub async fn mark_read(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(notification_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let found = NotificationRepo::mark_read(&state.pool, notification_id, auth.user_id).await?;

    if !found {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Notification",
            id: notification_id,
        }));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/notifications/read-all
pub async fn mark_all_read(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<MarkedRead>>> {
    let marked_read = NotificationRepo::mark_all_read(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse {
        data: MarkedRead { marked_read },
    }))
}

/// GET /api/v1/notifications/unread-count
pub async fn unread_count(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<UnreadCount>>> {
    let count = NotificationRepo::unread_count(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse {
        data: UnreadCount { count },
    }))
}
