//! Read access to `users`.

use sqlx::PgPool;
use tripsync_core::types::DbId;

pub struct UserRepo;

impl UserRepo {
    /// The name shown to other members: display name, else email.
    pub async fn display_name(pool: &PgPool, user_id: DbId) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar("SELECT COALESCE(display_name, email) FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }
}
