//! Conflict classification and bounded retry for transactional writes.

use std::future::Future;

use tripsync_core::error::CoreError;
use tripsync_core::retry::RetryPolicy;

/// SQLSTATE codes that mean "another transaction got there first; the same
/// statement may succeed if run again".
const CONFLICT_CODES: &[&str] = &[
    "40001", // serialization_failure
    "40P01", // deadlock_detected
    "55P03", // lock_not_available
    "23505", // unique_violation (racing replace of the same rows)
];

/// A storage failure, split by whether a retry can help.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage conflict: {0}")]
    Conflict(sqlx::Error),

    #[error(transparent)]
    Database(sqlx::Error),
}

impl StoreError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::Conflict(_))
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if is_conflict(&err) {
            StoreError::Conflict(err)
        } else {
            StoreError::Database(err)
        }
    }
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(e) => CoreError::StorageConflict(e.to_string()),
            StoreError::Database(e) => CoreError::Internal(e.to_string()),
        }
    }
}

/// Whether `err` is a transient conflict rather than a real failure.
pub fn is_conflict(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err
            .code()
            .is_some_and(|code| CONFLICT_CODES.contains(&code.as_ref())),
        _ => false,
    }
}

/// Run `op` until it succeeds, fails with a non-conflict error, or the
/// policy's attempt budget is spent.
///
/// `op` must be a whole transaction: each call starts from scratch, so a
/// failed attempt leaves nothing behind.
pub async fn with_conflict_retry<T, F, Fut>(
    policy: &RetryPolicy,
    operation: &'static str,
    mut op: F,
) -> Result<T, StoreError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, sqlx::Error>>,
{
    let mut attempt = 1;
    loop {
        match op().await.map_err(StoreError::from) {
            Ok(value) => return Ok(value),
            Err(err) if err.is_conflict() && policy.should_retry(attempt) => {
                let delay = policy.backoff(attempt);
                tracing::warn!(
                    operation,
                    attempt,
                    max_attempts = policy.max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "Storage conflict, retrying",
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(err) => {
                if err.is_conflict() {
                    tracing::error!(
                        operation,
                        attempts = attempt,
                        error = %err,
                        "Storage conflict persisted after all attempts",
                    );
                }
                return Err(err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    use assert_matches::assert_matches;

    use super::*;

    fn policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy::new(max_attempts, Duration::from_millis(1))
    }

    #[tokio::test]
    async fn returns_first_success() {
        let calls = AtomicU32::new(0);
        let out = with_conflict_retry(&policy(3), "test", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok::<_, sqlx::Error>(7) }
        })
        .await;
        assert_matches!(out, Ok(7));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn non_conflict_errors_are_not_retried() {
        let calls = AtomicU32::new(0);
        let out: Result<(), _> = with_conflict_retry(&policy(3), "test", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(sqlx::Error::RowNotFound) }
        })
        .await;
        assert_matches!(out, Err(StoreError::Database(sqlx::Error::RowNotFound)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn database_error_maps_to_internal() {
        let core: CoreError = StoreError::Database(sqlx::Error::PoolTimedOut).into();
        assert_matches!(core, CoreError::Internal(_));
        assert!(!core.is_retryable());
    }

    #[test]
    fn only_database_errors_can_conflict() {
        assert!(!is_conflict(&sqlx::Error::RowNotFound));
        assert!(!is_conflict(&sqlx::Error::PoolTimedOut));
    }
}
