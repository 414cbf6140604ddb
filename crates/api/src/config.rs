use std::time::Duration;

use tripsync_core::retry::{
    RetryPolicy, DEFAULT_NOTIFY_BASE_DELAY, DEFAULT_NOTIFY_MAX_ATTEMPTS,
    DEFAULT_STORE_BASE_DELAY, DEFAULT_STORE_MAX_ATTEMPTS,
};

use crate::auth::jwt::JwtConfig;

/// Default base URL of the web client, used in notification links.
pub const DEFAULT_FRONTEND_URL: &str = "http://localhost:8081";

/// Server configuration loaded from environment variables.
///
/// All fields except the secrets have defaults suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long shutdown waits for background work, in seconds (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Connection pool size (default: `20`).
    pub db_max_connections: u32,
    /// Base URL for links in notifications.
    pub frontend_url: String,
    /// Per-attempt notification timeout in milliseconds (default: `5000`).
    pub notify_attempt_timeout_ms: u64,
    /// Notification attempts per recipient (default: `2`).
    pub notify_max_attempts: u32,
    /// Attempts for ledger and period-store transactions that hit a
    /// conflict (default: `3`).
    pub store_max_attempts: u32,
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                     | Default                    |
    /// |-----------------------------|----------------------------|
    /// | `HOST`                      | `0.0.0.0`                  |
    /// | `PORT`                      | `3000`                     |
    /// | `CORS_ORIGINS`              | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`      | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS`     | `30`                       |
    /// | `DB_MAX_CONNECTIONS`        | `20`                       |
    /// | `FRONTEND_URL`              | `http://localhost:8081`    |
    /// | `NOTIFY_ATTEMPT_TIMEOUT_MS` | `5000`                     |
    /// | `NOTIFY_MAX_ATTEMPTS`       | `2`                        |
    /// | `STORE_MAX_ATTEMPTS`        | `3`                        |
    ///
    /// `DATABASE_URL` is read separately by the binary. `JWT_SECRET` is
    /// read by [`JwtConfig::from_env`].
    ///
    /// # Panics
    ///
    /// Panics if a variable is set but cannot be parsed.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let frontend_url =
            std::env::var("FRONTEND_URL").unwrap_or_else(|_| DEFAULT_FRONTEND_URL.into());

        Self {
            host,
            port: env_or("PORT", 3000),
            cors_origins,
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", 30),
            shutdown_timeout_secs: env_or("SHUTDOWN_TIMEOUT_SECS", 30),
            db_max_connections: env_or("DB_MAX_CONNECTIONS", 20),
            frontend_url,
            notify_attempt_timeout_ms: env_or("NOTIFY_ATTEMPT_TIMEOUT_MS", 5_000),
            notify_max_attempts: env_or("NOTIFY_MAX_ATTEMPTS", DEFAULT_NOTIFY_MAX_ATTEMPTS),
            store_max_attempts: env_or("STORE_MAX_ATTEMPTS", DEFAULT_STORE_MAX_ATTEMPTS),
            jwt: JwtConfig::from_env(),
        }
    }

    /// Retry policy for ledger and period-store transactions.
    pub fn store_retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.store_max_attempts, DEFAULT_STORE_BASE_DELAY)
    }

    /// Retry policy for a single recipient's notification.
    pub fn notify_retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.notify_max_attempts, DEFAULT_NOTIFY_BASE_DELAY)
            .with_attempt_timeout(Duration::from_millis(self.notify_attempt_timeout_ms))
    }
}

fn env_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse()
            .unwrap_or_else(|e| panic!("{key} must be a valid value: {e}")),
        Err(_) => default,
    }
}
