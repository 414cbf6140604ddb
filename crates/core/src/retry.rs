//! Bounded retry policies.
//!
//! Storage replaces retry on conflict; notification deliveries retry on any
//! transient failure. Neither retries forever.

use std::time::Duration;

/// Attempts for a Ledger or Period Store transaction that hits a conflict.
pub const DEFAULT_STORE_MAX_ATTEMPTS: u32 = 3;

/// Delay before the first storage retry.
pub const DEFAULT_STORE_BASE_DELAY: Duration = Duration::from_millis(50);

/// Attempts per notification (the first try plus one retry).
pub const DEFAULT_NOTIFY_MAX_ATTEMPTS: u32 = 2;

/// Delay before the first notification retry.
pub const DEFAULT_NOTIFY_BASE_DELAY: Duration = Duration::from_millis(100);

/// Timeout applied to every single notification attempt.
pub const DEFAULT_NOTIFY_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(5);

/// How many times to try an operation and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first. Always at least 1.
    pub max_attempts: u32,
    /// Delay after the first failed attempt; doubles on each further one.
    pub base_delay: Duration,
    /// Upper bound for a single attempt, if any.
    pub attempt_timeout: Option<Duration>,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
            attempt_timeout: None,
        }
    }

    pub fn with_attempt_timeout(mut self, timeout: Duration) -> Self {
        self.attempt_timeout = Some(timeout);
        self
    }

    /// Policy for Ledger and Period Store transactions.
    pub fn store_default() -> Self {
        Self::new(DEFAULT_STORE_MAX_ATTEMPTS, DEFAULT_STORE_BASE_DELAY)
    }

    /// Policy for a single member's notification.
    pub fn notify_default() -> Self {
        Self::new(DEFAULT_NOTIFY_MAX_ATTEMPTS, DEFAULT_NOTIFY_BASE_DELAY)
            .with_attempt_timeout(DEFAULT_NOTIFY_ATTEMPT_TIMEOUT)
    }

    /// Whether another attempt is allowed after `attempt` (1-based) failed.
    pub fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }

    /// Delay to wait after failed attempt number `attempt` (1-based).
    pub fn backoff(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        self.base_delay.saturating_mul(1u32 << exponent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_least_one_attempt() {
        let policy = RetryPolicy::new(0, Duration::ZERO);
        assert_eq!(policy.max_attempts, 1);
        assert!(!policy.should_retry(1));
    }

    #[test]
    fn retries_until_budget_is_spent() {
        let policy = RetryPolicy::store_default();
        assert!(policy.should_retry(1));
        assert!(policy.should_retry(2));
        assert!(!policy.should_retry(3));
    }

    #[test]
    fn backoff_doubles() {
        let policy = RetryPolicy::new(4, Duration::from_millis(100));
        assert_eq!(policy.backoff(1), Duration::from_millis(100));
        assert_eq!(policy.backoff(2), Duration::from_millis(200));
        assert_eq!(policy.backoff(3), Duration::from_millis(400));
    }

    #[test]
    fn notify_default_has_attempt_timeout() {
        let policy = RetryPolicy::notify_default();
        assert_eq!(policy.max_attempts, 2);
        assert_eq!(policy.attempt_timeout, Some(DEFAULT_NOTIFY_ATTEMPT_TIMEOUT));
    }
}
