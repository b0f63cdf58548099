//! Retry decisions for one request.

use std::time::Duration;

use hyper_util::client::legacy::Error as TransportError;
use rand::Rng;

use crate::config::RetryConfig;

/// Decides whether a failed attempt is replayed and how long to wait.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    enabled: bool,
    max_attempts: u32,
    base_delay_ms: u64,
    max_delay_ms: u64,
}

impl RetryPolicy {
    pub fn new(config: &RetryConfig) -> Self {
        Self {
            enabled: config.enabled,
            max_attempts: config.max_attempts,
            base_delay_ms: config.base_delay_ms,
            max_delay_ms: config.max_delay_ms,
        }
    }

    /// `attempt` is zero-based. A connect-phase failure is the only
    /// retryable outcome: the request was never written, so replaying it
    /// is safe for any method, and the next pool connection lands on the
    /// next address in the rotation.
    pub fn should_retry(&self, attempt: u32, error: &TransportError) -> bool {
        self.enabled && attempt + 1 < self.max_attempts && error.is_connect()
    }

    /// Delay before retry number `attempt` (1-based): the base delay
    /// doubled per prior retry, capped at the configured maximum, with up
    /// to 10% jitter so concurrent retries don't fire in lockstep.
    pub fn delay(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }

        let doubled = self
            .base_delay_ms
            .saturating_mul(1u64 << u64::from(attempt - 1).min(32));
        let capped = doubled.min(self.max_delay_ms);
        let jitter = match capped / 10 {
            0 => 0,
            range => rand::thread_rng().gen_range(0..range),
        };

        Duration::from_millis(capped + jitter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(base_delay_ms: u64, max_delay_ms: u64) -> RetryPolicy {
        RetryPolicy::new(&RetryConfig {
            enabled: true,
            max_attempts: 3,
            base_delay_ms,
            max_delay_ms,
        })
    }

    #[test]
    fn test_delay_doubles_per_retry() {
        let policy = policy(100, 2_000);
        assert_eq!(policy.delay(0), Duration::ZERO);
        assert!(policy.delay(1) >= Duration::from_millis(100));
        assert!(policy.delay(2) >= Duration::from_millis(200));
        assert!(policy.delay(3) >= Duration::from_millis(400));
    }

    #[test]
    fn test_delay_is_capped_with_bounded_jitter() {
        let policy = policy(100, 1_000);
        for attempt in [4, 10, 64] {
            let delay = policy.delay(attempt);
            assert!(delay >= Duration::from_millis(1_000));
            assert!(delay <= Duration::from_millis(1_100));
        }
    }

    #[test]
    fn test_tiny_delays_skip_jitter() {
        let policy = policy(5, 5);
        assert_eq!(policy.delay(1), Duration::from_millis(5));
    }
}
