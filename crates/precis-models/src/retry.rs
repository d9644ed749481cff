//! Retry with capped exponential backoff.
//!
//! Only errors for which [`ModelError::is_retryable`] holds are retried.
//! The delay before retry `n` (zero-based) is
//! `min(max_delay_ms, base_delay_ms * 2^n)`.

use std::future::Future;
use std::time::Duration;

use precis_core::ModelError;
use precis_settings::RetrySettings;
use tracing::warn;

// ─────────────────────────────────────────────────────────────────────────────
// Policy
// ─────────────────────────────────────────────────────────────────────────────

/// Retry parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Base delay in milliseconds.
    pub base_delay_ms: u64,
    /// Delay cap in milliseconds.
    pub max_delay_ms: u64,
}

impl RetryPolicy {
    /// A policy that never retries.
    pub const NONE: Self = Self {
        max_retries: 0,
        base_delay_ms: 0,
        max_delay_ms: 0,
    };

    /// Delay before the zero-based retry `attempt`.
    pub fn delay_ms(&self, attempt: u32) -> u64 {
        backoff_delay(attempt, self.base_delay_ms, self.max_delay_ms)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&RetrySettings::default())
    }
}

impl From<&RetrySettings> for RetryPolicy {
    fn from(settings: &RetrySettings) -> Self {
        Self {
            max_retries: settings.max_retries,
            base_delay_ms: settings.base_delay_ms,
            max_delay_ms: settings.max_delay_ms,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Backoff
// ─────────────────────────────────────────────────────────────────────────────

/// `min(max_delay_ms, base_delay_ms * 2^attempt)`, saturating.
#[must_use]
pub fn backoff_delay(attempt: u32, base_delay_ms: u64, max_delay_ms: u64) -> u64 {
    base_delay_ms
        .saturating_mul(1u64 << attempt.min(31))
        .min(max_delay_ms)
}

/// Run `call` until it succeeds, fails permanently, or retries run out.
///
/// `operation` names the call in log events.
pub async fn with_retry<T, F, Fut>(
    policy: &RetryPolicy,
    operation: &str,
    mut call: F,
) -> Result<T, ModelError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ModelError>>,
{
    let mut attempt = 0u32;
    loop {
        match call().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_retryable() && attempt < policy.max_retries => {
                let delay_ms = policy.delay_ms(attempt);
                attempt += 1;
                warn!(
                    operation,
                    attempt,
                    max_retries = policy.max_retries,
                    delay_ms,
                    category = err.category(),
                    error = %err,
                    "retrying model call"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
            Err(err) => return Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    fn policy(max_retries: u32) -> RetryPolicy {
        RetryPolicy {
            max_retries,
            base_delay_ms: 100,
            max_delay_ms: 1_000,
        }
    }

    // ── backoff ─────────────────────────────────────────────────────

    #[test]
    fn backoff_doubles_then_caps() {
        let delays: Vec<u64> = (0..6).map(|n| backoff_delay(n, 100, 1_000)).collect();
        assert_eq!(delays, [100, 200, 400, 800, 1_000, 1_000]);
    }

    #[test]
    fn backoff_saturates_on_huge_attempts() {
        assert_eq!(backoff_delay(u32::MAX, u64::MAX / 2, u64::MAX), u64::MAX);
    }

    #[test]
    fn policy_from_settings() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_retries, 2);
        assert_eq!(policy.delay_ms(0), 500);
        assert_eq!(policy.delay_ms(10), 10_000);
    }

    // ── with_retry ──────────────────────────────────────────────────

    #[tokio::test(start_paused = true)]
    async fn retries_transient_errors_until_success() {
        let calls = AtomicU32::new(0);
        let result = with_retry(&policy(3), "test", || async {
            if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                Err(ModelError::Transport("reset".into()))
            } else {
                Ok("done")
            }
        })
        .await;
        assert_eq!(result, Ok("done"));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn gives_up_after_max_retries() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = with_retry(&policy(2), "test", || async {
            let _ = calls.fetch_add(1, Ordering::SeqCst);
            Err(ModelError::Timeout { timeout_ms: 10 })
        })
        .await;
        assert_eq!(result, Err(ModelError::Timeout { timeout_ms: 10 }));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn permanent_errors_are_not_retried() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = with_retry(&policy(5), "test", || async {
            let _ = calls.fetch_add(1, Ordering::SeqCst);
            Err(ModelError::Http {
                status: 400,
                message: "bad request".into(),
            })
        })
        .await;
        assert!(matches!(result, Err(ModelError::Http { status: 400, .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn waits_between_attempts() {
        let start = tokio::time::Instant::now();
        let calls = AtomicU32::new(0);
        let _ = with_retry(&policy(2), "test", || async {
            let _ = calls.fetch_add(1, Ordering::SeqCst);
            Err::<(), _>(ModelError::Transport("down".into()))
        })
        .await;
        assert_eq!(start.elapsed(), Duration::from_millis(300));
    }
}
