//! Retry delay computation with exponential back-off and jitter.
//!
//! The delay schedule is pure ([`backoff_floor`], [`retry_delay`]) and the
//! act of waiting is injected through [`DelayFn`], so retry control flow can
//! be tested without wall-clock sleeps.

use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;

/// Retry delays are capped so a long outage cannot push a single logical
/// fetch into multi-minute stalls.
const MAX_DELAY_MS: u64 = 60_000;

/// The guaranteed minimum delay before retry `attempt` (0-based):
/// `base_ms * 2^attempt`, capped at [`MAX_DELAY_MS`].
#[must_use]
pub fn backoff_floor(attempt: u32, base_ms: u64) -> u64 {
    base_ms
        .saturating_mul(1u64 << attempt.min(16))
        .min(MAX_DELAY_MS)
}

/// Full retry delay: the floor plus additive random jitter of up to one
/// `base_ms`. Jitter desynchronizes concurrent fetches retrying against the
/// same target.
#[must_use]
pub fn retry_delay(attempt: u32, base_ms: u64) -> Duration {
    let floor = backoff_floor(attempt, base_ms);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let jitter = (base_ms as f64 * rand::random::<f64>()) as u64;
    Duration::from_millis(floor.saturating_add(jitter).min(MAX_DELAY_MS + base_ms))
}

/// Randomized pre-request pacing delay in `[0, max_ms]`, mimicking human
/// request spacing.
#[must_use]
pub fn pacing_jitter(max_ms: u64) -> Duration {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let ms = (max_ms as f64 * rand::random::<f64>()) as u64;
    Duration::from_millis(ms)
}

/// Injectable wait operation used by the fetch retry loop.
pub type DelayFn = Arc<dyn Fn(Duration) -> BoxFuture<'static, ()> + Send + Sync>;

/// The production delay: `tokio::time::sleep`.
#[must_use]
pub fn tokio_delay() -> DelayFn {
    Arc::new(|d| Box::pin(tokio::time::sleep(d)))
}

/// A no-op delay for tests: resolves immediately regardless of duration.
#[must_use]
pub fn no_delay() -> DelayFn {
    Arc::new(|_| Box::pin(async {}))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_grows_exponentially() {
        assert_eq!(backoff_floor(0, 1_000), 1_000);
        assert_eq!(backoff_floor(1, 1_000), 2_000);
        assert_eq!(backoff_floor(2, 1_000), 4_000);
        assert_eq!(backoff_floor(3, 1_000), 8_000);
    }

    #[test]
    fn floor_is_non_decreasing() {
        let mut last = 0;
        for attempt in 0..40 {
            let floor = backoff_floor(attempt, 1_000);
            assert!(floor >= last, "floor decreased at attempt {attempt}");
            last = floor;
        }
    }

    #[test]
    fn floor_is_capped() {
        assert_eq!(backoff_floor(63, 1_000), MAX_DELAY_MS);
    }

    #[test]
    fn retry_delay_at_least_floor() {
        for attempt in 0..6 {
            let delay = retry_delay(attempt, 1_000);
            assert!(
                delay.as_millis() >= u128::from(backoff_floor(attempt, 1_000)),
                "delay below floor at attempt {attempt}"
            );
        }
    }

    #[test]
    fn pacing_jitter_within_bound() {
        for _ in 0..50 {
            assert!(pacing_jitter(200).as_millis() <= 200);
        }
    }

    #[test]
    fn pacing_jitter_zero_bound_is_zero() {
        assert_eq!(pacing_jitter(0), Duration::ZERO);
    }

    #[tokio::test]
    async fn no_delay_resolves_immediately() {
        let delay = no_delay();
        let started = std::time::Instant::now();
        delay(Duration::from_secs(3600)).await;
        assert!(started.elapsed() < Duration::from_millis(100));
    }
}
