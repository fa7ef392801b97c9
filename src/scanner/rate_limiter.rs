//! Request pacing for a mapping run.
//!
//! Provides a token bucket shared by every worker so the whole run stays
//! under a requests-per-second ceiling.

use governor::{Quota, RateLimiter as GovLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;

type DirectLimiter = GovLimiter<
    governor::state::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

/// A rate limiter for controlling request speed.
#[derive(Clone)]
pub struct RateLimiter {
    limiter: Arc<DirectLimiter>,
}

impl RateLimiter {
    /// Create a limiter allowing `rate` requests per second.
    ///
    /// Returns `None` for a rate of 0, meaning unlimited.
    pub fn new(rate: u32) -> Option<Self> {
        let rate = NonZeroU32::new(rate)?;
        let limiter = GovLimiter::direct(Quota::per_second(rate));

        Some(Self {
            limiter: Arc::new(limiter),
        })
    }

    /// Wait until the rate limit allows another request.
    pub async fn wait(&self) {
        self.limiter.until_ready().await;
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_zero_rate_is_unlimited() {
        assert!(RateLimiter::new(0).is_none());
    }

    #[tokio::test]
    async fn test_first_request_is_immediate() {
        let limiter = RateLimiter::new(100).unwrap();
        let waited = tokio::time::timeout(Duration::from_millis(50), limiter.wait()).await;
        assert!(waited.is_ok());
    }

    #[test]
    fn test_rate_limiter_wait() {
        let limiter = RateLimiter::new(1000).unwrap();
        tokio_test::block_on(limiter.wait());
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let limiter1 = RateLimiter::new(1).unwrap();
        let limiter2 = limiter1.clone();

        limiter1.wait().await;
        let waited = tokio::time::timeout(Duration::from_millis(100), limiter2.wait()).await;
        assert!(waited.is_err());
    }
}
