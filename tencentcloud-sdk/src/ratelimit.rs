//! Action-keyed request rate limiter
//!
//! Every outbound call passes through [`RateLimiter::check`] with its action name.
//! Calls to the same action are spaced evenly at the configured rate; different
//! actions never wait on each other.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

/// Default requests per second per action.
pub const DEFAULT_RATE_LIMIT: u32 = 20;

/// Shared limiter, one schedule per action.
#[derive(Debug)]
pub struct RateLimiter {
    default_per_second: u32,
    overrides: HashMap<String, u32>,
    next_slot: Mutex<HashMap<String, Instant>>,
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_RATE_LIMIT)
    }
}

impl RateLimiter {
    /// `default_per_second = 0` disables limiting for actions without an override.
    pub fn new(default_per_second: u32) -> Self {
        Self {
            default_per_second,
            overrides: HashMap::new(),
            next_slot: Mutex::new(HashMap::new()),
        }
    }

    /// Override the rate for a single action.
    #[must_use]
    pub fn with_limit(mut self, action: impl Into<String>, per_second: u32) -> Self {
        self.overrides.insert(action.into(), per_second);
        self
    }

    /// Effective requests per second for `action`.
    pub fn limit_for(&self, action: &str) -> u32 {
        self.overrides
            .get(action)
            .copied()
            .unwrap_or(self.default_per_second)
    }

    fn interval(&self, action: &str) -> Option<Duration> {
        match self.limit_for(action) {
            0 => None,
            per_second => Some(Duration::from_secs(1) / per_second),
        }
    }

    /// Wait until `action` may be sent.
    pub async fn check(&self, action: &str) {
        let Some(interval) = self.interval(action) else {
            return;
        };

        let start = {
            let mut slots = self.next_slot.lock().await;
            let now = Instant::now();
            let slot = slots.entry(action.to_string()).or_insert(now);
            let start = (*slot).max(now);
            *slot = start + interval;
            start
        };

        let now = Instant::now();
        if start > now {
            log::debug!(
                "[ratelimit] {action} delayed {:.3}s",
                (start - now).as_secs_f64()
            );
            tokio::time::sleep_until(start).await;
        }
    }
}
