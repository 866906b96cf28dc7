//! Sliding-window admission control

use crate::RateLimiterConfig;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Instant;
use tracing::warn;

/// Per-identity sliding-window rate limiter.
///
/// Each identity owns an ordered queue of admission timestamps. On every
/// call, entries older than the window are evicted lazily, then the count
/// is checked against capacity. Check-and-append happens under one lock,
/// so overlapping calls for the same identity serialize correctly.
pub struct RateLimiter {
    config: RateLimiterConfig,
    state: Mutex<HashMap<String, VecDeque<Instant>>>,
}

impl RateLimiter {
    /// Create a limiter with the given configuration
    pub fn new(config: RateLimiterConfig) -> Self {
        Self {
            config,
            state: Mutex::new(HashMap::new()),
        }
    }

    /// Create a limiter with the default configuration
    pub fn default_config() -> Self {
        Self::new(RateLimiterConfig::default())
    }

    /// Try to admit a request for the identity.
    ///
    /// Returns true and records the request when the identity is under
    /// capacity within the window; returns false otherwise.
    pub fn admit(&self, identity: &str) -> bool {
        self.admit_at(identity, Instant::now())
    }

    /// Requests the identity may still issue within the current window
    pub fn remaining(&self, identity: &str) -> usize {
        self.remaining_at(identity, Instant::now())
    }

    /// Clock-injected admission, used directly by tests
    pub fn admit_at(&self, identity: &str, now: Instant) -> bool {
        let mut state = self.state.lock().unwrap();
        let timestamps = state.entry(identity.to_string()).or_default();

        Self::evict(timestamps, now, &self.config);

        if timestamps.len() >= self.config.capacity {
            warn!(
                "Rate limit exceeded for identity '{}' ({} in window)",
                identity,
                timestamps.len()
            );
            return false;
        }

        timestamps.push_back(now);
        true
    }

    /// Clock-injected remaining count, used directly by tests
    pub fn remaining_at(&self, identity: &str, now: Instant) -> usize {
        let mut state = self.state.lock().unwrap();
        match state.get_mut(identity) {
            Some(timestamps) => {
                Self::evict(timestamps, now, &self.config);
                self.config.capacity.saturating_sub(timestamps.len())
            }
            None => self.config.capacity,
        }
    }

    /// Drop timestamps that have aged out of the window
    fn evict(timestamps: &mut VecDeque<Instant>, now: Instant, config: &RateLimiterConfig) {
        let window = config.window();
        while let Some(oldest) = timestamps.front() {
            if now.duration_since(*oldest) >= window {
                timestamps.pop_front();
            } else {
                break;
            }
        }
    }
}
