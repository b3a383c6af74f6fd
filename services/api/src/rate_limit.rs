//! Token-bucket rate limiting
//!
//! Keyed buckets over a concurrent map; the login endpoint uses this to slow
//! credential-stuffing attempts per email address. The map is capped: once it
//! is full, buckets that have refilled back to capacity are swept before a
//! new key is admitted, so tracking stays bounded while drained buckets keep
//! their state.

use crate::error::ApiError;
use dashmap::DashMap;
use std::time::Instant;

/// Buckets tracked before idle ones are swept
const MAX_TRACKED: usize = 10_000;

#[derive(Clone)]
struct Bucket {
    capacity: u32,
    tokens: f64,
    refill_rate: f64,
    last_update: Instant,
}

impl Bucket {
    fn new(capacity: u32, refill_rate: f64) -> Self {
        Self {
            capacity,
            tokens: capacity as f64,
            refill_rate,
            last_update: Instant::now(),
        }
    }

    fn allow_request(&mut self, tokens: u32) -> bool {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_update).as_secs_f64();

        self.tokens = f64::min(
            self.capacity as f64,
            self.tokens + elapsed * self.refill_rate,
        );
        self.last_update = now;

        if self.tokens >= tokens as f64 {
            self.tokens -= tokens as f64;
            true
        } else {
            false
        }
    }

    /// A bucket refilled back to capacity carries no state worth keeping
    fn is_idle(&self) -> bool {
        let elapsed = self.last_update.elapsed().as_secs_f64();
        self.tokens + elapsed * self.refill_rate >= self.capacity as f64
    }
}

pub struct RateLimiter {
    // Maps keys such as "login:email" to their bucket
    buckets: DashMap<String, Bucket>,
    max_tracked: usize,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self {
            buckets: DashMap::new(),
            max_tracked: MAX_TRACKED,
        }
    }

    #[cfg(test)]
    fn with_max_tracked(max_tracked: usize) -> Self {
        Self {
            buckets: DashMap::new(),
            max_tracked,
        }
    }

    pub fn check(&self, key: &str, capacity: u32, refill_rate: f64) -> Result<(), ApiError> {
        if self.buckets.len() >= self.max_tracked && !self.buckets.contains_key(key) {
            self.buckets.retain(|_, bucket| !bucket.is_idle());
        }

        let mut bucket = self
            .buckets
            .entry(key.to_string())
            .or_insert_with(|| Bucket::new(capacity, refill_rate));

        if bucket.allow_request(1) {
            Ok(())
        } else {
            Err(ApiError::RateLimitExceeded(format!("Rate limit for {key}")))
        }
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}
