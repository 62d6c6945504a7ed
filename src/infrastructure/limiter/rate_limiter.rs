use std::{
    sync::Arc,
    time::{Duration, Instant},
};
use dashmap::DashMap;
use parking_lot::Mutex;
use tokio::time::sleep;

/// A token bucket which allows fractional tokens for precise refill
#[derive(Debug)]
struct TokenBucket {
    capacity: f64,
    tokens: f64,
    refill_per_sec: f64,
    last_refill: Instant,
    last_seen: Instant,
}

impl TokenBucket {
    fn new(capacity: f64, refill_per_sec: f64) -> Self {
        let now = Instant::now();
        Self {
            capacity,
            tokens: capacity,
            refill_per_sec,
            last_refill: now,
            last_seen: now,
        }
    }

    fn refill(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_refill).as_secs_f64();
        if elapsed > 0.0 {
            self.tokens = (self.tokens + elapsed * self.refill_per_sec).min(self.capacity);
            self.last_refill = now;
        }
    }

    /// Small epsilon to avoid fp surprises
    fn try_consume(&mut self) -> Result<(), u64> {
        self.last_seen = Instant::now();
        self.refill();
        if self.tokens + 1e-12 >= 1.0 {
            self.tokens -= 1.0;
            Ok(())
        } else {
            let needed = 1.0 - self.tokens;
            Err(((needed / self.refill_per_sec).ceil() as u64).max(1))
        }
    }
}

/// Outcome of a rate-limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    Allowed,
    Limited { retry_after_secs: u64 },
}

/// Per-key token buckets, e.g. one per client IP.
#[derive(Clone)]
pub struct RateLimiterStore {
    map: Arc<DashMap<String, Arc<Mutex<TokenBucket>>>>,
    capacity: f64,
    refill_per_sec: f64,
    bucket_ttl: Duration,
}

impl RateLimiterStore {
    pub fn new(capacity: u32, period: Duration) -> Self {
        let capacity = f64::from(capacity.max(1));
        Self {
            map: Arc::new(DashMap::new()),
            capacity,
            refill_per_sec: capacity / period.as_secs_f64().max(1.0),
            bucket_ttl: period,
        }
    }

    /// `limit` requests per hour, bursting up to `limit`.
    pub fn per_hour(limit: u32) -> Self {
        Self::new(limit, Duration::from_secs(3600))
    }

    fn get_bucket(&self, key: &str) -> Arc<Mutex<TokenBucket>> {
        if let Some(existing) = self.map.get(key) {
            return existing.clone();
        }
        self.map
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(TokenBucket::new(self.capacity, self.refill_per_sec))))
            .clone()
    }

    pub fn check(&self, key: &str) -> RateDecision {
        let bucket = self.get_bucket(key);
        let mut b = bucket.lock();
        match b.try_consume() {
            Ok(()) => RateDecision::Allowed,
            Err(retry_after_secs) => RateDecision::Limited { retry_after_secs },
        }
    }

    /// Drops buckets idle for longer than their refill period; a fresh
    /// bucket would be full by then anyway.
    pub fn evict_idle(&self) -> usize {
        let now = Instant::now();
        let ttl = self.bucket_ttl;
        let before = self.map.len();
        self.map.retain(|_, bucket| now.duration_since(bucket.lock().last_seen) <= ttl);
        before - self.map.len()
    }

    pub fn spawn_eviction(&self) {
        let store = self.clone();
        tokio::spawn(async move {
            let interval = Duration::from_secs(60);
            loop {
                sleep(interval).await;
                let evicted = store.evict_idle();
                if evicted > 0 {
                    tracing::debug!("Evicted {} idle rate-limit buckets", evicted);
                }
            }
        });
    }
}
