use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use dashmap::DashMap;
use tokio::time::Instant;
use turnstile_core::{Admission, RateLimiter, RateLimiterError, ThrottleKey};

#[derive(Debug, Clone, Copy)]
struct Window {
    hits: u32,
    resets_at: Instant,
}

impl Window {
    fn open(now: Instant, decay: Duration) -> Self {
        Self {
            hits: 0,
            resets_at: now + decay,
        }
    }

    fn is_expired(&self, now: Instant) -> bool {
        now >= self.resets_at
    }
}

// Expired windows are swept once every this many counted writes
const SWEEP_INTERVAL: usize = 1024;

/// In-process attempt counters.
///
/// Each key's check-then-hit runs under that key's map entry lock, so concurrent
/// attempts on one key are admitted strictly one at a time. Windows that have
/// decayed are dropped by a periodic sweep, so keys that never come back do not
/// accumulate.
#[derive(Default, Clone)]
pub struct HashMapRateLimiter {
    windows: Arc<DashMap<ThrottleKey, Window>>,
    writes: Arc<AtomicUsize>,
}

impl HashMapRateLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    // Must run before any entry guard is taken: retain locks every shard.
    fn sweep_if_due(&self, now: Instant) {
        let writes = self.writes.fetch_add(1, Ordering::Relaxed) + 1;
        if writes % SWEEP_INTERVAL == 0 {
            self.windows.retain(|_, window| !window.is_expired(now));
        }
    }

    fn live_window(&self, key: &ThrottleKey) -> Option<Window> {
        let now = Instant::now();
        self.windows
            .get(key)
            .map(|window| *window)
            .filter(|window| !window.is_expired(now))
    }
}

#[async_trait::async_trait]
impl RateLimiter for HashMapRateLimiter {
    async fn too_many_attempts(
        &self,
        key: &ThrottleKey,
        max_attempts: u32,
    ) -> Result<bool, RateLimiterError> {
        Ok(self
            .live_window(key)
            .is_some_and(|window| window.hits >= max_attempts))
    }

    async fn available_in(&self, key: &ThrottleKey) -> Result<Duration, RateLimiterError> {
        let now = Instant::now();
        Ok(self
            .live_window(key)
            .map(|window| window.resets_at.saturating_duration_since(now))
            .unwrap_or_default())
    }

    async fn hit(&self, key: &ThrottleKey, decay: Duration) -> Result<u32, RateLimiterError> {
        let now = Instant::now();
        self.sweep_if_due(now);
        let mut window = self
            .windows
            .entry(key.clone())
            .or_insert_with(|| Window::open(now, decay));
        if window.is_expired(now) {
            *window = Window::open(now, decay);
        }
        window.hits += 1;
        Ok(window.hits)
    }

    async fn clear(&self, key: &ThrottleKey) -> Result<(), RateLimiterError> {
        self.windows.remove(key);
        Ok(())
    }

    async fn attempt(
        &self,
        key: &ThrottleKey,
        max_attempts: u32,
        decay: Duration,
    ) -> Result<Admission, RateLimiterError> {
        let now = Instant::now();
        self.sweep_if_due(now);
        let mut window = self
            .windows
            .entry(key.clone())
            .or_insert_with(|| Window::open(now, decay));
        if window.is_expired(now) {
            *window = Window::open(now, decay);
        }

        if window.hits >= max_attempts {
            return Ok(Admission::Throttled {
                retry_after: window.resets_at.saturating_duration_since(now),
            });
        }
        window.hits += 1;
        Ok(Admission::Admitted {
            attempts: window.hits,
        })
    }
}
