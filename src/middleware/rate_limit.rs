//! Rate limiting store.
//!
//! Fixed-window request counting keyed per (client, route) pair, held in
//! process memory for the process lifetime. Owned and injectable rather than
//! ambient so tests can build isolated instances and control the clock.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Time source, injectable for deterministic window-expiry tests.
pub type Clock = Arc<dyn Fn() -> Instant + Send + Sync>;

/// Stale windows are lazily replaced on access; the sweep only bounds
/// memory, so it keeps entries around for one extra grace period.
const SWEEP_GRACE: Duration = Duration::from_secs(15 * 60);

/// Fixed-window rate limiter over a shared counter map.
#[derive(Clone)]
pub struct RateLimiter {
    windows: Arc<Mutex<HashMap<String, RateWindow>>>,
    clock: Clock,
}

struct RateWindow {
    count: u32,
    reset_at: Instant,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(Instant::now))
    }

    pub fn with_clock(clock: Clock) -> Self {
        Self {
            windows: Arc::new(Mutex::new(HashMap::new())),
            clock,
        }
    }

    /// Check whether a request is admitted under the given budget.
    ///
    /// Distinct routes never share a budget: the counter key is the
    /// composite of client and route. Check-then-increment happens as one
    /// atomic step under the map lock, so concurrent requests for the same
    /// key cannot both pass a nearly-exhausted window. A denied request
    /// mutates nothing.
    pub fn allow(
        &self,
        client_id: &str,
        route_key: &str,
        max_requests: u32,
        window: Duration,
    ) -> bool {
        let key = format!("{client_id}:{route_key}");
        let now = (self.clock)();

        let mut windows = self.windows.lock();
        match windows.get_mut(&key) {
            Some(entry) if now < entry.reset_at => {
                if entry.count < max_requests {
                    entry.count += 1;
                    true
                } else {
                    false
                }
            }
            // No window yet, or the previous one expired: start fresh.
            _ => {
                windows.insert(
                    key,
                    RateWindow {
                        count: 1,
                        reset_at: now + window,
                    },
                );
                true
            }
        }
    }

    /// Drop entries whose window expired more than a grace period ago
    /// (call from a background task to bound memory).
    pub fn sweep(&self) {
        let now = (self.clock)();
        let mut windows = self.windows.lock();
        windows.retain(|_, entry| now < entry.reset_at + SWEEP_GRACE);
    }

    /// Number of tracked (client, route) windows.
    pub fn tracked_keys(&self) -> usize {
        self.windows.lock().len()
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}
