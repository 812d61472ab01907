//! Per-client fixed-window rate limiting.
//!
//! Each client key owns a window that starts on its first request and rolls
//! over after the configured interval. Within a window, requests past the
//! threshold are rejected without advancing the window. Counters are kept
//! in a concurrent map; increments on one key never block other keys.
//!
//! The worst case at a rollover boundary is roughly 2x the threshold in a
//! single interval, which is within the accepted fairness bound.

use std::time::{Duration, Instant};

use dashmap::DashMap;

#[derive(Debug, Clone, Copy)]
struct RateWindow {
    started: Instant,
    count: u32,
}

/// Fixed-window rate limiter keyed by client.
#[derive(Debug)]
pub struct RateLimiter {
    threshold: u32,
    window: Duration,
    windows: DashMap<String, RateWindow>,
}

impl RateLimiter {
    /// Creates a limiter admitting `threshold` requests per `window`.
    #[must_use]
    pub fn new(threshold: u32, window: Duration) -> Self {
        Self {
            threshold,
            window,
            windows: DashMap::new(),
        }
    }

    /// Records a request for `key` and returns whether it is admitted.
    ///
    /// The threshold-th request within a window is admitted; the next one
    /// is rejected until the window rolls over.
    pub fn allow(&self, key: &str) -> bool {
        let now = Instant::now();
        let mut entry = self
            .windows
            .entry(key.to_string())
            .or_insert(RateWindow { started: now, count: 0 });

        if now.duration_since(entry.started) >= self.window {
            entry.started = now;
            entry.count = 0;
        }

        entry.count = entry.count.saturating_add(1);
        entry.count <= self.threshold
    }

    /// Drops windows idle for more than two intervals.
    ///
    /// Called periodically so keys of departed clients do not accumulate.
    pub fn prune_stale(&self) {
        let now = Instant::now();
        let horizon = self.window * 2;
        self.windows
            .retain(|_, w| now.duration_since(w.started) < horizon);
    }

    /// Returns the number of live windows (for diagnostics).
    #[must_use]
    pub fn window_count(&self) -> usize {
        self.windows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admits_up_to_threshold() {
        let limiter = RateLimiter::new(3, Duration::from_secs(60));

        assert!(limiter.allow("client-a"));
        assert!(limiter.allow("client-a"));
        assert!(limiter.allow("client-a"));
        // threshold + 1 is rejected
        assert!(!limiter.allow("client-a"));
        assert!(!limiter.allow("client-a"));
    }

    #[test]
    fn test_keys_are_independent() {
        let limiter = RateLimiter::new(1, Duration::from_secs(60));

        assert!(limiter.allow("client-a"));
        assert!(!limiter.allow("client-a"));
        assert!(limiter.allow("client-b"));
    }

    #[test]
    fn test_window_rollover_readmits() {
        let limiter = RateLimiter::new(1, Duration::from_millis(20));

        assert!(limiter.allow("client-a"));
        assert!(!limiter.allow("client-a"));

        std::thread::sleep(Duration::from_millis(25));
        assert!(limiter.allow("client-a"));
    }

    #[test]
    fn test_rejections_do_not_extend_window() {
        let limiter = RateLimiter::new(1, Duration::from_millis(30));

        assert!(limiter.allow("client-a"));
        // Hammering while limited must not push the rollover out.
        for _ in 0..10 {
            assert!(!limiter.allow("client-a"));
            std::thread::sleep(Duration::from_millis(4));
        }
        assert!(limiter.allow("client-a"));
    }

    #[test]
    fn test_prune_stale_drops_idle_windows() {
        let limiter = RateLimiter::new(5, Duration::from_millis(10));

        assert!(limiter.allow("client-a"));
        assert_eq!(limiter.window_count(), 1);

        std::thread::sleep(Duration::from_millis(25));
        limiter.prune_stale();
        assert_eq!(limiter.window_count(), 0);
    }
}
