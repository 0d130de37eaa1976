use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use super::clock::Clock;

/// Requests AniList allows per rolling minute.
pub const ANILIST_MAX_QUOTA: u32 = 90;
pub const QUOTA_WINDOW: Duration = Duration::from_secs(60);
pub const RATE_LIMIT_REMAINING_HEADER: &str = "x-ratelimit-remaining";

/// Client-side view of the AniList rate limit.
///
/// AniList's limiter is rolling, so treating a quiet full window as a fresh
/// allowance is an approximation. The server's 429 handling covers the gap.
pub struct QuotaTracker {
    clock: Arc<dyn Clock>,
    max: u32,
    window: Duration,
    remaining: u32,
    last_call_at: Option<DateTime<Utc>>,
}

impl QuotaTracker {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_limits(clock, ANILIST_MAX_QUOTA, QUOTA_WINDOW)
    }

    pub fn with_limits(clock: Arc<dyn Clock>, max: u32, window: Duration) -> Self {
        Self {
            clock,
            max,
            window,
            remaining: max,
            last_call_at: None,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn last_call_at(&self) -> Option<DateTime<Utc>> {
        self.last_call_at
    }

    /// Wait out the rest of the window when the allowance is spent.
    pub async fn before_call(&mut self) {
        if self.remaining > 0 {
            return;
        }

        let elapsed = self
            .last_call_at
            .and_then(|at| (self.clock.now() - at).to_std().ok())
            .unwrap_or(self.window);
        if let Some(wait) = self.window.checked_sub(elapsed).filter(|d| !d.is_zero()) {
            info!(wait_ms = wait.as_millis() as u64, "AniList quota exhausted, pausing");
            self.clock.sleep(wait).await;
        }
        self.remaining = self.max;
    }

    /// Stamp the time of an attempt, whatever its outcome.
    pub fn record_call(&mut self) {
        self.last_call_at = Some(self.clock.now());
    }

    /// Update the allowance from the server's remaining-count header.
    /// Missing or unparseable values keep the previous estimate.
    pub fn after_call(&mut self, header_value: Option<&str>) {
        match header_value.and_then(|v| v.trim().parse::<u32>().ok()) {
            Some(remaining) => self.remaining = remaining,
            None => debug!(
                header = ?header_value,
                remaining = self.remaining,
                "unusable rate limit header, keeping previous estimate"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anilist::clock::ManualClock;

    fn tracker() -> (ManualClock, QuotaTracker) {
        let clock = ManualClock::new(DateTime::from_timestamp(1_700_000_000, 0).unwrap());
        let tracker = QuotaTracker::new(Arc::new(clock.clone()));
        (clock, tracker)
    }

    #[tokio::test]
    async fn exhausted_quota_sleeps_for_the_rest_of_the_window() {
        let (clock, mut quota) = tracker();
        quota.record_call();
        quota.after_call(Some("0"));
        clock.advance(Duration::from_secs(20));

        quota.before_call().await;

        assert_eq!(clock.sleeps(), vec![Duration::from_secs(40)]);
        assert_eq!(quota.remaining(), ANILIST_MAX_QUOTA);
    }

    #[tokio::test]
    async fn elapsed_window_resets_without_waiting() {
        let (clock, mut quota) = tracker();
        quota.record_call();
        quota.after_call(Some("0"));
        clock.advance(Duration::from_secs(61));

        quota.before_call().await;

        assert!(clock.sleeps().is_empty());
        assert_eq!(quota.remaining(), ANILIST_MAX_QUOTA);
    }

    #[tokio::test]
    async fn bad_headers_keep_previous_value() {
        let (_clock, mut quota) = tracker();
        quota.after_call(Some("12"));
        quota.after_call(None);
        quota.after_call(Some("-3"));
        quota.after_call(Some("lots"));

        assert_eq!(quota.remaining(), 12);
    }
}
