//! Eviction scheduler.
//!
//! Sweeps expired slots once at startup, then on every multiple of the
//! eviction period since the Unix epoch, so every instance sweeps on the same
//! wall-clock grid (:00, :10, :20, ... for the default 10 minutes).

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use lmu_races_core::Store;
use tokio_util::sync::CancellationToken;

/// Wall-clock source for the eviction grid.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// The system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// First multiple of `period` (counted from the Unix epoch) strictly after `now`.
pub fn next_boundary(now: DateTime<Utc>, period: Duration) -> DateTime<Utc> {
    let period_ms = i64::try_from(period.as_millis()).unwrap_or(i64::MAX).max(1);
    let next_ms = (now.timestamp_millis().div_euclid(period_ms) + 1).saturating_mul(period_ms);
    DateTime::from_timestamp_millis(next_ms).unwrap_or(now)
}

pub struct EvictionScheduler {
    store: Store,
    period: Duration,
    clock: Arc<dyn Clock>,
}

impl EvictionScheduler {
    pub fn new(store: Store, period: Duration) -> Self {
        Self::with_clock(store, period, Arc::new(SystemClock))
    }

    pub fn with_clock(store: Store, period: Duration, clock: Arc<dyn Clock>) -> Self {
        Self { store, period, clock }
    }

    /// One eviction pass. Returns the number of slots removed.
    pub fn sweep(&self, now: DateTime<Utc>) -> usize {
        let removed = self.store.evict_expired(now);
        if removed > 0 {
            tracing::info!(removed, remaining = self.store.len(), "evicted expired race slots");
        } else {
            tracing::debug!("no expired race slots");
        }
        removed
    }

    /// Run until `cancel` fires (should be spawned as a task).
    ///
    /// The wait is recomputed from the clock before every sweep, so a late
    /// wake-up or a clock step never shifts later sweeps off the grid.
    pub async fn run(self, cancel: CancellationToken) {
        tracing::info!(period = ?self.period, "eviction scheduler started");

        self.sweep(self.clock.now());

        loop {
            let now = self.clock.now();
            let wait = (next_boundary(now, self.period) - now).to_std().unwrap_or_default();
            tracing::debug!(wait = ?wait, "waiting for the next eviction boundary");

            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(wait) => {
                    self.sweep(self.clock.now());
                }
            }
        }

        tracing::info!("eviction scheduler stopped");
    }
}
