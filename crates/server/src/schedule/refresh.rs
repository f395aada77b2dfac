//! Refresh scheduler.
//!
//! Each cycle fetches the race page, extracts races and publishes them to the
//! store, followed by an immediate eviction pass. A failed cycle leaves the
//! store as it was and waits for the next tick; there is no retry.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use lmu_races_client::{Extraction, PageSource, RaceExtractor};
use lmu_races_core::{Error, Store};
use tokio::time::{MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;
use url::Url;

/// Outcome of one successful refresh cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleReport {
    pub schedules: usize,
    pub slots: usize,
    /// Slots that had already started, dropped before or right after publishing.
    pub evicted: usize,
    pub fetch_ms: u128,
}

pub struct RefreshScheduler {
    source: Arc<dyn PageSource>,
    extractor: RaceExtractor,
    store: Store,
    url: Url,
    interval: Duration,
}

impl RefreshScheduler {
    pub fn new(
        source: Arc<dyn PageSource>, extractor: RaceExtractor, store: Store, url: Url, interval: Duration,
    ) -> Self {
        Self { source, extractor, store, url, interval }
    }

    /// Fetch, extract and publish once.
    ///
    /// # Errors
    ///
    /// Fetch and extraction errors are returned untouched; the store is only
    /// written once both have succeeded.
    ///
    /// Slots starting at or before the extraction time are dropped before the
    /// new snapshot is published, and an eviction pass follows publication.
    pub async fn run_cycle(&self, cancel: &CancellationToken) -> Result<CycleReport, Error> {
        let started = std::time::Instant::now();
        let body = self.source.fetch_page(&self.url, cancel).await?;
        let fetch_ms = started.elapsed().as_millis();

        let now = Utc::now();
        let Extraction { mut slots, schedules } = self.extractor.extract_page(&body, now)?;

        let extracted = slots.len();
        let schedule_count = schedules.len();

        // started slots never reach a published snapshot
        slots.retain(|slot| !slot.is_expired(now));
        let mut evicted = extracted - slots.len();
        self.store.replace(slots, schedules, now);

        evicted += self.store.evict_expired(Utc::now());

        Ok(CycleReport { schedules: schedule_count, slots: extracted, evicted, fetch_ms })
    }

    /// Run one cycle now and then one per interval until `cancel` fires
    /// (should be spawned as a task).
    pub async fn run(self, cancel: CancellationToken) {
        tracing::info!(url = %self.url, interval = ?self.interval, "refresh scheduler started");

        let mut ticker = interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {}
            }

            match self.run_cycle(&cancel).await {
                Ok(report) => tracing::info!(
                    schedules = report.schedules,
                    slots = report.slots,
                    evicted = report.evicted,
                    fetch_ms = report.fetch_ms as u64,
                    "refreshed races"
                ),
                Err(Error::Cancelled) => break,
                Err(e) => tracing::warn!(error = %e, "refresh cycle failed; keeping previous races"),
            }
        }

        tracing::info!("refresh scheduler stopped");
    }
}
