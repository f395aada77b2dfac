//! In-memory race store with atomic snapshot publishing.
//!
//! The store holds one immutable [`StoreSnapshot`] behind a read/write lock.
//! Writers build a complete new snapshot and swap it in; readers clone the
//! `Arc` and never see a half-written pair of collections.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::model::{RaceSchedule, RaceSlot};

/// A fully consistent view of the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreSnapshot {
    /// Flat list, sorted ascending by `scheduled_at`.
    pub slots: Vec<RaceSlot>,
    /// Grouped list, in page order. Only replaced, never evicted.
    pub schedules: Vec<RaceSchedule>,
    /// When the current collections were published by a refresh.
    pub refreshed_at: Option<DateTime<Utc>>,
}

/// Shared handle to the race store.
///
/// Cloning is cheap; every clone points at the same data.
#[derive(Clone, Debug, Default)]
pub struct Store {
    current: Arc<RwLock<Arc<StoreSnapshot>>>,
}

impl Store {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current snapshot. The returned value is immutable and stays valid
    /// after later writes.
    pub fn snapshot(&self) -> Arc<StoreSnapshot> {
        Arc::clone(&self.current.read())
    }

    /// Overwrite both collections with the result of a refresh.
    ///
    /// `slots` is sorted by start time before it is published.
    pub fn replace(&self, mut slots: Vec<RaceSlot>, schedules: Vec<RaceSchedule>, refreshed_at: DateTime<Utc>) {
        slots.sort_by_key(|slot| slot.scheduled_at);

        let next = Arc::new(StoreSnapshot { slots, schedules, refreshed_at: Some(refreshed_at) });
        tracing::debug!(
            slots = next.slots.len(),
            schedules = next.schedules.len(),
            "publishing race snapshot"
        );

        *self.current.write() = next;
    }

    /// Drop every slot starting at or before `now`. Returns how many were removed.
    ///
    /// Survivors keep their relative order and the grouped list is left alone.
    pub fn evict_expired(&self, now: DateTime<Utc>) -> usize {
        let mut current = self.current.write();

        // slots are sorted, so the expired ones form a prefix
        let expired = current.slots.partition_point(|slot| slot.is_expired(now));
        if expired == 0 {
            return 0;
        }

        *current = Arc::new(StoreSnapshot {
            slots: current.slots[expired..].to_vec(),
            schedules: current.schedules.clone(),
            refreshed_at: current.refreshed_at,
        });

        expired
    }

    /// Number of slots in the flat list.
    pub fn len(&self) -> usize {
        self.current.read().slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
