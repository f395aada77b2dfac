//! Race records shared by the extractor, the store and the query surface.
//!
//! Two projections of the same data are kept:
//! - [`RaceSlot`]: one race bound to one concrete start time (flat list)
//! - [`RaceSchedule`]: one race card with every start time it was announced for (grouped list)

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One race occupying one concrete time slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RaceSlot {
    /// Race name as shown on the card heading.
    pub name: String,
    /// Tier label (may be empty).
    pub level: String,
    /// Race length in minutes, 0 if the page text could not be read.
    pub duration_minutes: u32,
    /// Track name (may be empty).
    pub track: String,
    /// Start time of this slot.
    pub scheduled_at: DateTime<Utc>,
}

impl RaceSlot {
    /// The card fields of this slot, without its start time.
    pub fn descriptor(&self) -> RaceDescriptor {
        RaceDescriptor {
            name: self.name.clone(),
            level: self.level.clone(),
            duration_minutes: self.duration_minutes,
            track: self.track.clone(),
        }
    }

    /// A slot is expired once its start time is at or before `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.scheduled_at <= now
    }
}

/// Race card fields without any timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RaceDescriptor {
    pub name: String,
    pub level: String,
    pub duration_minutes: u32,
    pub track: String,
}

impl RaceDescriptor {
    /// Bind this race to a concrete start time.
    pub fn slot_at(&self, scheduled_at: DateTime<Utc>) -> RaceSlot {
        RaceSlot {
            name: self.name.clone(),
            level: self.level.clone(),
            duration_minutes: self.duration_minutes,
            track: self.track.clone(),
            scheduled_at,
        }
    }
}

/// One race card grouped with all of its announced start times.
///
/// `slots` keeps the order the times appeared on the page and is not sorted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RaceSchedule {
    pub race: RaceDescriptor,
    pub slots: Vec<DateTime<Utc>>,
}

impl RaceSchedule {
    /// Flat projection: one [`RaceSlot`] per announced time, in slot order.
    pub fn expand(&self) -> Vec<RaceSlot> {
        self.slots.iter().map(|at| self.race.slot_at(*at)).collect()
    }
}
