//! Read-only queries over the race store.
//!
//! Every read goes through [`Store::snapshot`], the same synchronized path
//! the schedulers write through.

use lmu_races_core::{RaceSchedule, RaceSlot, Store};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Response of `get_races`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GetRacesResponse {
    /// Upcoming races, one per start time, soonest first.
    pub races: Vec<RaceSlot>,
}

/// Response of `get_race_schedule`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GetRaceScheduleResponse {
    /// Race cards with all announced start times, in page order.
    pub schedules: Vec<RaceSchedule>,
}

#[derive(Clone, Debug)]
pub struct RaceQueryService {
    store: Store,
}

impl RaceQueryService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn get_races(&self) -> GetRacesResponse {
        GetRacesResponse { races: self.store.snapshot().slots.clone() }
    }

    pub fn get_race_schedule(&self) -> GetRaceScheduleResponse {
        GetRaceScheduleResponse { schedules: self.store.snapshot().schedules.clone() }
    }
}
