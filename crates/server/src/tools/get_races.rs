//! get_races tool implementation.
//!
//! Returns every upcoming race slot, soonest first.

use rmcp::{ErrorData as McpError, model::CallToolResult};

use super::json_result;
use crate::query::RaceQueryService;

/// Implementation of the get_races tool.
pub fn get_races_impl(query: &RaceQueryService) -> Result<CallToolResult, McpError> {
    json_result(&query.get_races())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use lmu_races_core::{RaceDescriptor, RaceSchedule, Store};

    #[test]
    fn test_get_races_impl_empty() {
        let query = RaceQueryService::new(Store::new());
        let result = get_races_impl(&query).unwrap();
        assert!(!result.is_error.unwrap_or(false));
    }

    #[test]
    fn test_get_races_impl_populated() {
        let store = Store::new();
        let race = RaceDescriptor {
            name: "Sprint".to_string(),
            level: "Bronze".to_string(),
            duration_minutes: 20,
            track: "Portimao".to_string(),
        };
        let at = Utc.with_ymd_and_hms(2026, 3, 7, 19, 15, 0).unwrap();
        let schedule = RaceSchedule { race, slots: vec![at] };
        store.replace(schedule.expand(), vec![schedule], at);

        let result = get_races_impl(&RaceQueryService::new(store)).unwrap();
        assert!(!result.is_error.unwrap_or(false));
    }
}
