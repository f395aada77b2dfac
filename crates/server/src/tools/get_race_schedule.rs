//! get_race_schedule tool implementation.
//!
//! Returns race cards grouped with all of their announced start times.

use rmcp::{ErrorData as McpError, model::CallToolResult};

use super::json_result;
use crate::query::RaceQueryService;

/// Implementation of the get_race_schedule tool.
pub fn get_race_schedule_impl(query: &RaceQueryService) -> Result<CallToolResult, McpError> {
    json_result(&query.get_race_schedule())
}
