//! MCP tool implementations.
//!
//! This module contains the read-only race tools exposed by the server.

pub mod get_race_schedule;
pub mod get_races;

pub use get_race_schedule::get_race_schedule_impl;
pub use get_races::get_races_impl;

use lmu_races_core::Error;
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use serde::Serialize;

/// Serialize a tool response as pretty JSON text content.
fn json_result<T: Serialize>(output: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(output)
        .map_err(|e| Error::SerializeFailed(format!("Failed to serialize response: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}
