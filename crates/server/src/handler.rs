//! MCP server handler implementation.
//!
//! This module defines the main server handler that
//! routes tool calls to the race query tools.
use crate::query::RaceQueryService;
use crate::tools::{get_race_schedule_impl, get_races_impl};

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::tool::{ToolCallContext, ToolRouter},
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};

/// The main MCP server handler for lmu-races.
#[derive(Clone)]
pub struct RaceServer {
    query: RaceQueryService,
    tool_router: ToolRouter<Self>,
}

/// Tool router implementation using the #[tool_router] macro.
///
/// This macro generates the routing logic that maps tool names to handler methods.
#[tool_router]
impl RaceServer {
    /// Create a new server handler.
    pub fn new(query: RaceQueryService) -> Self {
        Self { query, tool_router: Self::tool_router() }
    }

    /// List upcoming races, one entry per start time, soonest first.
    #[tool(description = "List upcoming races, one entry per start time, sorted by start time.")]
    async fn get_races(&self) -> Result<CallToolResult, McpError> {
        get_races_impl(&self.query)
    }

    /// List race cards grouped with all of their announced start times.
    #[tool(description = "List race cards with name, level, duration and track, each with all announced start times.")]
    async fn get_race_schedule(&self) -> Result<CallToolResult, McpError> {
        get_race_schedule_impl(&self.query)
    }
}

impl ServerHandler for RaceServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "lmu-races".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::model::ErrorData> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::model::ErrorData> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }
}
