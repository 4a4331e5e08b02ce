//! MCP server implementation for Waypoint
//!
//! Exposes the advisor's queries as Model Context Protocol tools so AI
//! assistants can ask for next steps on behalf of an agent. Every tool takes
//! the agent's snapshot in the request; the server keeps no user state.

use std::{future::Future, sync::Arc};

use anyhow::Result;
use log::{debug, error, info};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ServerHandler,
};
use tokio::signal::unix::{signal, SignalKind};
use waypoint_core::{Catalog, FlowAdvisor};

pub mod errors;
pub mod handlers;

pub use handlers::{ActionQuery, McpResult, Snapshot};

/// MCP server for Waypoint
#[derive(Clone)]
pub struct WaypointMcpServer {
    catalog: Arc<Catalog>,
    advisor: FlowAdvisor,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl WaypointMcpServer {
    /// Create a new Waypoint MCP server over a validated catalog
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
            advisor: FlowAdvisor::new(),
            tool_router: Self::tool_router(),
        }
    }

    fn handlers(&self) -> handlers::McpHandlers {
        handlers::McpHandlers::new(self.catalog.clone(), self.advisor)
    }

    #[tool(
        name = "suggest_next_steps",
        description = "Suggest what the agent should do next. Pass the profile flags that are set (basic_info, contact_info, bio, social_links) and the actions already completed, each with an optional RFC 3339 completed_at. Returns every remaining action ordered by priority (high, medium, low), with blocked actions last and their unmet prerequisites listed."
    )]
    async fn suggest_next_steps(&self, params: Parameters<Snapshot>) -> McpResult {
        self.handlers().suggest_next_steps(params).await
    }

    #[tool(
        name = "check_prerequisites",
        description = "Check whether a single catalog action can be started. Requires action_id plus the same flags and completed fields as suggest_next_steps. Returns ready, or the unmet prerequisites with the action that fixes each one."
    )]
    async fn check_prerequisites(&self, params: Parameters<ActionQuery>) -> McpResult {
        self.handlers().check_prerequisites(params).await
    }

    #[tool(
        name = "explain_action",
        description = "Explain a catalog action: what it involves, how long it takes, and what must happen before starting it. Requires action_id plus the agent's flags and completed actions."
    )]
    async fn explain_action(&self, params: Parameters<ActionQuery>) -> McpResult {
        self.handlers().explain_action(params).await
    }

    #[tool(
        name = "efficiency_score",
        description = "Score from 0 to 100 summarising how well the agent uses the product: profile completion (up to 40), variety of action categories (up to 30) and following a recommended usage pattern in order (30). Returns the total with its breakdown."
    )]
    async fn efficiency_score(&self, params: Parameters<Snapshot>) -> McpResult {
        self.handlers().efficiency_score(params).await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for WaypointMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "waypoint".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Implementation::default()
            },
            instructions: Some(r#"Waypoint suggests next steps for real estate agents using a marketing application.

## Snapshot
Every tool takes the agent's current state:
- `flags`: profile flags that are set (basic_info, contact_info, bio, social_links)
- `completed`: actions already done, as `{"id": "...", "completed_at": "RFC 3339"}`; completed_at may be omitted

## Workflow
1. Call `suggest_next_steps` to get the ordered list of remaining actions
2. Before starting an action, call `check_prerequisites` or `explain_action`
3. Call `efficiency_score` to summarise progress

## Priorities
- **high**: the next step on a usage pattern the agent is following, or the first step of one not yet started
- **medium**: ready to start
- **low**: blocked; the unmet prerequisites say what to do first"#.to_string()),
        }
    }
}

/// Run the MCP server with stdio transport
pub async fn run_stdio_server(server: WaypointMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!("Starting Waypoint MCP server on stdio");
    debug!(
        "Server created with {} tools over {} catalog actions",
        server.tool_router.list_all().len(),
        server.catalog.actions.len()
    );

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down gracefully...");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down gracefully...");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}
