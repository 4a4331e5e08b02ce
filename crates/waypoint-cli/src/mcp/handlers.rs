//! MCP tool handlers implementation

use std::sync::Arc;

use log::debug;
use rmcp::{
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
    ErrorData,
};
use schemars::JsonSchema;
use serde::Deserialize;
use waypoint_core::{
    display::Suggestions, models::ActionHistory, params as core, Catalog, FlowAdvisor,
    ProfileState,
};

use super::errors::to_mcp_error;

/// Generic MCP wrapper for core parameter types
///
/// Adds the JSON schema rmcp needs for tool registration while the core
/// types stay free of MCP concerns. Serde passes straight through to the
/// wrapped type.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct McpParams<T>(T)
where
    T: JsonSchema;

impl<T> JsonSchema for McpParams<T>
where
    T: JsonSchema,
{
    fn schema_name() -> std::borrow::Cow<'static, str> {
        T::schema_name()
    }

    fn json_schema(g: &mut schemars::SchemaGenerator) -> schemars::Schema {
        T::json_schema(g)
    }
}

impl<T> AsRef<T> for McpParams<T>
where
    T: JsonSchema,
{
    fn as_ref(&self) -> &T {
        &self.0
    }
}

pub type Snapshot = McpParams<core::Snapshot>;
pub type ActionQuery = McpParams<core::ActionQuery>;

pub type McpResult = Result<CallToolResult, ErrorData>;

/// Handler implementations for the MCP server
pub struct McpHandlers {
    catalog: Arc<Catalog>,
    advisor: FlowAdvisor,
}

impl McpHandlers {
    pub fn new(catalog: Arc<Catalog>, advisor: FlowAdvisor) -> Self {
        Self { catalog, advisor }
    }

    fn resolve(&self, snapshot: &core::Snapshot) -> Result<(ProfileState, ActionHistory), ErrorData> {
        snapshot
            .resolve(&self.catalog)
            .map_err(|e| to_mcp_error("Invalid snapshot", &e))
    }

    pub async fn suggest_next_steps(&self, Parameters(params): Parameters<Snapshot>) -> McpResult {
        debug!("suggest_next_steps: {params:?}");
        let (profile, history) = self.resolve(params.as_ref())?;

        let suggestions = self
            .advisor
            .suggest_next_steps(&profile, &history, &self.catalog)
            .map_err(|e| to_mcp_error("Failed to suggest next steps", &e))?;

        Ok(CallToolResult::success(vec![Content::text(
            Suggestions::new(suggestions).to_string(),
        )]))
    }

    pub async fn check_prerequisites(
        &self,
        Parameters(params): Parameters<ActionQuery>,
    ) -> McpResult {
        debug!("check_prerequisites: {params:?}");
        let query = params.as_ref();
        let (profile, history) = self.resolve(&query.snapshot)?;

        let check = self
            .advisor
            .check_prerequisites(&query.action_id, &profile, &history, &self.catalog)
            .map_err(|e| to_mcp_error("Failed to check prerequisites", &e))?;

        Ok(CallToolResult::success(vec![Content::text(
            check.to_string(),
        )]))
    }

    pub async fn explain_action(&self, Parameters(params): Parameters<ActionQuery>) -> McpResult {
        debug!("explain_action: {params:?}");
        let query = params.as_ref();
        let (profile, history) = self.resolve(&query.snapshot)?;

        let help = self
            .advisor
            .explain(&query.action_id, &profile, &history, &self.catalog)
            .map_err(|e| to_mcp_error("Failed to explain action", &e))?;

        Ok(CallToolResult::success(vec![Content::text(
            help.to_string(),
        )]))
    }

    pub async fn efficiency_score(&self, Parameters(params): Parameters<Snapshot>) -> McpResult {
        debug!("efficiency_score: {params:?}");
        let (profile, history) = self.resolve(params.as_ref())?;

        let breakdown = self
            .advisor
            .efficiency_breakdown(&profile, &history, &self.catalog)
            .map_err(|e| to_mcp_error("Failed to compute efficiency score", &e))?;

        Ok(CallToolResult::success(vec![Content::text(
            breakdown.to_string(),
        )]))
    }
}
