//! Error handling utilities for MCP server

use rmcp::ErrorData;
use waypoint_core::AdvisorError;

/// Convert advisor errors to MCP errors
///
/// Unknown actions and malformed input are the caller's fault and map to
/// `invalid_params`; everything else is an internal error.
pub fn to_mcp_error(message: &str, error: &AdvisorError) -> ErrorData {
    let text = format!("{message}: {error}");
    if error.is_caller_error() {
        ErrorData::invalid_params(text, None)
    } else {
        ErrorData::internal_error(text, None)
    }
}
