//! Error mapping for the MCP server

use rmcp::ErrorData;
use saju_core::CoachError;

/// Converts a core error into an MCP error. Bad input is reported as invalid
/// parameters so the client can correct the call; everything else is
/// internal.
pub fn to_mcp_error(message: &str, error: &CoachError) -> ErrorData {
    match error {
        CoachError::InvalidInput { .. } => {
            ErrorData::invalid_params(format!("{message}: {error}"), None)
        }
        _ => ErrorData::internal_error(format!("{message}: {error}"), None),
    }
}
