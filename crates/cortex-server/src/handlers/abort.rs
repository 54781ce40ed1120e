//! `abort` tool handler

use std::sync::Arc;

use rmcp::ErrorData as McpError;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::CallToolResult;
use validator::Validate;

use cortex_application::AbortRegistry;

use crate::args::AbortArgs;
use crate::responses::ResponseFormatter;

/// Handler for the generic `abort` tool, used to cancel any registered
/// long-running operation by the id it was started with (an indexing run or
/// a completion request).
pub struct AbortHandler {
    abort_registry: Arc<AbortRegistry>,
}

impl AbortHandler {
    /// Create a new `abort` handler
    pub fn new(abort_registry: Arc<AbortRegistry>) -> Self {
        Self { abort_registry }
    }

    /// Handle the `abort` tool request
    pub async fn handle(&self, Parameters(args): Parameters<AbortArgs>) -> Result<CallToolResult, McpError> {
        if let Err(e) = args.validate() {
            return Err(McpError::invalid_params(format!("Invalid arguments: {e}"), None));
        }

        self.abort_registry.abort(&args.message_id);
        Ok(ResponseFormatter::format_abort_ack(&args.message_id))
    }
}
