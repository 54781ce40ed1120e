//! `autocomplete_cancel` tool handler

use std::sync::Arc;

use rmcp::ErrorData as McpError;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::CallToolResult;
use validator::Validate;

use cortex_application::AbortRegistry;

use crate::args::AutocompleteCancelArgs;
use crate::responses::ResponseFormatter;

/// Handler for the `autocomplete_cancel` tool
///
/// Cancels the request's generation token via the shared abort registry.
/// The completion pipeline itself polls cancellation only at stream-chunk
/// boundaries (no mid-token preemption), so a cancel racing the very last
/// chunk may still return a completion.
pub struct AutocompleteCancelHandler {
    abort_registry: Arc<AbortRegistry>,
}

impl AutocompleteCancelHandler {
    /// Create a new `autocomplete_cancel` handler
    pub fn new(abort_registry: Arc<AbortRegistry>) -> Self {
        Self { abort_registry }
    }

    /// Handle the `autocomplete_cancel` tool request
    pub async fn handle(&self, Parameters(args): Parameters<AutocompleteCancelArgs>) -> Result<CallToolResult, McpError> {
        if let Err(e) = args.validate() {
            return Err(McpError::invalid_params(format!("Invalid arguments: {e}"), None));
        }

        self.abort_registry.abort(&args.request_id);
        Ok(ResponseFormatter::format_cancel_ack(&args.request_id))
    }
}
