//! `autocomplete_accept` tool handler

use std::sync::Arc;

use rmcp::ErrorData as McpError;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::CallToolResult;
use validator::Validate;

use cortex_application::CompletionOrchestrator;

use crate::args::AutocompleteAcceptArgs;
use crate::responses::ResponseFormatter;

/// Handler for the `autocomplete_accept` tool
pub struct AutocompleteAcceptHandler {
    completion: Arc<CompletionOrchestrator>,
}

impl AutocompleteAcceptHandler {
    /// Create a new `autocomplete_accept` handler
    pub fn new(completion: Arc<CompletionOrchestrator>) -> Self {
        Self { completion }
    }

    /// Handle the `autocomplete_accept` tool request
    pub async fn handle(&self, Parameters(args): Parameters<AutocompleteAcceptArgs>) -> Result<CallToolResult, McpError> {
        if let Err(e) = args.validate() {
            return Err(McpError::invalid_params(format!("Invalid arguments: {e}"), None));
        }

        self.completion.accept(&args.completion_id);
        Ok(ResponseFormatter::format_accept_ack(&args.completion_id))
    }
}
