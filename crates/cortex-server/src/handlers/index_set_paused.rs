//! `index_set_paused` tool handler

use std::sync::atomic::Ordering;

use rmcp::ErrorData as McpError;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::CallToolResult;
use validator::Validate;

use cortex_application::indexer::PauseFlag;

use crate::args::IndexSetPausedArgs;
use crate::responses::ResponseFormatter;

/// Handler for the `index_set_paused` tool
pub struct IndexSetPausedHandler {
    pause: PauseFlag,
}

impl IndexSetPausedHandler {
    /// Create a new `index_set_paused` handler
    pub fn new(pause: PauseFlag) -> Self {
        Self { pause }
    }

    /// Handle the `index_set_paused` tool request
    pub async fn handle(&self, Parameters(args): Parameters<IndexSetPausedArgs>) -> Result<CallToolResult, McpError> {
        if let Err(e) = args.validate() {
            return Err(McpError::invalid_params(format!("Invalid arguments: {e}"), None));
        }

        self.pause.store(args.paused, Ordering::SeqCst);
        Ok(ResponseFormatter::format_pause_ack(args.paused))
    }
}
