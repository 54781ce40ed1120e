//! Tool Router Module
//!
//! Routes incoming tool call requests to the appropriate handlers.
//! This module provides a centralized dispatch mechanism for MCP tool calls.

use rmcp::ErrorData as McpError;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolRequestParam, CallToolResult};
use std::sync::Arc;

use crate::args::{
    AbortArgs, AutocompleteAcceptArgs, AutocompleteCancelArgs, AutocompleteCompleteArgs,
    FileEventArgs, IndexForceReindexArgs, IndexSetPausedArgs,
};
use crate::handlers::{
    AbortHandler, AutocompleteAcceptHandler, AutocompleteCancelHandler, AutocompleteCompleteHandler,
    FileEventHandler, IndexForceReindexHandler, IndexSetPausedHandler,
};

/// Handler references for tool routing
pub struct ToolHandlers {
    /// Handler for `index_force_reindex`
    pub index_force_reindex: Arc<IndexForceReindexHandler>,
    /// Handler for `index_set_paused`
    pub index_set_paused: Arc<IndexSetPausedHandler>,
    /// Handler for `autocomplete_complete`
    pub autocomplete_complete: Arc<AutocompleteCompleteHandler>,
    /// Handler for `autocomplete_accept`
    pub autocomplete_accept: Arc<AutocompleteAcceptHandler>,
    /// Handler for `autocomplete_cancel`
    pub autocomplete_cancel: Arc<AutocompleteCancelHandler>,
    /// Handler for `files_changed`
    pub files_changed: Arc<FileEventHandler>,
    /// Handler for `files_created`
    pub files_created: Arc<FileEventHandler>,
    /// Handler for `files_deleted`
    pub files_deleted: Arc<FileEventHandler>,
    /// Handler for `files_closed`
    pub files_closed: Arc<FileEventHandler>,
    /// Handler for `files_opened`
    pub files_opened: Arc<FileEventHandler>,
    /// Handler for `abort`
    pub abort: Arc<AbortHandler>,
}

/// Route a tool call request to the appropriate handler
///
/// Parses the request arguments and delegates to the matching handler.
pub async fn route_tool_call(
    request: CallToolRequestParam,
    handlers: &ToolHandlers,
) -> Result<CallToolResult, McpError> {
    match request.name.as_ref() {
        "index_force_reindex" => {
            let args = parse_args::<IndexForceReindexArgs>(&request)?;
            handlers.index_force_reindex.handle(Parameters(args)).await
        }
        "index_set_paused" => {
            let args = parse_args::<IndexSetPausedArgs>(&request)?;
            handlers.index_set_paused.handle(Parameters(args)).await
        }
        "autocomplete_complete" => {
            let args = parse_args::<AutocompleteCompleteArgs>(&request)?;
            handlers.autocomplete_complete.handle(Parameters(args)).await
        }
        "autocomplete_accept" => {
            let args = parse_args::<AutocompleteAcceptArgs>(&request)?;
            handlers.autocomplete_accept.handle(Parameters(args)).await
        }
        "autocomplete_cancel" => {
            let args = parse_args::<AutocompleteCancelArgs>(&request)?;
            handlers.autocomplete_cancel.handle(Parameters(args)).await
        }
        "files_changed" => {
            let args = parse_args::<FileEventArgs>(&request)?;
            handlers.files_changed.handle(Parameters(args)).await
        }
        "files_created" => {
            let args = parse_args::<FileEventArgs>(&request)?;
            handlers.files_created.handle(Parameters(args)).await
        }
        "files_deleted" => {
            let args = parse_args::<FileEventArgs>(&request)?;
            handlers.files_deleted.handle(Parameters(args)).await
        }
        "files_closed" => {
            let args = parse_args::<FileEventArgs>(&request)?;
            handlers.files_closed.handle(Parameters(args)).await
        }
        "files_opened" => {
            let args = parse_args::<FileEventArgs>(&request)?;
            handlers.files_opened.handle(Parameters(args)).await
        }
        "abort" => {
            let args = parse_args::<AbortArgs>(&request)?;
            handlers.abort.handle(Parameters(args)).await
        }
        _ => Err(McpError::invalid_params(
            format!("Unknown tool: {}", request.name),
            None,
        )),
    }
}

/// Parse request arguments into the expected type
fn parse_args<T: serde::de::DeserializeOwned>(
    request: &CallToolRequestParam,
) -> Result<T, McpError> {
    let args_value = serde_json::Value::Object(request.arguments.clone().unwrap_or_default());
    serde_json::from_value(args_value)
        .map_err(|e| McpError::invalid_params(format!("Invalid arguments: {}", e), None))
}
