//! Tool Registry Module
//!
//! Manages tool definitions and schema generation for the MCP protocol.
//! This module centralizes all tool metadata to enable consistent tool listing.

use rmcp::ErrorData as McpError;
use rmcp::model::Tool;
use std::borrow::Cow;
use std::sync::Arc;

use crate::args::{
    AbortArgs, AutocompleteAcceptArgs, AutocompleteCancelArgs, AutocompleteCompleteArgs,
    FileEventArgs, IndexForceReindexArgs, IndexSetPausedArgs,
};

/// Tool definitions for MCP protocol
pub struct ToolDefinitions;

impl ToolDefinitions {
    /// Get the `index_force_reindex` tool definition
    pub fn index_force_reindex() -> Result<Tool, McpError> {
        Self::create_tool(
            "index_force_reindex",
            "Re-walk the given directories (or the workspace root) and refresh every configured index",
            schemars::schema_for!(IndexForceReindexArgs),
        )
    }

    /// Get the `index_set_paused` tool definition
    pub fn index_set_paused() -> Result<Tool, McpError> {
        Self::create_tool(
            "index_set_paused",
            "Pause or resume in-flight and future indexing runs",
            schemars::schema_for!(IndexSetPausedArgs),
        )
    }

    /// Get the `autocomplete_complete` tool definition
    pub fn autocomplete_complete() -> Result<Tool, McpError> {
        Self::create_tool(
            "autocomplete_complete",
            "Request a streaming autocomplete suggestion at a cursor position",
            schemars::schema_for!(AutocompleteCompleteArgs),
        )
    }

    /// Get the `autocomplete_accept` tool definition
    pub fn autocomplete_accept() -> Result<Tool, McpError> {
        Self::create_tool(
            "autocomplete_accept",
            "Record that a displayed completion was accepted",
            schemars::schema_for!(AutocompleteAcceptArgs),
        )
    }

    /// Get the `autocomplete_cancel` tool definition
    pub fn autocomplete_cancel() -> Result<Tool, McpError> {
        Self::create_tool(
            "autocomplete_cancel",
            "Cancel an in-flight or displayed completion request",
            schemars::schema_for!(AutocompleteCancelArgs),
        )
    }

    /// Get the `files_changed` tool definition
    pub fn files_changed() -> Result<Tool, McpError> {
        Self::create_tool(
            "files_changed",
            "Notify the index that the given files were modified",
            schemars::schema_for!(FileEventArgs),
        )
    }

    /// Get the `files_created` tool definition
    pub fn files_created() -> Result<Tool, McpError> {
        Self::create_tool(
            "files_created",
            "Notify the index that the given files were created",
            schemars::schema_for!(FileEventArgs),
        )
    }

    /// Get the `files_deleted` tool definition
    pub fn files_deleted() -> Result<Tool, McpError> {
        Self::create_tool(
            "files_deleted",
            "Notify the index that the given files were deleted",
            schemars::schema_for!(FileEventArgs),
        )
    }

    /// Get the `files_closed` tool definition
    pub fn files_closed() -> Result<Tool, McpError> {
        Self::create_tool(
            "files_closed",
            "Notify the index that the given files were closed in the editor",
            schemars::schema_for!(FileEventArgs),
        )
    }

    /// Get the `files_opened` tool definition
    pub fn files_opened() -> Result<Tool, McpError> {
        Self::create_tool(
            "files_opened",
            "Notify the index that the given files were opened in the editor",
            schemars::schema_for!(FileEventArgs),
        )
    }

    /// Get the `abort` tool definition
    pub fn abort() -> Result<Tool, McpError> {
        Self::create_tool(
            "abort",
            "Cooperatively cancel a registered long-running operation",
            schemars::schema_for!(AbortArgs),
        )
    }

    /// Create a tool from schema
    fn create_tool(
        name: &'static str,
        description: &'static str,
        schema: schemars::Schema,
    ) -> Result<Tool, McpError> {
        let schema_value = serde_json::to_value(schema)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;

        let input_schema = schema_value
            .as_object()
            .ok_or_else(|| {
                McpError::internal_error(format!("Schema for {} is not an object", name), None)
            })?
            .clone();

        Ok(Tool {
            name: Cow::Borrowed(name),
            title: None,
            description: Some(Cow::Borrowed(description)),
            input_schema: Arc::new(input_schema),
            output_schema: None,
            annotations: None,
            icons: None,
            meta: Default::default(),
        })
    }
}

/// Create the complete list of available tools
///
/// Returns all tool definitions for the MCP list_tools response.
pub fn create_tool_list() -> Result<Vec<Tool>, McpError> {
    Ok(vec![
        ToolDefinitions::index_force_reindex()?,
        ToolDefinitions::index_set_paused()?,
        ToolDefinitions::autocomplete_complete()?,
        ToolDefinitions::autocomplete_accept()?,
        ToolDefinitions::autocomplete_cancel()?,
        ToolDefinitions::files_changed()?,
        ToolDefinitions::files_created()?,
        ToolDefinitions::files_deleted()?,
        ToolDefinitions::files_closed()?,
        ToolDefinitions::files_opened()?,
        ToolDefinitions::abort()?,
    ])
}
