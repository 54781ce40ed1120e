//! MCP Server Implementation
//!
//! Core MCP protocol server exposing the indexing engine and autocomplete
//! pipeline as MCP tools over stdio. Holds one handler per tool, each built
//! from the shared application context at construction time.

use std::sync::Arc;

use rmcp::ErrorData as McpError;
use rmcp::ServerHandler;
use rmcp::model::{
    CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
    ServerCapabilities, ServerInfo,
};

use cortex_infrastructure::di::bootstrap::AppContext;

use crate::handlers::{
    AbortHandler, AutocompleteAcceptHandler, AutocompleteCancelHandler, AutocompleteCompleteHandler,
    FileEventHandler, FileEventKind, IndexForceReindexHandler, IndexSetPausedHandler,
};
use crate::tools::{ToolHandlers, create_tool_list, route_tool_call};

/// Core MCP server implementation
///
/// Receives every long-lived dependency through the application context
/// built once at process start; tool handlers are constructed here and
/// reused across every call.
#[derive(Clone)]
pub struct McpServer {
    index_force_reindex: Arc<IndexForceReindexHandler>,
    index_set_paused: Arc<IndexSetPausedHandler>,
    autocomplete_complete: Arc<AutocompleteCompleteHandler>,
    autocomplete_accept: Arc<AutocompleteAcceptHandler>,
    autocomplete_cancel: Arc<AutocompleteCancelHandler>,
    files_changed: Arc<FileEventHandler>,
    files_created: Arc<FileEventHandler>,
    files_deleted: Arc<FileEventHandler>,
    files_closed: Arc<FileEventHandler>,
    files_opened: Arc<FileEventHandler>,
    abort: Arc<AbortHandler>,
}

impl McpServer {
    /// Build every tool handler from a shared application context
    pub fn new(ctx: &AppContext) -> Self {
        Self {
            index_force_reindex: Arc::new(IndexForceReindexHandler::new(
                Arc::clone(&ctx.indexer),
                Arc::clone(&ctx.abort_registry),
                ctx.config.clone(),
                Arc::clone(&ctx.pause),
            )),
            index_set_paused: Arc::new(IndexSetPausedHandler::new(Arc::clone(&ctx.pause))),
            autocomplete_complete: Arc::new(AutocompleteCompleteHandler::new(Arc::clone(&ctx.completion))),
            autocomplete_accept: Arc::new(AutocompleteAcceptHandler::new(Arc::clone(&ctx.completion))),
            autocomplete_cancel: Arc::new(AutocompleteCancelHandler::new(Arc::clone(&ctx.abort_registry))),
            files_changed: Arc::new(FileEventHandler::new(Arc::clone(&ctx.indexer), FileEventKind::Changed)),
            files_created: Arc::new(FileEventHandler::new(Arc::clone(&ctx.indexer), FileEventKind::Created)),
            files_deleted: Arc::new(FileEventHandler::new(Arc::clone(&ctx.indexer), FileEventKind::Deleted)),
            files_closed: Arc::new(FileEventHandler::new(Arc::clone(&ctx.indexer), FileEventKind::Closed)),
            files_opened: Arc::new(FileEventHandler::new(Arc::clone(&ctx.indexer), FileEventKind::Opened)),
            abort: Arc::new(AbortHandler::new(Arc::clone(&ctx.abort_registry))),
        }
    }
}

impl ServerHandler for McpServer {
    /// Get server information and capabilities
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "Cortex".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(
                "Cortex - incremental code index and autocomplete engine\n\n\
                 Tools:\n\
                 - index_force_reindex: re-walk directories and refresh every index\n\
                 - index_set_paused: pause or resume indexing\n\
                 - autocomplete_complete: request a completion at a cursor position\n\
                 - autocomplete_accept / autocomplete_cancel: report completion outcome\n\
                 - files_changed / files_created / files_deleted / files_closed / files_opened: file lifecycle notifications\n\
                 - abort: cancel a registered long-running operation\n"
                    .to_string(),
            ),
        }
    }

    /// List available tools
    async fn list_tools(
        &self,
        _pagination: Option<PaginatedRequestParam>,
        _context: rmcp::service::RequestContext<rmcp::RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        let tools = create_tool_list()?;
        Ok(ListToolsResult {
            tools,
            meta: Default::default(),
            next_cursor: None,
        })
    }

    /// Call a tool
    async fn call_tool(
        &self,
        request: rmcp::model::CallToolRequestParam,
        _context: rmcp::service::RequestContext<rmcp::RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let handlers = ToolHandlers {
            index_force_reindex: Arc::clone(&self.index_force_reindex),
            index_set_paused: Arc::clone(&self.index_set_paused),
            autocomplete_complete: Arc::clone(&self.autocomplete_complete),
            autocomplete_accept: Arc::clone(&self.autocomplete_accept),
            autocomplete_cancel: Arc::clone(&self.autocomplete_cancel),
            files_changed: Arc::clone(&self.files_changed),
            files_created: Arc::clone(&self.files_created),
            files_deleted: Arc::clone(&self.files_deleted),
            files_closed: Arc::clone(&self.files_closed),
            files_opened: Arc::clone(&self.files_opened),
            abort: Arc::clone(&self.abort),
        };
        route_tool_call(request, &handlers).await
    }
}
