//! MCP Server Builder
//!
//! Builder pattern for constructing an [`McpServer`] from an application
//! context. The context already bundles every provider and orchestrator the
//! server needs, so the builder's only job is making its presence explicit
//! and testable before construction.

use crate::McpServer;
use cortex_infrastructure::di::bootstrap::AppContext;

/// Builder for [`McpServer`]
#[derive(Default)]
pub struct McpServerBuilder {
    context: Option<AppContext>,
}

impl McpServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the application context the server will be built from
    pub fn with_context(mut self, context: AppContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Build the MCP server
    ///
    /// # Errors
    /// Returns [`BuilderError::MissingDependency`] if no context was provided
    pub fn build(self) -> Result<McpServer, BuilderError> {
        self.try_build()
    }

    /// Try to build the MCP server (alias for `build`)
    pub fn try_build(self) -> Result<McpServer, BuilderError> {
        let context = self.context.ok_or(BuilderError::MissingDependency("application context"))?;
        Ok(McpServer::new(&context))
    }
}

/// Errors that can occur during server building
#[derive(Debug, thiserror::Error)]
pub enum BuilderError {
    /// A required dependency was not provided
    #[error("Missing required dependency: {0}")]
    MissingDependency(&'static str),
}
