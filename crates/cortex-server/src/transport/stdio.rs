//! Stdio transport for MCP
//!
//! Serves the MCP protocol over standard input/output — the transport used
//! by IDE integrations that spawn this process as a child.

use crate::McpServer;
use rmcp::ServiceExt;
use rmcp::transport::stdio;
use tracing::info;

/// Extension trait adding stdio serving to [`McpServer`].
pub trait StdioServerExt {
    /// Serve the MCP server over stdio until the client disconnects.
    async fn serve_stdio(self) -> Result<(), Box<dyn std::error::Error>>;
}

impl StdioServerExt for McpServer {
    async fn serve_stdio(self) -> Result<(), Box<dyn std::error::Error>> {
        info!("starting MCP server on stdio transport");

        let service = self
            .serve(stdio())
            .await
            .map_err(|e| format!("failed to start MCP service: {:?}", e))?;

        service
            .waiting()
            .await
            .map_err(|e| format!("MCP service error: {:?}", e))?;

        info!("MCP server shutdown complete");
        Ok(())
    }
}
