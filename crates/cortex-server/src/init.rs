//! Server Initialization
//!
//! Handles server startup: configuration loading, structured logging, the
//! composition root, and the stdio transport loop.
//!
//! Transport is stdio only: the editor integration this server targets
//! drives it as a subprocess over stdin/stdout, the same way the MCP
//! protocol's reference clients do. There is no HTTP or daemon mode.

use std::path::Path;

use tracing::info;

use crate::McpServerBuilder;
use crate::transport::stdio::StdioServerExt;

/// Run the server: load configuration, initialize logging, build the
/// application context, and serve tool calls over stdio until the client
/// disconnects.
pub async fn run_server(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    let _logging_guard = cortex_infrastructure::logging::init(&config.logging)?;

    info!("starting cortex server");

    let context = cortex_infrastructure::di::bootstrap::build(config)?;
    let server = McpServerBuilder::new().with_context(context).try_build()?;

    info!("cortex server initialized, serving over stdio");
    server.serve_stdio().await
}

/// Load configuration from an optional path, falling back to defaults and
/// environment overrides when none is given.
fn load_config(
    config_path: Option<&Path>,
) -> Result<cortex_infrastructure::config::AppConfig, Box<dyn std::error::Error>> {
    let loader = match config_path {
        Some(path) => cortex_infrastructure::config::ConfigLoader::new().with_config_path(path),
        None => cortex_infrastructure::config::ConfigLoader::new(),
    };
    Ok(loader.load()?)
}
