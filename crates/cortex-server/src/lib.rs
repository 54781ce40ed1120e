// Clippy allows for complex patterns in server code
#![allow(clippy::io_other_error)]
#![allow(clippy::for_kv_map)]
#![allow(clippy::while_let_loop)]

//! # Cortex Server
//!
//! Tool transport and protocol layer for the incremental multi-index engine
//! and autocomplete streaming pipeline. Exposes indexing and completion
//! operations as MCP tools over stdio; depends on the domain and
//! infrastructure layers but is independent of specific provider
//! implementations.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cortex_server::run_server;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     run_server(None).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Core Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`McpServer`] | Main server struct |
//! | [`McpServerBuilder`] | Builder for server construction |

// Documentation configuration for docs.rs
#![cfg_attr(docsrs, feature(doc_cfg))]

/// Tool argument types, validated at the MCP boundary.
pub mod args;

/// Builder for constructing [`McpServer`] from an application context.
pub mod builder;

/// Fixed values the server layer needs and no port currently supplies.
pub mod constants;

/// Real filesystem-backed stat/read callbacks for the indexer orchestrator.
pub mod fs;

/// Tool call handlers: translate MCP requests into application calls.
pub mod handlers;

/// Server startup: config load, logging init, composition root, transport.
pub mod init;

/// Core MCP protocol server.
pub mod mcp_server;

/// Markdown-formatted MCP tool responses.
pub mod responses;

/// Tool definitions and dispatch.
pub mod tools;

/// Stdio transport.
pub mod transport;

pub use builder::McpServerBuilder;
pub use init::run_server;
pub use mcp_server::McpServer;
