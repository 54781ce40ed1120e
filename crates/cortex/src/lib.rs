//! # Cortex
//!
//! An incremental multi-index engine and autocomplete streaming pipeline for
//! an IDE assistant, exposed as an MCP server over stdio.
//!
//! This crate is the public facade: it re-exports the domain, infrastructure
//! and server layers so downstream code and the `cortex` binary can depend on
//! one crate.
//!
//! ## Features
//!
//! - **Incremental indexing**: chunk, vector, full-text and snippet indexes kept
//!   in sync with the workspace via per-artifact refresh planning
//! - **Streaming autocomplete**: snippet collection, prompt rendering and a
//!   two-stage filter pipeline feeding a display/accept/reject lifecycle
//! - **Pluggable providers**: catalog, embedding, vector store and completion
//!   model backends selected by configuration
//!
//! ## Example
//!
//! ```no_run
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! cortex::run_server(None).await
//! # }
//! ```
//!
//! ## Architecture
//!
//! The codebase follows Clean Architecture principles:
//!
//! - `domain` - Core business logic and types (ports, entities, domain errors)
//! - `infrastructure` - Configuration, logging, and the composition root
//! - `server` - MCP protocol server, tool handlers, and the stdio transport

/// Domain layer - core business logic and types
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use cortex_domain::*;
}

/// Server layer - MCP protocol server and handlers
///
/// Re-exports from the server crate for convenience
pub mod server {
    pub use cortex_server::*;
}

/// Infrastructure layer - DI, config, and infrastructure services
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use cortex_infrastructure::*;
}

// Re-export commonly used domain types at the crate root
pub use domain::*;

// Re-export main entry point at the crate root
pub use server::run_server;

// Re-export server types for convenience
pub use server::{McpServer, McpServerBuilder};
