//! MCP Transport Layer
//!
//! Stdio is the only transport this server exposes: the editor integration
//! this server targets drives it as a subprocess over stdin/stdout.

pub mod stdio;

pub use stdio::StdioServerExt;
