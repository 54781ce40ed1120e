//! Response formatting utilities for MCP server
//!
//! Formats tool responses in a consistent, user-friendly way: progress
//! summaries, completion results and error messages.

use rmcp::model::{CallToolResult, Content};

use cortex_application::Completion;
use cortex_domain::entities::{IndexingStatus, ProgressUpdate};

/// Response formatter for MCP server tools
pub struct ResponseFormatter;

impl ResponseFormatter {
    /// Format the final progress update of a `refresh_dirs`/`refresh_files` run.
    pub fn format_index_result(update: &ProgressUpdate, duration: std::time::Duration) -> CallToolResult {
        let message = match update.status {
            IndexingStatus::Done => format!(
                "✅ **Indexing Completed**\n\n**Duration:** {:.2}s",
                duration.as_secs_f64()
            ),
            IndexingStatus::Cancelled => "⏹️ **Indexing Cancelled**".to_string(),
            IndexingStatus::Failed => format!(
                "❌ **Indexing Failed**\n\n**Error:** {}\n**Clear indexes recommended:** {}",
                update.error_message.as_deref().unwrap_or("unknown error"),
                update.should_clear_indexes.unwrap_or(false)
            ),
            _ => format!("**Indexing status:** {:?} ({:.0}%)", update.status, update.fraction * 100.0),
        };
        tracing::info!(status = ?update.status, duration = ?duration, "indexing run finished");
        CallToolResult::success(vec![Content::text(message)])
    }

    /// Format the acknowledgement for `index_set_paused`.
    pub fn format_pause_ack(paused: bool) -> CallToolResult {
        let message = if paused {
            "⏸️ Indexing paused.".to_string()
        } else {
            "▶️ Indexing resumed.".to_string()
        };
        CallToolResult::success(vec![Content::text(message)])
    }

    /// Format the result of `autocomplete_complete`: an empty array when no
    /// completion was produced (debounced, disabled, filtered to nothing).
    pub fn format_completion(completion: Option<&Completion>) -> CallToolResult {
        let texts: Vec<String> = completion.map(|c| vec![c.text.clone()]).unwrap_or_default();
        let json = serde_json::to_string(&texts).unwrap_or_else(|_| "[]".to_string());
        CallToolResult::success(vec![Content::text(json)])
    }

    /// Format the acknowledgement for `autocomplete_accept`.
    pub fn format_accept_ack(completion_id: &str) -> CallToolResult {
        CallToolResult::success(vec![Content::text(format!("accepted {completion_id}"))])
    }

    /// Format the acknowledgement for `autocomplete_cancel`.
    pub fn format_cancel_ack(request_id: &str) -> CallToolResult {
        CallToolResult::success(vec![Content::text(format!("cancelled {request_id}"))])
    }

    /// Format the acknowledgement for a file lifecycle event tool.
    pub fn format_file_event_ack(kind: &str, count: usize) -> CallToolResult {
        CallToolResult::success(vec![Content::text(format!("{kind}: acknowledged {count} file(s)"))])
    }

    /// Format the acknowledgement for `abort`.
    pub fn format_abort_ack(message_id: &str) -> CallToolResult {
        CallToolResult::success(vec![Content::text(format!("aborted {message_id}"))])
    }

    /// Format a generic tool error.
    pub fn format_error(error: &str) -> CallToolResult {
        tracing::error!(error, "tool call failed");
        CallToolResult::success(vec![Content::text(format!("❌ Error: {error}"))])
    }
}
