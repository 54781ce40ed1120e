//! Tool argument types for the MCP server
//!
//! One type per tool call accepted from the editor (§6 of the external
//! interface): indexing control, the autocomplete lifecycle, file-event
//! notifications and cooperative cancellation.

use schemars::JsonSchema;
use serde::Deserialize;
use validator::Validate;

fn default_true() -> bool {
    true
}

/// Arguments for `index_force_reindex`
#[derive(Debug, Deserialize, JsonSchema, Validate)]
#[schemars(description = "Re-walk the given directories (or the workspace root) and refresh every configured index")]
pub struct IndexForceReindexArgs {
    /// Directories to reindex; defaults to the current working directory
    #[schemars(description = "Absolute paths to reindex; omit to reindex the current working directory")]
    pub dirs: Option<Vec<String>>,
    /// Delete the catalog and vector store first, forcing a full rebuild
    #[schemars(description = "Clear the catalog and vector store before reindexing")]
    pub should_clear_indexes: Option<bool>,
}

/// Arguments for `index_set_paused`
#[derive(Debug, Deserialize, JsonSchema, Validate)]
#[schemars(description = "Pause or resume in-flight and future indexing runs")]
pub struct IndexSetPausedArgs {
    /// True to pause, false to resume
    #[schemars(description = "Whether indexing should be paused")]
    pub paused: bool,
}

/// Arguments for `autocomplete_complete`
///
/// The bespoke IDE transport that would normally supply the live buffer
/// (goto-definition, clipboard, diff) is out of scope; `prefix`/`suffix` are
/// accepted directly from the caller instead of being derived from a
/// `read_range` call into a concrete editor collaborator.
#[derive(Debug, Deserialize, JsonSchema, Validate)]
#[schemars(description = "Request a streaming autocomplete suggestion at a cursor position")]
pub struct AutocompleteCompleteArgs {
    /// Caller-assigned id correlating this request with its accept/cancel calls
    #[validate(length(min = 1, message = "request_id cannot be empty"))]
    #[schemars(description = "Unique id for this completion request")]
    pub request_id: String,
    /// File the cursor is in
    #[validate(length(min = 1, message = "filepath cannot be empty"))]
    #[validate(custom(function = "validate_file_path", message = "Invalid file path"))]
    #[schemars(description = "Path or URI of the file being edited")]
    pub filepath: String,
    /// Text before the cursor
    #[schemars(description = "File content before the cursor")]
    pub prefix: String,
    /// Text after the cursor
    #[schemars(description = "File content after the cursor")]
    pub suffix: String,
    /// 0-based line number
    #[schemars(description = "0-based cursor line")]
    pub line: u32,
    /// 0-based column
    #[schemars(description = "0-based cursor character offset")]
    pub character: u32,
    /// Language identifier (file extension or editor language id)
    #[schemars(description = "Language hint, e.g. \"rust\" or \"py\"")]
    pub language: Option<String>,
    /// Recently-edited ranges, most recent first
    #[serde(default)]
    #[schemars(description = "Snippets from ranges recently edited in the workspace")]
    pub recently_edited_ranges: Vec<String>,
    /// Recently-visited ranges, most recent first
    #[serde(default)]
    #[schemars(description = "Snippets from ranges recently visited in the workspace")]
    pub recently_visited_ranges: Vec<String>,
    /// Clipboard contents, if any
    #[serde(default)]
    #[schemars(description = "Current clipboard text, if available")]
    pub clipboard: Vec<String>,
    /// Overrides the caret-window prefix the orchestrator would otherwise derive
    #[schemars(description = "Explicit prefix override for manually-triggered completion")]
    pub manually_pass_prefix: Option<String>,
    /// True when the editor's own suggestion widget is already open
    #[serde(default)]
    #[schemars(description = "Whether the editor's native suggestion widget is visible")]
    pub selected_completion_info_present: bool,
    /// Repository name, used for template selection and prompt context
    #[schemars(description = "Repository name, if known")]
    pub reponame: Option<String>,
}

/// Arguments for `autocomplete_accept`
#[derive(Debug, Deserialize, JsonSchema, Validate)]
#[schemars(description = "Record that a displayed completion was accepted")]
pub struct AutocompleteAcceptArgs {
    /// The `request_id` of the completion being accepted
    #[validate(length(min = 1, message = "completion_id cannot be empty"))]
    #[schemars(description = "Id of the completion to accept")]
    pub completion_id: String,
}

/// Arguments for `autocomplete_cancel`
#[derive(Debug, Deserialize, JsonSchema, Validate)]
#[schemars(description = "Cancel an in-flight or displayed completion request")]
pub struct AutocompleteCancelArgs {
    /// The `request_id` of the completion being cancelled
    #[validate(length(min = 1, message = "request_id cannot be empty"))]
    #[schemars(description = "Id of the completion request to cancel")]
    pub request_id: String,
}

/// Shared arguments for `files_changed`, `files_created`, `files_deleted`,
/// `files_closed` and `files_opened`
#[derive(Debug, Deserialize, JsonSchema, Validate)]
#[schemars(description = "Notify the index of file lifecycle events")]
pub struct FileEventArgs {
    /// Affected file paths or URIs
    #[validate(length(min = 1, message = "uris cannot be empty"))]
    #[schemars(description = "Paths or URIs of the affected files")]
    pub uris: Vec<String>,
    /// Reindex immediately rather than waiting for the next debounce window
    #[serde(default = "default_true")]
    #[schemars(description = "Reindex the affected files immediately")]
    pub refresh_now: bool,
}

/// Arguments for `abort`
#[derive(Debug, Deserialize, JsonSchema, Validate)]
#[schemars(description = "Cooperatively cancel a registered long-running operation")]
pub struct AbortArgs {
    /// Id previously returned by a streaming operation
    #[validate(length(min = 1, message = "message_id cannot be empty"))]
    #[schemars(description = "Id of the operation to cancel")]
    pub message_id: String,
}

fn validate_file_path(path: &str) -> Result<(), validator::ValidationError> {
    if path.contains("..") {
        return Err(validator::ValidationError::new("path cannot contain directory traversal"));
    }
    Ok(())
}
