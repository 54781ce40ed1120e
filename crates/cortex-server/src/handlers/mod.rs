//! MCP tool handlers
//!
//! Each handler translates one MCP tool call into a call against the
//! application layer and formats the result as a tool response.

pub mod abort;
pub mod autocomplete_accept;
pub mod autocomplete_cancel;
pub mod autocomplete_complete;
pub mod file_events;
pub mod index_force_reindex;
pub mod index_set_paused;

pub use abort::AbortHandler;
pub use autocomplete_accept::AutocompleteAcceptHandler;
pub use autocomplete_cancel::AutocompleteCancelHandler;
pub use autocomplete_complete::AutocompleteCompleteHandler;
pub use file_events::{FileEventHandler, FileEventKind};
pub use index_force_reindex::IndexForceReindexHandler;
pub use index_set_paused::IndexSetPausedHandler;
