//! Handlers for `files_changed`, `files_created`, `files_deleted`,
//! `files_closed` and `files_opened`
//!
//! All five share one argument shape (`uris` + `refresh_now`). `changed`,
//! `created` and `deleted` refresh the affected files immediately when
//! `refresh_now` is set; `refresh_files` already treats a file that no
//! longer stats as deleted from the index, so one code path covers all
//! three. `closed`/`opened` are pure editor-lifecycle notifications with no
//! index-affecting content change, so they only acknowledge.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use futures::StreamExt;
use rmcp::ErrorData as McpError;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::CallToolResult;
use validator::Validate;

use cortex_application::indexer::IndexerOrchestrator;

use crate::args::FileEventArgs;
use crate::constants::default_branch;
use crate::fs::{real_read_file, real_stat_file};
use crate::responses::ResponseFormatter;

/// Which of the five file lifecycle tools this call represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileEventKind {
    Changed,
    Created,
    Deleted,
    Closed,
    Opened,
}

impl FileEventKind {
    fn label(self) -> &'static str {
        match self {
            FileEventKind::Changed => "files_changed",
            FileEventKind::Created => "files_created",
            FileEventKind::Deleted => "files_deleted",
            FileEventKind::Closed => "files_closed",
            FileEventKind::Opened => "files_opened",
        }
    }

    fn triggers_refresh(self) -> bool {
        matches!(self, FileEventKind::Changed | FileEventKind::Created | FileEventKind::Deleted)
    }
}

/// Handler shared by the five file lifecycle tools, parameterized by kind.
pub struct FileEventHandler {
    indexer: Arc<IndexerOrchestrator>,
    kind: FileEventKind,
}

impl FileEventHandler {
    /// Create a new file lifecycle handler for the given event kind
    pub fn new(indexer: Arc<IndexerOrchestrator>, kind: FileEventKind) -> Self {
        Self { indexer, kind }
    }

    /// Handle a file lifecycle tool request
    pub async fn handle(&self, Parameters(args): Parameters<FileEventArgs>) -> Result<CallToolResult, McpError> {
        if let Err(e) = args.validate() {
            return Err(McpError::invalid_params(format!("Invalid arguments: {e}"), None));
        }

        let count = args.uris.len();

        if self.kind.triggers_refresh() && args.refresh_now {
            for (directory, files) in group_by_parent(&args.uris) {
                let mut stream = Arc::clone(&self.indexer).refresh_files(
                    files,
                    directory,
                    default_branch(),
                    real_stat_file(),
                    real_read_file(),
                );
                while stream.next().await.is_some() {}
            }
        }

        Ok(ResponseFormatter::format_file_event_ack(self.kind.label(), count))
    }
}

fn group_by_parent(uris: &[String]) -> BTreeMap<String, Vec<PathBuf>> {
    let mut groups: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
    for uri in uris {
        let path = PathBuf::from(uri);
        let directory = path
            .parent()
            .map(|p| p.to_string_lossy().to_string())
            .unwrap_or_default();
        groups.entry(directory).or_default().push(path);
    }
    groups
}
