//! `index_force_reindex` tool handler

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use futures::StreamExt;
use rmcp::ErrorData as McpError;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::CallToolResult;
use uuid::Uuid;
use validator::Validate;

use cortex_application::indexer::{clear_indexes, IndexerOrchestrator, PauseFlag};
use cortex_application::AbortRegistry;
use cortex_domain::entities::IndexingStatus;
use cortex_infrastructure::config::AppConfig;

use crate::args::IndexForceReindexArgs;
use crate::constants::default_branch;
use crate::fs::{real_read_file, real_stat_file};
use crate::responses::ResponseFormatter;

/// Handler for the `index_force_reindex` tool
pub struct IndexForceReindexHandler {
    indexer: Arc<IndexerOrchestrator>,
    abort_registry: Arc<AbortRegistry>,
    config: AppConfig,
    pause: PauseFlag,
}

impl IndexForceReindexHandler {
    /// Create a new `index_force_reindex` handler
    pub fn new(indexer: Arc<IndexerOrchestrator>, abort_registry: Arc<AbortRegistry>, config: AppConfig, pause: PauseFlag) -> Self {
        Self { indexer, abort_registry, config, pause }
    }

    /// Handle the `index_force_reindex` tool request
    pub async fn handle(&self, Parameters(args): Parameters<IndexForceReindexArgs>) -> Result<CallToolResult, McpError> {
        if let Err(e) = args.validate() {
            return Err(McpError::invalid_params(format!("Invalid arguments: {e}"), None));
        }

        if args.should_clear_indexes.unwrap_or(false) {
            let vector_store_dir = self.config.vector_store.path.clone().unwrap_or_else(|| PathBuf::from("./data/vectors"));
            clear_indexes(&self.config.catalog.path, &vector_store_dir).await;
        }

        let dirs: Vec<PathBuf> = match &args.dirs {
            Some(dirs) if !dirs.is_empty() => dirs.iter().map(PathBuf::from).collect(),
            _ => vec![std::env::current_dir().map_err(|e| McpError::internal_error(e.to_string(), None))?],
        };

        let message_id = Uuid::new_v4().to_string();
        let cancel = self.abort_registry.register(message_id.clone());
        let timer = Instant::now();

        let mut stream = Arc::clone(&self.indexer).refresh_dirs(
            dirs,
            default_branch(),
            cancel,
            Arc::clone(&self.pause),
            real_stat_file(),
            real_read_file(),
        );

        let mut last = None;
        while let Some(update) = stream.next().await {
            if matches!(update.status, IndexingStatus::Failed | IndexingStatus::Cancelled | IndexingStatus::Done) {
                last = Some(update);
                break;
            }
        }
        self.abort_registry.complete(&message_id);

        Ok(ResponseFormatter::format_index_result(
            &last.unwrap_or_else(cortex_domain::entities::ProgressUpdate::done),
            timer.elapsed(),
        ))
    }
}
