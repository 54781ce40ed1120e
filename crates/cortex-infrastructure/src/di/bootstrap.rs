//! Composition root
//!
//! Builds the concrete provider set selected by [`AppConfig`] and bundles the
//! resulting handles into an [`AppContext`] that the server crate holds for
//! the process lifetime. No service reads configuration from global state;
//! everything that needs it receives a reference at construction time here.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use cortex_application::completion::snippets::{ImportSnippetSource, InlineSnippetSource, RootPathSnippetSource};
use cortex_application::completion::SnippetSource;
use cortex_application::indexer::PauseFlag;
use cortex_application::{
    AbortRegistry, ArtifactIndex, Chunker, ChunkIndex, CompletionOrchestrator, CompletionSettings,
    FtsIndex, IndexerOrchestrator, InProcessMetrics, Metrics, RefreshPlanner, SmartChunker,
    SnippetsIndex, VectorIndex,
};
use cortex_domain::error::Result;
use cortex_domain::ports::providers::{CacheProvider, Catalog, CompletionModel, EmbeddingProvider, VectorStoreProvider};
use cortex_domain::ports::IdeContext;
use cortex_domain::repositories::{ChunkRepository, SearchRepository};
use cortex_providers::cache::{MokaCacheProvider, NullCacheProvider};
use cortex_providers::catalog::SqliteCatalog;
use cortex_providers::chunk_store::InMemoryChunkRepository;
use cortex_providers::completion_model::{NullCompletionModel, OpenAiCompletionModel};
use cortex_providers::embedding::{NullEmbeddingProvider, OllamaEmbeddingProvider, OpenAIEmbeddingProvider};
use cortex_providers::ide::NullIdeContext;
use cortex_providers::search::Bm25SearchRepository;
use cortex_providers::vector_store::{FilesystemVectorStoreProvider, InMemoryVectorStoreProvider};
use tracing::info;

use crate::config::{AppConfig, CompletionModelProviderKind, EmbeddingProviderKind, VectorStoreProviderKind};

/// Every long-lived handle the indexing core and completion pipeline need,
/// wired up once at process start.
pub struct AppContext {
    /// Durable catalog of what has already been indexed
    pub catalog: Arc<dyn Catalog>,
    /// Embedding provider selected by configuration
    pub embedding: Arc<dyn EmbeddingProvider>,
    /// Vector store provider selected by configuration
    pub vector_store: Arc<dyn VectorStoreProvider>,
    /// In-process LRU cache provider
    pub cache: Arc<dyn CacheProvider>,
    /// Chunk repository backing the chunk artifact
    pub chunk_repo: Arc<dyn ChunkRepository>,
    /// Full-text/hybrid search repository backing the FTS artifact
    pub search_repo: Arc<dyn SearchRepository>,
    /// Cooperative cancellation for in-flight refreshes
    pub abort_registry: Arc<AbortRegistry>,
    /// In-process counters for indexing and completion activity
    pub metrics: Arc<dyn Metrics>,
    /// Coordinates refresh planning and per-artifact indexes across directories
    pub indexer: Arc<IndexerOrchestrator>,
    /// Streaming autocomplete pipeline
    pub completion: Arc<CompletionOrchestrator>,
    /// Shared pause/resume toggle consulted by every refresh in flight
    pub pause: PauseFlag,
    /// The configuration this context was built from
    pub config: AppConfig,
}

/// Build an [`AppContext`] from configuration, constructing and wiring every
/// provider the configured `*_provider` kinds select.
pub fn build(config: AppConfig) -> Result<AppContext> {
    info!("building application context");

    let catalog = build_catalog(&config)?;
    let embedding = build_embedding(&config);
    let vector_store = build_vector_store(&config)?;
    let cache = build_cache(&config);
    let completion_model = build_completion_model(&config);
    let ide: Arc<dyn IdeContext> = Arc::new(NullIdeContext::new());
    let metrics: Arc<dyn Metrics> = Arc::new(InProcessMetrics::new());

    let chunk_repo: Arc<dyn ChunkRepository> = Arc::new(InMemoryChunkRepository::new());
    let snippets_repo: Arc<dyn ChunkRepository> = Arc::new(InMemoryChunkRepository::new());
    let search_repo: Arc<dyn SearchRepository> = Arc::new(Bm25SearchRepository::new(Some(Arc::clone(&vector_store))));
    let chunker: Arc<dyn Chunker> = Arc::new(SmartChunker::new());

    let max_chunk_size = config.indexing.chunking.max_chunk_size;
    let indexes = build_indexes(
        Arc::clone(&chunk_repo),
        Arc::clone(&snippets_repo),
        Arc::clone(&search_repo),
        Arc::clone(&chunker),
        Arc::clone(&embedding),
        Arc::clone(&vector_store),
        max_chunk_size,
    );

    let planner = Arc::new(RefreshPlanner::new(Arc::clone(&catalog), config.indexing.planner_read_concurrency));
    let indexer = Arc::new(IndexerOrchestrator::new(planner, indexes, config.indexing.files_per_batch));
    let abort_registry = Arc::new(AbortRegistry::new());
    let pause: PauseFlag = Arc::new(std::sync::atomic::AtomicBool::new(false));

    let sources = build_snippet_sources(Arc::clone(&ide));
    let completion = Arc::new(CompletionOrchestrator::new(
        completion_model,
        sources,
        Arc::clone(&metrics),
        completion_settings(&config),
    ));

    info!(
        embedding = embedding.provider_name(),
        vector_store = vector_store.provider_name(),
        cache = cache.provider_name(),
        "application context ready"
    );

    Ok(AppContext {
        catalog,
        embedding,
        vector_store,
        cache,
        chunk_repo,
        search_repo,
        abort_registry,
        metrics,
        indexer,
        completion,
        pause,
        config,
    })
}

fn build_catalog(config: &AppConfig) -> Result<Arc<dyn Catalog>> {
    let path: PathBuf = config.catalog.path.clone();
    let catalog = SqliteCatalog::open(&path, config.catalog.busy_timeout_ms)?;
    Ok(Arc::new(catalog))
}

fn build_embedding(config: &AppConfig) -> Arc<dyn EmbeddingProvider> {
    let timeout = Duration::from_secs(config.embedding.request_timeout_secs);
    match config.embedding.provider {
        EmbeddingProviderKind::Null => Arc::new(NullEmbeddingProvider::new()),
        EmbeddingProviderKind::Openai => Arc::new(OpenAIEmbeddingProvider::new(
            config.embedding.api_key.clone().unwrap_or_default(),
            config.embedding.base_url.clone(),
            config.embedding.model.clone(),
            timeout,
            reqwest::Client::new(),
        )),
        EmbeddingProviderKind::Ollama => Arc::new(OllamaEmbeddingProvider::new(
            config
                .embedding
                .base_url
                .clone()
                .unwrap_or_else(|| "http://localhost:11434".to_string()),
            config.embedding.model.clone(),
            timeout,
            reqwest::Client::new(),
        )),
    }
}

fn build_vector_store(config: &AppConfig) -> Result<Arc<dyn VectorStoreProvider>> {
    match config.vector_store.provider {
        VectorStoreProviderKind::Memory => Ok(Arc::new(InMemoryVectorStoreProvider::new())),
        VectorStoreProviderKind::Filesystem => {
            let path = config
                .vector_store
                .path
                .clone()
                .unwrap_or_else(|| PathBuf::from("./data/vectors"));
            let provider = FilesystemVectorStoreProvider::new(path)?;
            Ok(Arc::new(provider))
        }
    }
}

fn build_cache(config: &AppConfig) -> Arc<dyn CacheProvider> {
    if config.cache.capacity == 0 {
        return Arc::new(NullCacheProvider::new());
    }
    Arc::new(MokaCacheProvider::new(
        config.cache.capacity,
        Duration::from_secs(config.cache.ttl_secs),
    ))
}

fn build_completion_model(config: &AppConfig) -> Arc<dyn CompletionModel> {
    let timeout = Duration::from_secs(config.completion.request_timeout_secs);
    match config.completion.model_provider {
        CompletionModelProviderKind::Null => Arc::new(NullCompletionModel::new()),
        CompletionModelProviderKind::Openai => Arc::new(OpenAiCompletionModel::new(
            config.completion.api_key.clone().unwrap_or_default(),
            config.completion.base_url.clone(),
            config.completion.model.clone(),
            timeout,
            reqwest::Client::new(),
        )),
    }
}

#[allow(clippy::too_many_arguments)]
fn build_indexes(
    chunk_repo: Arc<dyn ChunkRepository>,
    snippets_repo: Arc<dyn ChunkRepository>,
    search_repo: Arc<dyn SearchRepository>,
    chunker: Arc<dyn Chunker>,
    embedding: Arc<dyn EmbeddingProvider>,
    vector_store: Arc<dyn VectorStoreProvider>,
    max_chunk_size: usize,
) -> Vec<Arc<dyn ArtifactIndex>> {
    let mut indexes: Vec<Arc<dyn ArtifactIndex>> = vec![
        Arc::new(ChunkIndex::new(Arc::clone(&chunk_repo), Arc::clone(&chunker), max_chunk_size)),
        Arc::new(FtsIndex::new(search_repo, Arc::clone(&chunker), max_chunk_size)),
        Arc::new(SnippetsIndex::new(snippets_repo, Arc::clone(&chunker))),
    ];
    if let Some(vector_index) = VectorIndex::new(chunk_repo, chunker, Some(embedding), vector_store, max_chunk_size) {
        indexes.push(Arc::new(vector_index));
    }
    indexes
}

fn build_snippet_sources(ide: Arc<dyn IdeContext>) -> Vec<Arc<dyn SnippetSource>> {
    vec![
        Arc::new(InlineSnippetSource::clipboard()),
        Arc::new(InlineSnippetSource::recently_visited()),
        Arc::new(InlineSnippetSource::recently_edited()),
        Arc::new(InlineSnippetSource::diff()),
        Arc::new(InlineSnippetSource::ide()),
        Arc::new(RootPathSnippetSource::new(Arc::clone(&ide))),
        Arc::new(ImportSnippetSource::new(ide)),
    ]
}

fn completion_settings(config: &AppConfig) -> CompletionSettings {
    CompletionSettings {
        debounce_delay_ms: config.completion.debounce_delay_ms,
        snippet_collection_timeout_ms: config.completion.snippet_collection_timeout_ms,
        rejection_timeout_secs: config.completion.rejection_timeout_secs,
        dedup_window_ms: config.completion.dedup_window_ms,
        prompt_token_budget: config.completion.prompt_token_budget,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn build_with_default_config_wires_null_and_in_memory_providers() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.catalog.path = dir.path().join("catalog.sqlite3");

        let ctx = build(config).unwrap();
        assert_eq!(ctx.embedding.provider_name(), "null");
        assert_eq!(ctx.vector_store.provider_name(), "memory");
        assert_eq!(ctx.metrics.get("files_indexed"), 0);
    }
}
