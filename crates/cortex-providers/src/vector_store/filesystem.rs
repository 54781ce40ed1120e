//! Filesystem-backed vector store
//!
//! Persists each collection as a single JSON file under a configured base
//! directory. Ownership of the on-disk layout belongs entirely to this
//! provider; the core only creates and recursively removes the directory.

use async_trait::async_trait;
use cortex_domain::entities::Language;
use cortex_domain::error::{Error, Result};
use cortex_domain::ports::providers::VectorStoreProvider;
use cortex_domain::value_objects::{Embedding, SearchResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct CollectionFile {
    entries: Vec<StoredVector>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredVector {
    id: String,
    embedding: Embedding,
    metadata: HashMap<String, serde_json::Value>,
}

/// JSON-file-per-collection vector store rooted at `base_path`.
pub struct FilesystemVectorStoreProvider {
    base_path: PathBuf,
    lock: Mutex<()>,
}

impl FilesystemVectorStoreProvider {
    /// Create a provider rooted at `base_path`, creating the directory if needed.
    pub fn new(base_path: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&base_path)
            .map_err(|e| Error::vector_db(format!("failed to create vector store directory: {}", e)))?;
        Ok(Self {
            base_path,
            lock: Mutex::new(()),
        })
    }

    fn collection_path(&self, name: &str) -> PathBuf {
        self.base_path.join(format!("{}.json", name))
    }

    fn read_collection(path: &Path) -> Result<CollectionFile> {
        if !path.exists() {
            return Ok(CollectionFile::default());
        }
        let bytes = std::fs::read(path)
            .map_err(|e| Error::vector_db(format!("failed to read collection file: {}", e)))?;
        serde_json::from_slice(&bytes)
            .map_err(|e| Error::vector_db(format!("failed to parse collection file: {}", e)))
    }

    fn write_collection(path: &Path, collection: &CollectionFile) -> Result<()> {
        let bytes = serde_json::to_vec(collection)
            .map_err(|e| Error::vector_db(format!("failed to serialize collection: {}", e)))?;
        std::fs::write(path, bytes)
            .map_err(|e| Error::vector_db(format!("failed to write collection file: {}", e)))
    }
}

#[async_trait]
impl VectorStoreProvider for FilesystemVectorStoreProvider {
    async fn create_collection(&self, name: &str, _dimensions: usize) -> Result<()> {
        let _guard = self.lock.lock().await;
        let path = self.collection_path(name);
        if path.exists() {
            return Err(Error::vector_db(format!("collection '{}' already exists", name)));
        }
        Self::write_collection(&path, &CollectionFile::default())
    }

    async fn delete_collection(&self, name: &str) -> Result<()> {
        let _guard = self.lock.lock().await;
        let path = self.collection_path(name);
        if path.exists() {
            std::fs::remove_file(&path)
                .map_err(|e| Error::vector_db(format!("failed to delete collection file: {}", e)))?;
        }
        Ok(())
    }

    async fn collection_exists(&self, name: &str) -> Result<bool> {
        Ok(self.collection_path(name).exists())
    }

    async fn insert_vectors(
        &self,
        collection: &str,
        vectors: &[Embedding],
        metadata: Vec<HashMap<String, serde_json::Value>>,
    ) -> Result<Vec<String>> {
        let _guard = self.lock.lock().await;
        let path = self.collection_path(collection);
        let mut file = Self::read_collection(&path)?;

        let mut ids = Vec::with_capacity(vectors.len());
        for (vector, meta) in vectors.iter().zip(metadata) {
            let id = format!("{}_{}", collection, file.entries.len());
            file.entries.push(StoredVector {
                id: id.clone(),
                embedding: vector.clone(),
                metadata: meta,
            });
            ids.push(id);
        }

        Self::write_collection(&path, &file)?;
        Ok(ids)
    }

    async fn search_similar(
        &self,
        collection: &str,
        query_vector: &[f32],
        limit: usize,
        _filter: Option<&str>,
    ) -> Result<Vec<SearchResult>> {
        let _guard = self.lock.lock().await;
        let path = self.collection_path(collection);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let file = Self::read_collection(&path)?;

        let mut scored: Vec<(f64, &StoredVector)> = file
            .entries
            .iter()
            .map(|entry| (cosine_similarity(query_vector, &entry.embedding.vector), entry))
            .collect();
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

        Ok(scored
            .into_iter()
            .take(limit)
            .map(|(score, entry)| stored_to_search_result(entry, score))
            .collect())
    }

    async fn delete_vectors(&self, collection: &str, ids: &[String]) -> Result<()> {
        let _guard = self.lock.lock().await;
        let path = self.collection_path(collection);
        let mut file = Self::read_collection(&path)?;
        file.entries.retain(|e| !ids.contains(&e.id));
        Self::write_collection(&path, &file)
    }

    fn provider_name(&self) -> &str {
        "filesystem"
    }
}

fn stored_to_search_result(entry: &StoredVector, score: f64) -> SearchResult {
    let file_path = entry
        .metadata
        .get("file_path")
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string();
    let start_line = entry
        .metadata
        .get("start_line")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;
    let content = entry
        .metadata
        .get("content")
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string();
    let language = file_path
        .rsplit('.')
        .next()
        .map(Language::from_extension)
        .unwrap_or(Language::PlainText);

    SearchResult {
        id: entry.id.clone(),
        file_path,
        start_line,
        content,
        score,
        language,
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        ((dot / (norm_a * norm_b) + 1.0) / 2.0) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn insert_and_search_round_trips_through_disk() {
        let dir = tempdir().unwrap();
        let store = FilesystemVectorStoreProvider::new(dir.path().to_path_buf()).unwrap();
        store.create_collection("code", 3).await.unwrap();

        let vectors = vec![Embedding {
            vector: vec![1.0, 0.0, 0.0],
            model: "t".into(),
            dimensions: 3,
        }];
        let metadata = vec![HashMap::from([(
            "file_path".to_string(),
            serde_json::json!("a.rs"),
        )])];
        store.insert_vectors("code", &vectors, metadata).await.unwrap();

        let results = store
            .search_similar("code", &[1.0, 0.0, 0.0], 1, None)
            .await
            .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].file_path, "a.rs");
    }

    #[tokio::test]
    async fn delete_collection_removes_file() {
        let dir = tempdir().unwrap();
        let store = FilesystemVectorStoreProvider::new(dir.path().to_path_buf()).unwrap();
        store.create_collection("code", 3).await.unwrap();
        store.delete_collection("code").await.unwrap();
        assert!(!store.collection_exists("code").await.unwrap());
    }
}
