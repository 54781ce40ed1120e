//! Real filesystem callbacks for the indexer orchestrator
//!
//! [`StatFile`](cortex_application::indexer::StatFile) and
//! [`ReadFile`](cortex_application::planner::ReadFile) are injected closures
//! so the orchestrator and planner stay testable without touching a real
//! filesystem; this is the one place the server crate supplies real ones,
//! since no bespoke IDE transport is wired up to supply file content itself.

use std::path::Path;
use std::sync::Arc;

use cortex_application::indexer::StatFile;
use cortex_application::planner::ReadFile;
use cortex_domain::entities::FileStat;

fn to_millis(time: std::io::Result<std::time::SystemTime>) -> u64 {
    time.ok()
        .and_then(|t| t.duration_since(std::time::UNIX_EPOCH).ok())
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// A [`StatFile`] backed by `std::fs::metadata`.
pub fn real_stat_file() -> StatFile {
    Arc::new(|path: &Path| {
        let metadata = std::fs::metadata(path)?;
        Ok(FileStat {
            last_modified_ms: to_millis(metadata.modified()),
            size_bytes: metadata.len(),
        })
    })
}

/// A [`ReadFile`] backed by `tokio::fs::read`.
pub fn real_read_file() -> ReadFile {
    Arc::new(|path: &Path| {
        let path = path.to_path_buf();
        Box::pin(async move { tokio::fs::read(path).await })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stats_and_reads_a_real_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.rs");
        std::fs::write(&path, b"fn main() {}").unwrap();

        let stat = real_stat_file()(&path).unwrap();
        assert_eq!(stat.size_bytes, 12);

        let bytes = real_read_file()(&path).await.unwrap();
        assert_eq!(bytes, b"fn main() {}");
    }
}
