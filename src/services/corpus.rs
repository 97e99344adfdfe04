//! Document metadata and chunk storage contracts

use crate::retrieval::Chunk;
use async_trait::async_trait;

/// Resolves document titles to paths.
///
/// Passed in as a capability rather than reached through a global store so
/// multiple corpora can coexist and tests can substitute fakes.
#[async_trait]
pub trait DocumentLookup: Send + Sync {
    /// Exact-title match. Absent or ambiguous titles return `None`,
    /// never an error.
    async fn find_by_title(&self, title: &str) -> anyhow::Result<Option<String>>;
}

/// Read access to indexed chunks, keyed by owning document path.
#[async_trait]
pub trait ChunkStore: Send + Sync {
    /// All chunks for a document, in index-assigned order.
    async fn chunks_for_path(&self, path: &str) -> anyhow::Result<Vec<Chunk>>;
}
