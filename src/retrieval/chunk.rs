//! Retrieval units and scored results

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Smallest retrievable unit of indexed text. Created by the indexing
/// pipeline and read-only to the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    /// Owning document path; a document may contribute multiple chunks
    pub path: String,

    /// Owning document title
    pub title: String,

    /// Passage text
    pub content: String,

    /// Fixed-length embedding matching the configured model
    pub embedding: Vec<f32>,

    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,

    pub tags: Vec<String>,
    pub extension: String,
    pub char_count: usize,

    /// Model that produced the stored embedding
    pub embedding_model: String,
}

impl Chunk {
    /// Uniqueness key: two chunks with the same path and content are the
    /// same chunk regardless of other metadata.
    pub fn identity(&self) -> ChunkIdentity {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.path.as_bytes());
        hasher.update(&[0]);
        hasher.update(self.content.as_bytes());
        ChunkIdentity(*hasher.finalize().as_bytes())
    }
}

/// BLAKE3 digest of a chunk's `(path, content)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkIdentity([u8; 32]);

/// A chunk with a relevance score and inclusion flag. Created per-request
/// and discarded after the response is returned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredChunk {
    pub chunk: Chunk,

    /// Similarity or hybrid score (0.0 to 1.0); zero for chunks that
    /// bypassed the index entirely
    pub score: f32,

    /// Present only after reranking
    pub rerank_score: Option<f32>,

    /// Whether this chunk should be surfaced to the caller. Set by the
    /// combiner or reranker, never by the raw index.
    pub include_in_context: bool,
}

impl ScoredChunk {
    /// Wrap an index hit
    pub fn new(chunk: Chunk, score: f32) -> Self {
        Self {
            chunk,
            score,
            rerank_score: None,
            include_in_context: false,
        }
    }

    /// Wrap a chunk that is included unconditionally: an explicit
    /// reference or a date-resolved daily note. Carries no score and is
    /// exempt from the inclusion threshold.
    pub fn pinned(chunk: Chunk) -> Self {
        Self {
            chunk,
            score: 0.0,
            rerank_score: None,
            include_in_context: true,
        }
    }

    pub fn identity(&self) -> ChunkIdentity {
        self.chunk.identity()
    }

    /// Get a short preview of the content (first N characters)
    pub fn preview(&self, max_chars: usize) -> String {
        let content = &self.chunk.content;
        if content.chars().count() <= max_chars {
            content.clone()
        } else {
            let cut: String = content.chars().take(max_chars).collect();
            format!("{}...", cut)
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::chunk;

    #[test]
    fn identity_ignores_metadata() {
        let a = chunk("notes/alpha.md", "same passage");
        let mut b = chunk("notes/alpha.md", "same passage");
        b.tags = vec!["#projects".to_string()];
        b.char_count = 999;

        assert_eq!(a.identity(), b.identity());
    }

    #[test]
    fn identity_distinguishes_path_and_content() {
        let a = chunk("notes/alpha.md", "passage");
        let b = chunk("notes/beta.md", "passage");
        let c = chunk("notes/alpha.md", "other passage");

        assert_ne!(a.identity(), b.identity());
        assert_ne!(a.identity(), c.identity());
    }

    #[test]
    fn preview_respects_char_boundaries() {
        let c = super::ScoredChunk::new(chunk("a.md", "héllo wörld"), 0.5);
        assert_eq!(c.preview(5), "héllo...");
        assert_eq!(c.preview(64), "héllo wörld");
    }
}
