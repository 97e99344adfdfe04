//! Result deduplication by chunk identity

use crate::retrieval::ScoredChunk;
use ahash::AHashSet;

/// Deduplicate chunks by `(path, content)` identity, keeping the first
/// occurrence.
///
/// # Arguments
/// * `chunks` - Scored chunks potentially with duplicates
///
/// # Returns
/// Deduplicated chunks, maintaining input order
pub fn deduplicate_chunks(chunks: Vec<ScoredChunk>) -> Vec<ScoredChunk> {
    let mut seen = AHashSet::new();

    chunks
        .into_iter()
        .filter(|chunk| seen.insert(chunk.identity()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retrieval::chunk::test_support::chunk;

    #[test]
    fn test_deduplication() {
        let chunks = vec![
            ScoredChunk::new(chunk("a.md", "text1"), 0.9),
            ScoredChunk::new(chunk("b.md", "text2"), 0.8),
            ScoredChunk::new(chunk("a.md", "text1"), 0.7), // Duplicate
        ];

        let deduped = deduplicate_chunks(chunks);

        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].chunk.path, "a.md");
        assert_eq!(deduped[0].score, 0.9); // Keeps first occurrence
    }

    #[test]
    fn same_content_different_path_is_kept() {
        let chunks = vec![
            ScoredChunk::new(chunk("a.md", "shared text"), 0.9),
            ScoredChunk::new(chunk("b.md", "shared text"), 0.8),
        ];

        assert_eq!(deduplicate_chunks(chunks).len(), 2);
    }
}
