//! Merging explicit and hybrid candidates
//!
//! Explicit chunks always open the result list, in reference order, and
//! are never threshold-filtered. Hybrid chunks follow in search order once
//! they clear the inclusion threshold and their identity is unseen.

use crate::retrieval::{RetrievalRequest, ScoredChunk};
use ahash::AHashSet;

pub(crate) fn merge_candidates(
    explicit: Vec<ScoredChunk>,
    hybrid: Vec<ScoredChunk>,
    request: &RetrievalRequest,
) -> Vec<ScoredChunk> {
    let mut combined = Vec::with_capacity(explicit.len() + hybrid.len());
    let mut seen = AHashSet::new();

    for mut chunk in explicit {
        if !seen.insert(chunk.identity()) {
            continue;
        }
        chunk.include_in_context = true;
        combined.push(chunk);
    }

    let mut appended = 0;
    for mut chunk in hybrid {
        if appended >= request.max_results {
            break;
        }
        // chunks already flagged arrived pinned (date-resolved daily
        // notes) and bypass the threshold like explicit ones
        if !request.return_all
            && !chunk.include_in_context
            && chunk.score < request.min_similarity
        {
            continue;
        }
        if !seen.insert(chunk.identity()) {
            continue;
        }
        chunk.include_in_context = true;
        combined.push(chunk);
        appended += 1;
    }

    combined
}
