//! Confidence-gated reranking pass
//!
//! A remote rerank call is only worth its cost when the hybrid search
//! itself came back weak. Once invoked, the reranker's output is
//! authoritative: candidates it omits are dropped.

use crate::error::{require, ExternalCall, Result};
use crate::retrieval::ScoredChunk;
use crate::services::Reranker;

/// Rerank iff a threshold is configured and the best candidate score is
/// positive but below it. `max_score == 0` means every candidate bypassed
/// the index; there is no confidence signal to be low.
pub(crate) fn should_rerank(candidates: &[ScoredChunk], threshold: Option<f32>) -> bool {
    let Some(threshold) = threshold else {
        return false;
    };
    let max_score = candidates
        .iter()
        .map(|candidate| candidate.score)
        .fold(0.0f32, f32::max);

    max_score > 0.0 && max_score < threshold
}

pub(crate) async fn rerank_candidates(
    reranker: &dyn Reranker,
    query: &str,
    candidates: Vec<ScoredChunk>,
    content_cap: usize,
) -> Result<Vec<ScoredChunk>> {
    let contents: Vec<String> = candidates
        .iter()
        .map(|candidate| truncate_chars(&candidate.chunk.content, content_cap))
        .collect();

    let hits = require(ExternalCall::Rerank, reranker.rerank(query, &contents).await)?;

    let mut slots: Vec<Option<ScoredChunk>> = candidates.into_iter().map(Some).collect();
    let mut reranked = Vec::with_capacity(hits.len());
    for hit in hits {
        let Some(slot) = slots.get_mut(hit.index) else {
            tracing::warn!(index = hit.index, "reranker referenced an unknown candidate");
            continue;
        };
        if let Some(mut candidate) = slot.take() {
            candidate.rerank_score = Some(hit.relevance);
            candidate.include_in_context = true;
            reranked.push(candidate);
        }
    }

    Ok(reranked)
}

/// Bound the payload sent per candidate, cutting on a char boundary.
fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => text[..byte_index].to_string(),
        None => text.to_string(),
    }
}
