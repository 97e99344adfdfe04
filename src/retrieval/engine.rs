//! Retrieval entry point
//!
//! The engine wires the resolver, rewriter, searcher, combiner, and
//! reranker into the single `retrieve` operation. It holds no per-request
//! state; every request is a pure function of its inputs plus the external
//! services' current state.

use crate::config::RetrievalConfig;
use crate::error::{Result, SiftError};
use crate::retrieval::combine::merge_candidates;
use crate::retrieval::rerank::{rerank_candidates, should_rerank};
use crate::retrieval::{
    HybridSearcher, QueryRewriter, ReferenceResolver, RetrievalRequest, ScoredChunk,
};
use crate::services::{
    ChunkStore, DocumentLookup, EmbeddingProvider, Reranker, SearchIndex, TextGeneration,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;
use uuid::Uuid;

pub struct RetrievalEngine {
    resolver: Arc<ReferenceResolver>,
    rewriter: QueryRewriter,
    searcher: HybridSearcher,
    reranker: Option<Arc<dyn Reranker>>,
    config: RetrievalConfig,
}

impl RetrievalEngine {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        index: Arc<dyn SearchIndex>,
        lookup: Arc<dyn DocumentLookup>,
        store: Arc<dyn ChunkStore>,
        generator: Option<Arc<dyn TextGeneration>>,
        reranker: Option<Arc<dyn Reranker>>,
        config: RetrievalConfig,
    ) -> Self {
        let resolver = Arc::new(ReferenceResolver::new(lookup, store));
        let searcher = HybridSearcher::new(embedder, index, resolver.clone(), config.clone());

        Self {
            resolver,
            rewriter: QueryRewriter::new(generator),
            searcher,
            reranker,
            config,
        }
    }

    /// Run one retrieval request to completion. The sole entry point.
    ///
    /// The cancellation token is observed across every external call;
    /// cancellation surfaces as [`SiftError::Cancelled`] with no partial
    /// state left behind.
    pub async fn retrieve(
        &self,
        request: &RetrievalRequest,
        cancel: CancellationToken,
    ) -> Result<Vec<ScoredChunk>> {
        validate_request(request)?;

        let request_id = Uuid::new_v4();
        let span = tracing::info_span!("retrieve", %request_id);
        self.retrieve_inner(request, cancel).instrument(span).await
    }

    async fn retrieve_inner(
        &self,
        request: &RetrievalRequest,
        cancel: CancellationToken,
    ) -> Result<Vec<ScoredChunk>> {
        // The explicit-reference branch reads metadata and chunk storage;
        // the hybrid branch only queries the index. Independent, so they
        // run concurrently.
        let branches = async {
            tokio::join!(self.resolver.resolve_query(&request.raw_query), async {
                let text = self
                    .rewriter
                    .rewrite(&request.raw_query, request.skip_rewrite)
                    .await;
                self.searcher.search(&text, request).await
            })
        };

        let (explicit, hybrid) = cancel
            .run_until_cancelled(branches)
            .await
            .ok_or(SiftError::Cancelled)?;
        let (explicit, hybrid) = (explicit?, hybrid?);

        tracing::debug!(
            explicit = explicit.len(),
            hybrid = hybrid.len(),
            "candidates gathered"
        );

        let mut results = merge_candidates(explicit, hybrid, request);

        if should_rerank(&results, request.rerank_threshold) {
            let reranker = self.reranker.as_deref().ok_or(SiftError::RerankerMissing)?;
            results = cancel
                .run_until_cancelled(rerank_candidates(
                    reranker,
                    &request.raw_query,
                    results,
                    self.config.rerank_content_cap,
                ))
                .await
                .ok_or(SiftError::Cancelled)??;
        }

        tracing::debug!(results = results.len(), "retrieval complete");
        Ok(results)
    }
}

fn validate_request(request: &RetrievalRequest) -> Result<()> {
    if request.raw_query.trim().is_empty() {
        return Err(SiftError::InvalidRequest(
            "query text cannot be empty".to_string(),
        ));
    }
    if request.max_results == 0 {
        return Err(SiftError::InvalidRequest(
            "max_results must be greater than 0".to_string(),
        ));
    }
    if let Some(weight) = request.text_weight {
        if !(0.0..=1.0).contains(&weight) {
            return Err(SiftError::InvalidRequest(format!(
                "text_weight must be between 0.0 and 1.0, got {weight}"
            )));
        }
    }
    if !(0.0..=1.0).contains(&request.min_similarity) {
        return Err(SiftError::InvalidRequest(format!(
            "min_similarity must be between 0.0 and 1.0, got {}",
            request.min_similarity
        )));
    }
    if let Some(threshold) = request.rerank_threshold {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(SiftError::InvalidRequest(format!(
                "rerank_threshold must be between 0.0 and 1.0, got {threshold}"
            )));
        }
    }
    if let Some(range) = &request.time_range {
        if range.start > range.end {
            return Err(SiftError::InvalidRequest(format!(
                "time range start {} is after end {}",
                range.start, range.end
            )));
        }
    }
    Ok(())
}
