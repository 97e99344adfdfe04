//! Hybrid search combining lexical and vector signals
//!
//! Issues one or more queries against the search index, handling the
//! weighting policy, tag-only-query detection, and time-range bucketing
//! for date-named daily notes.

use crate::config::RetrievalConfig;
use crate::error::{require, ExternalCall, Result};
use crate::retrieval::deduplication::deduplicate_chunks;
use crate::retrieval::{ReferenceResolver, RetrievalRequest, ScoredChunk, TimeRange};
use crate::services::{
    EmbeddingProvider, FieldFilter, FieldWeights, FilterExpr, IndexQuery, QueryMode, SearchIndex,
};
use ahash::AHashSet;
use std::sync::Arc;

/// True iff there is at least one term and every term carries the tag
/// prefix. An empty term list selects pure-vector mode instead.
pub(crate) fn is_tag_only(terms: &[String], tag_prefix: &str) -> bool {
    !terms.is_empty() && terms.iter().all(|term| term.starts_with(tag_prefix))
}

/// Weight policy. A tag-only term list is an exact-match lexical signal;
/// vector similarity only adds noise, so the caller-supplied weight is
/// overridden.
pub(crate) fn resolve_weights(request: &RetrievalRequest, config: &RetrievalConfig) -> FieldWeights {
    if is_tag_only(&request.salient_terms, &config.tag_prefix) {
        FieldWeights {
            text: 1.0,
            vector: 0.0,
        }
    } else {
        let text = request.text_weight.unwrap_or(config.default_text_weight);
        FieldWeights {
            text,
            vector: 1.0 - text,
        }
    }
}

pub struct HybridSearcher {
    embedder: Arc<dyn EmbeddingProvider>,
    index: Arc<dyn SearchIndex>,
    resolver: Arc<ReferenceResolver>,
    config: RetrievalConfig,
}

impl HybridSearcher {
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        index: Arc<dyn SearchIndex>,
        resolver: Arc<ReferenceResolver>,
        config: RetrievalConfig,
    ) -> Self {
        Self {
            embedder,
            index,
            resolver,
            config,
        }
    }

    /// Search the index with the (possibly rewritten) query text. Output
    /// is in index order, descending score, up to
    /// `max_results * search_multiplier` entries so the combiner has room
    /// to filter.
    pub async fn search(&self, text: &str, request: &RetrievalRequest) -> Result<Vec<ScoredChunk>> {
        let vector = require(ExternalCall::Embed, self.embedder.embed(text).await)?;

        let weights = resolve_weights(request, &self.config);
        let term = if request.salient_terms.is_empty() {
            None
        } else {
            Some(request.salient_terms.join(" "))
        };
        let mode = if term.is_some() {
            QueryMode::Hybrid
        } else {
            QueryMode::Vector
        };

        let query = IndexQuery {
            mode,
            vector,
            term,
            weights,
            similarity_threshold: None,
            limit: request.max_results * self.config.search_multiplier,
            filter: None,
        };

        tracing::debug!(
            ?mode,
            text_weight = weights.text,
            limit = query.limit,
            time_scoped = request.time_range.is_some(),
            "issuing index query"
        );

        match request.time_range {
            None => self.run_query(query).await,
            Some(range) => self.search_time_scoped(query, range).await,
        }
    }

    /// Time-scoped search. Date-named daily notes inside the window are
    /// always included regardless of score; everything else must fall
    /// inside the window on both timestamp fields.
    ///
    /// Indexes without OR-combined filters cannot express "in window or
    /// date-titled" in one query, so the fallback resolves the daily notes
    /// directly and unions them with a window-filtered query.
    async fn search_time_scoped(
        &self,
        mut query: IndexQuery,
        range: TimeRange,
    ) -> Result<Vec<ScoredChunk>> {
        let (start, end) = range.bounds();
        let window = vec![
            FieldFilter::CreatedWithin { start, end },
            FieldFilter::ModifiedWithin { start, end },
        ];
        let titles: Vec<String> = range
            .dates()
            .map(|date| date.format(&self.config.daily_note_format).to_string())
            .collect();

        if self.index.supports_filter_disjunction() {
            let mut groups = vec![window];
            groups.extend(
                titles
                    .iter()
                    .map(|title| vec![FieldFilter::TitleIs(title.clone())]),
            );
            query.filter = Some(FilterExpr::AnyGroup(groups));

            let title_set: AHashSet<&str> = titles.iter().map(String::as_str).collect();
            let mut results = self.run_query(query).await?;
            for result in &mut results {
                if title_set.contains(result.chunk.title.as_str()) {
                    result.include_in_context = true;
                }
            }
            return Ok(deduplicate_chunks(results));
        }

        let mut daily_notes = Vec::new();
        for title in &titles {
            let chunks = self.resolver.resolve_title(title).await?;
            daily_notes.extend(chunks.into_iter().map(ScoredChunk::pinned));
        }

        query.filter = Some(FilterExpr::All(window));
        let scored = self.run_query(query).await?;

        daily_notes.extend(scored);
        Ok(deduplicate_chunks(daily_notes))
    }

    async fn run_query(&self, query: IndexQuery) -> Result<Vec<ScoredChunk>> {
        let hits = require(ExternalCall::IndexQuery, self.index.query(&query).await)?;
        Ok(hits
            .into_iter()
            .map(|hit| ScoredChunk::new(hit.chunk, hit.score))
            .collect())
    }
}
