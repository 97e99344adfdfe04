//! Hybrid retrieval
//!
//! Turns a query into a ranked, deduplicated set of passages by combining
//! explicit wiki-link references, weighted lexical+vector search, optional
//! time-window bucketing for date-named notes, and cross-encoder reranking
//! when the engine's own confidence is low.

pub(crate) mod chunk;
mod combine;
mod deduplication;
mod engine;
mod hybrid;
mod references;
mod rerank;
mod rewrite;

pub use chunk::{Chunk, ChunkIdentity, ScoredChunk};
pub use deduplication::deduplicate_chunks;
pub use engine::RetrievalEngine;
pub use hybrid::HybridSearcher;
pub use references::ReferenceResolver;
pub use rewrite::QueryRewriter;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Default inclusion threshold for non-explicit chunks. Low enough to keep
/// marginal matches, non-zero to cut the index's long tail.
pub const DEFAULT_MIN_SIMILARITY: f32 = 0.1;

/// Default number of hybrid results surfaced per request
pub const DEFAULT_MAX_RESULTS: usize = 15;

/// Inclusive calendar-date window over `created_at` and `modified_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl TimeRange {
    /// Every calendar date in the range, in order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        let end = self.end;
        self.start.iter_days().take_while(move |date| *date <= end)
    }

    /// Timestamp bounds spanning the whole inclusive window.
    pub fn bounds(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        let end_of_day = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
        (
            self.start.and_time(NaiveTime::MIN).and_utc(),
            self.end.and_time(end_of_day).and_utc(),
        )
    }
}

/// A single retrieval request. Processed independently of any other
/// request; the engine holds no per-request state afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalRequest {
    /// Query text as the user typed it, wiki-links included
    pub raw_query: String,

    /// Keywords and tags extracted upstream; order is irrelevant for
    /// scoring but preserved for the lexical term string
    pub salient_terms: Vec<String>,

    /// Optional calendar window for date-indexed documents
    pub time_range: Option<TimeRange>,

    /// Lexical weight (0.0 to 1.0); the configured default applies when
    /// unset, and the vector weight is always the complement
    pub text_weight: Option<f32>,

    /// Maximum number of hybrid results surfaced
    pub max_results: usize,

    /// Inclusion threshold for non-explicit chunks
    pub min_similarity: f32,

    /// Rerank when the best hybrid score falls below this
    pub rerank_threshold: Option<f32>,

    /// Return every candidate, bypassing the inclusion threshold
    pub return_all: bool,

    /// Skip query rewriting and embed the raw query directly
    pub skip_rewrite: bool,
}

impl RetrievalRequest {
    pub fn new(raw_query: impl Into<String>) -> Self {
        Self {
            raw_query: raw_query.into(),
            salient_terms: Vec::new(),
            time_range: None,
            text_weight: None,
            max_results: DEFAULT_MAX_RESULTS,
            min_similarity: DEFAULT_MIN_SIMILARITY,
            rerank_threshold: None,
            return_all: false,
            skip_rewrite: false,
        }
    }
}
