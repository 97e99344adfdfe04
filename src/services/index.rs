//! Combined lexical+vector index contract

use crate::retrieval::Chunk;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// How the index should interpret a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryMode {
    /// Pure vector similarity, no lexical term
    Vector,
    /// Weighted lexical + vector combination
    Hybrid,
}

/// Per-field weight split for hybrid queries. The engine maintains
/// `text + vector == 1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldWeights {
    pub text: f32,
    pub vector: f32,
}

/// A single range or equality condition on chunk metadata.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldFilter {
    CreatedWithin {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    ModifiedWithin {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    TitleIs(String),
}

/// Filter expression attached to an index query.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterExpr {
    /// Every clause must hold. Every index must support this.
    All(Vec<FieldFilter>),
    /// At least one AND-group must hold. Only sent to indexes that report
    /// [`SearchIndex::supports_filter_disjunction`].
    AnyGroup(Vec<Vec<FieldFilter>>),
}

/// Query parameters understood by the index.
#[derive(Debug, Clone)]
pub struct IndexQuery {
    pub mode: QueryMode,
    pub vector: Vec<f32>,
    /// Space-joined lexical term string; `None` in vector mode
    pub term: Option<String>,
    pub weights: FieldWeights,
    /// Optional index-side score floor. The engine leaves this unset and
    /// applies its own inclusion threshold after combination, so
    /// `return_all` requests can still see every candidate.
    pub similarity_threshold: Option<f32>,
    pub limit: usize,
    pub filter: Option<FilterExpr>,
}

/// One scored index match.
#[derive(Debug, Clone)]
pub struct IndexHit {
    pub chunk: Chunk,
    pub score: f32,
}

/// Read-only hybrid search index.
///
/// Must support at least AND-combined range filters on the two timestamp
/// fields; OR support is optional and advertised through
/// [`supports_filter_disjunction`](SearchIndex::supports_filter_disjunction).
#[async_trait]
pub trait SearchIndex: Send + Sync {
    /// Run a query, returning matches in descending score order.
    async fn query(&self, query: &IndexQuery) -> anyhow::Result<Vec<IndexHit>>;

    /// Whether [`FilterExpr::AnyGroup`] may be sent to this index. When
    /// false the engine falls back to issuing multiple queries and
    /// unioning the results itself.
    fn supports_filter_disjunction(&self) -> bool {
        false
    }
}
