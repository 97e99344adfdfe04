//! Contracts for the external collaborators the engine consumes.
//!
//! The engine is a pure function of its inputs plus the state behind these
//! traits: embedding generation, the lexical+vector index, document
//! metadata, chunk storage, text generation, and cross-encoder reranking.
//! All of them are read-only from the engine's perspective.

mod corpus;
mod embedding;
mod generation;
mod index;
mod reranker;

pub use corpus::{ChunkStore, DocumentLookup};
pub use embedding::{EmbeddingError, EmbeddingProvider, FastEmbedProvider};
pub use generation::TextGeneration;
pub use index::{FieldFilter, FieldWeights, FilterExpr, IndexHit, IndexQuery, QueryMode, SearchIndex};
pub use reranker::{FastEmbedReranker, RerankError, RerankHit, Reranker};
