//! Opaque text-generation contract used for query rewriting

use async_trait::async_trait;

/// A text-generation service. The engine only uses it to produce a
/// hypothetical answer passage from a query; reranking goes through the
/// dedicated [`crate::services::Reranker`] contract instead.
#[async_trait]
pub trait TextGeneration: Send + Sync {
    async fn generate(&self, prompt: &str) -> anyhow::Result<String>;
}
