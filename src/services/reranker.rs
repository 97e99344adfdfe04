//! Cross-encoder reranker contract and FastEmbed implementation

use async_trait::async_trait;
use fastembed::{RerankInitOptions, RerankerModel, TextRerank};
use std::sync::Arc;
use thiserror::Error;

use crate::config::RerankerConfig;

#[derive(Error, Debug)]
pub enum RerankError {
    #[error("Reranker initialization failed: {0}")]
    InitializationError(String),

    #[error("Reranking failed: {0}")]
    RerankingError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// One reranked candidate. `index` refers to the position in the submitted
/// contents slice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RerankHit {
    pub index: usize,
    pub relevance: f32,
}

/// A relevance reranking service.
///
/// Invoked by the engine only when its own confidence is low; a failure
/// here is a hard failure by design, since a low-confidence result set
/// without any fallback ranking is too unreliable to silently serve.
#[async_trait]
pub trait Reranker: Send + Sync {
    /// Rerank candidate contents against a query, returning hits in
    /// descending relevance order. Candidates omitted from the response
    /// are dropped by the engine.
    async fn rerank(&self, query: &str, contents: &[String]) -> anyhow::Result<Vec<RerankHit>>;
}

/// Cross-encoder reranker backed by FastEmbed
pub struct FastEmbedReranker {
    model: Arc<TextRerank>,
    model_name: String,
}

impl FastEmbedReranker {
    /// Create a new reranker with the specified model
    ///
    /// # Arguments
    /// * `model_name` - Model name (e.g., "Xenova/ms-marco-MiniLM-L-6-v2")
    pub fn new(model_name: &str) -> Result<Self, RerankError> {
        tracing::info!("Initializing reranker model: {}", model_name);

        let init_options = RerankInitOptions::new(RerankerModel::BGERerankerBase)
            .with_show_download_progress(true);

        let model = TextRerank::try_new(init_options)
            .map_err(|e| RerankError::InitializationError(e.to_string()))?;

        Ok(Self {
            model: Arc::new(model),
            model_name: model_name.to_string(),
        })
    }

    /// Create a reranker from the reranker configuration section
    pub fn from_config(config: &RerankerConfig) -> Result<Self, RerankError> {
        Self::new(&config.model)
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }
}

#[async_trait]
impl Reranker for FastEmbedReranker {
    async fn rerank(&self, query: &str, contents: &[String]) -> anyhow::Result<Vec<RerankHit>> {
        if contents.is_empty() {
            return Ok(Vec::new());
        }
        if query.is_empty() {
            return Err(RerankError::InvalidInput("Query cannot be empty".to_string()).into());
        }

        let model = self.model.clone();
        let query = query.to_string();
        let contents = contents.to_vec();

        let results = tokio::task::spawn_blocking(move || {
            let documents: Vec<&str> = contents.iter().map(|s| s.as_str()).collect();
            model.rerank(query.as_str(), documents, true, None)
        })
        .await
        .map_err(|e| RerankError::RerankingError(e.to_string()))?
        .map_err(|e| RerankError::RerankingError(e.to_string()))?;

        let mut hits: Vec<RerankHit> = results
            .into_iter()
            .map(|r| RerankHit {
                index: r.index,
                relevance: r.score,
            })
            .collect();

        hits.sort_by(|a, b| {
            b.relevance
                .partial_cmp(&a.relevance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        Ok(hits)
    }
}
