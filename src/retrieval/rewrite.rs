//! Query rewriting for vector recall
//!
//! A short question embeds far from the passages that answer it; a
//! hypothetical answer passage embeds much closer. The rewriter asks the
//! text-generation service for such a passage and searches with that
//! instead. This is a soft dependency: any failure falls back to the
//! original query and must never abort retrieval.

use crate::error::{absorb, ExternalCall};
use crate::services::TextGeneration;
use std::sync::Arc;

const REWRITE_PROMPT: &str = "Write a short passage that directly answers the question below, \
as it might appear in a personal note. Respond with the passage only, no preamble.\n\nQuestion: ";

pub struct QueryRewriter {
    generator: Option<Arc<dyn TextGeneration>>,
}

impl QueryRewriter {
    pub fn new(generator: Option<Arc<dyn TextGeneration>>) -> Self {
        Self { generator }
    }

    /// Produce the text to embed: a generated answer passage, or the
    /// original query when rewriting is skipped, unavailable, or fails.
    pub async fn rewrite(&self, query: &str, skip: bool) -> String {
        if skip {
            return query.to_string();
        }

        let generator = match &self.generator {
            Some(generator) => generator,
            None => return query.to_string(),
        };

        let prompt = format!("{REWRITE_PROMPT}{query}");
        match absorb(ExternalCall::Rewrite, generator.generate(&prompt).await) {
            Some(passage) if !passage.trim().is_empty() => passage,
            Some(_) => {
                tracing::debug!("empty rewrite response, using original query");
                query.to_string()
            }
            None => query.to_string(),
        }
    }
}
