//! Explicit document references named inline in a query
//!
//! A `[[Title]]` wiki-link in the query bypasses similarity search: every
//! chunk of the referenced document is fetched directly. A fat-fingered
//! reference degrades gracefully rather than failing the whole query.

use crate::error::{absorb, require, ExternalCall, Result};
use crate::retrieval::{Chunk, ScoredChunk};
use crate::services::{ChunkStore, DocumentLookup};
use ahash::AHashSet;
use regex::Regex;
use std::sync::{Arc, OnceLock};

fn wiki_link_pattern() -> &'static Regex {
    static WIKI_LINK: OnceLock<Regex> = OnceLock::new();
    WIKI_LINK.get_or_init(|| Regex::new(r"\[\[([^\[\]]+)\]\]").expect("valid literal pattern"))
}

/// Extract referenced titles in appearance order. `[[Title|alias]]` and
/// `[[Title#heading]]` reference the title part only.
pub(crate) fn reference_titles(query: &str) -> Vec<String> {
    wiki_link_pattern()
        .captures_iter(query)
        .filter_map(|captures| captures.get(1))
        .filter_map(|span| {
            let title = span
                .as_str()
                .split(['|', '#'])
                .next()
                .unwrap_or_default()
                .trim();
            (!title.is_empty()).then(|| title.to_string())
        })
        .collect()
}

/// Resolves explicit references against document metadata and chunk storage.
pub struct ReferenceResolver {
    lookup: Arc<dyn DocumentLookup>,
    store: Arc<dyn ChunkStore>,
}

impl ReferenceResolver {
    pub fn new(lookup: Arc<dyn DocumentLookup>, store: Arc<dyn ChunkStore>) -> Self {
        Self { lookup, store }
    }

    /// Resolve every reference in the query, in appearance order. Repeated
    /// references to the same title resolve once; unresolved references
    /// are skipped silently.
    pub async fn resolve_query(&self, query: &str) -> Result<Vec<ScoredChunk>> {
        let mut resolved = Vec::new();
        let mut seen_titles = AHashSet::new();

        for title in reference_titles(query) {
            if !seen_titles.insert(title.clone()) {
                continue;
            }
            let chunks = self.resolve_title(&title).await?;
            resolved.extend(chunks.into_iter().map(ScoredChunk::pinned));
        }

        Ok(resolved)
    }

    /// Resolve a single literal title to its chunks, in index-assigned
    /// order. A missing or ambiguous title yields an empty list, never an
    /// error. Also used for date-named daily notes in time-scoped search.
    pub async fn resolve_title(&self, title: &str) -> Result<Vec<Chunk>> {
        let lookup = absorb(
            ExternalCall::TitleLookup,
            self.lookup.find_by_title(title).await,
        );

        let path = match lookup.flatten() {
            Some(path) => path,
            None => {
                tracing::debug!(title, "reference did not resolve, skipping");
                return Ok(Vec::new());
            }
        };

        require(
            ExternalCall::ChunkFetch,
            self.store.chunks_for_path(&path).await,
        )
    }
}
