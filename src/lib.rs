//! Sift - Hybrid Retrieval Engine
//!
//! Retrieves the most relevant passages from a personal note corpus to
//! ground an assistant's answers: explicit wiki-link references, weighted
//! lexical+vector search, time-window bucketing for daily notes, and
//! confidence-gated cross-encoder reranking, combined into one ranked,
//! deduplicated result list.

pub mod config;
pub mod error;
pub mod retrieval;
pub mod services;

pub use error::{Result, SiftError};
