use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the sift retrieval engine
#[derive(Error, Debug)]
pub enum SiftError {
    /// Configuration related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration validation errors
    #[error("Configuration validation failed: {errors:?}")]
    ConfigValidation { errors: Vec<ValidationError> },

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Invalid configuration value
    #[error("Invalid configuration value at {path}: {message}")]
    InvalidConfigValue { path: String, message: String },

    /// Embedding generation failed (no vector search without a vector)
    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    /// Index query failed
    #[error("Index query failed: {0}")]
    Index(String),

    /// Chunk store read failed
    #[error("Chunk fetch failed: {0}")]
    ChunkFetch(String),

    /// Reranker invocation failed while triggered
    #[error("Reranking failed: {0}")]
    Rerank(String),

    /// Rerank threshold was hit but no reranker is wired
    #[error("Rerank triggered but no reranker is configured")]
    RerankerMissing,

    /// Malformed retrieval request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Retrieval was cancelled by the caller
    #[error("Retrieval cancelled")]
    Cancelled,

    /// IO errors
    #[error("IO error: {context}: {source}")]
    Io {
        source: std::io::Error,
        context: String,
    },

    /// TOML deserialization errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization errors
    #[error("TOML serialization error: {0}")]
    TomlSerialization(#[from] toml::ser::Error),

    /// Generic errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Path to the configuration key that failed validation
    pub path: String,
    /// Error message describing the validation failure
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Result type for sift operations
pub type Result<T> = std::result::Result<T, SiftError>;

/// External calls the engine makes, one row per collaborator operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExternalCall {
    Embed,
    IndexQuery,
    TitleLookup,
    ChunkFetch,
    Rewrite,
    Rerank,
}

/// Whether a failing external call aborts retrieval or degrades it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureMode {
    /// Aborts the whole retrieve call
    Hard,
    /// Logged, processing continues with a fallback
    Soft,
}

impl ExternalCall {
    /// Reliability contract per collaborator. Rewriting fails soft while
    /// reranking fails hard: a low-confidence result set without any
    /// fallback ranking is too unreliable to silently serve.
    pub fn failure_mode(self) -> FailureMode {
        match self {
            ExternalCall::Embed => FailureMode::Hard,
            ExternalCall::IndexQuery => FailureMode::Hard,
            ExternalCall::ChunkFetch => FailureMode::Hard,
            ExternalCall::Rerank => FailureMode::Hard,
            ExternalCall::TitleLookup => FailureMode::Soft,
            ExternalCall::Rewrite => FailureMode::Soft,
        }
    }

    fn into_error(self, source: anyhow::Error) -> SiftError {
        match self {
            ExternalCall::Embed => SiftError::Embedding(source.to_string()),
            ExternalCall::IndexQuery => SiftError::Index(source.to_string()),
            ExternalCall::ChunkFetch => SiftError::ChunkFetch(source.to_string()),
            ExternalCall::Rerank => SiftError::Rerank(source.to_string()),
            // Soft calls never reach here through require(); keep the
            // source intact for callers that convert them directly.
            ExternalCall::TitleLookup | ExternalCall::Rewrite => SiftError::Other(source),
        }
    }
}

/// Route a hard external call result through the failure policy table,
/// mapping errors to the matching [`SiftError`] variant.
pub(crate) fn require<T>(call: ExternalCall, result: anyhow::Result<T>) -> Result<T> {
    debug_assert_eq!(call.failure_mode(), FailureMode::Hard);
    result.map_err(|source| call.into_error(source))
}

/// Route a soft external call result through the failure policy table.
/// Failures are logged and yield `None`; the caller supplies the fallback.
pub(crate) fn absorb<T>(call: ExternalCall, result: anyhow::Result<T>) -> Option<T> {
    debug_assert_eq!(call.failure_mode(), FailureMode::Soft);
    match result {
        Ok(value) => Some(value),
        Err(source) => {
            tracing::warn!(call = ?call, error = %source, "external call failed, continuing");
            None
        }
    }
}
