use thiserror::Error;

/// Errors surfaced by a cache-store backend.
///
/// Callers are expected to recover from every variant: a failing probe is a
/// miss, a failing write or drop is a no-op, and the backend call remains
/// the source of truth.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Cache backend error: {0}")]
    Backend(String),
}

impl CacheError {
    /// Create a new Backend error
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend(message.into())
    }
}
