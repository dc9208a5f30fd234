use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The embeddings resource is unreachable, malformed or inconsistent.
    #[error("Failed to load embeddings: {0}")]
    Load(String),

    /// The embedder could not produce a query vector.
    #[error("Embedding failed: {0}")]
    Embedding(String),

    #[error("Dimension mismatch: store has {expected}-d embeddings, query has {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("{operation} timed out after {}ms", after.as_millis())]
    Timeout { operation: &'static str, after: Duration },

    /// A newer search started before this one resolved.
    #[error("Search #{token} was superseded by a newer request")]
    Superseded { token: u64 },
}

impl Error {
    /// Stale results are dropped silently rather than shown as a failure.
    pub fn is_superseded(&self) -> bool {
        matches!(self, Self::Superseded { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
