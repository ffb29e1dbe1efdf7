//! Error types for the doublon-engine crate.

use doublon_store::StoreError;
use thiserror::Error;

/// Errors that stop a similarity search.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Required query parameters are absent or blank.
    #[error("missing required parameters: {}", .0.join(", "))]
    MissingParameters(Vec<&'static str>),

    /// The `type` parameter names no known query kind.
    #[error("unknown type {0:?}, expected \"marque\" or \"evenement\"")]
    InvalidKind(String),

    /// A candidate collection could not be fetched.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl EngineError {
    /// Whether the caller sent a bad request, as opposed to a backend failure.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::MissingParameters(_) | Self::InvalidKind(_))
    }
}
