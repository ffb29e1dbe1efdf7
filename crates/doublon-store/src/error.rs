//! Error types for the doublon-store crate.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors that can occur while fetching candidate collections.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to read a snapshot file.
    #[error("failed to read store snapshot {path}: {source}")]
    ReadSnapshot {
        /// Path of the snapshot.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A snapshot file is not valid JSON or has the wrong shape.
    #[error("failed to parse store snapshot {path}: {source}")]
    ParseSnapshot {
        /// Path of the snapshot.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// The store configuration cannot be used.
    #[error("invalid store configuration: {0}")]
    Config(String),

    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// An HTTP request to the backend failed.
    #[error("request for {collection} failed: {source}")]
    Request {
        /// Collection being fetched.
        collection: String,
        /// Underlying HTTP client error.
        source: reqwest::Error,
    },

    /// The backend answered with an error status.
    #[error("backend returned {status} for {collection}")]
    Status {
        /// Collection being fetched.
        collection: String,
        /// HTTP status code.
        status: u16,
    },
}
