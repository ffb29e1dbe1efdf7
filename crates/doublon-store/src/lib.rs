//! Candidate records and the stores that serve them.
//!
//! The detection engine compares a query against three collections: brands, approved
//! controversies and pending propositions. This crate defines those records and the
//! [`CandidateStore`] seam behind which they are fetched.
//!
//! Adapters:
//! - [`MemoryStore`] holds collections in process.
//! - [`JsonStore`] reads a JSON snapshot file on every fetch.
//! - [`RestStore`] queries a PostgREST-style HTTP backend.
//! - [`CachedStore`] wraps any store and keeps fetched collections for a fixed TTL.
//!
//! [`open_store`] builds the adapter described by a [`StoreSettings`](doublon_config::StoreSettings).

#![warn(missing_docs)]

mod cache;
mod decode;
mod error;
mod json;
mod memory;
mod model;
mod open;
mod rest;

use std::sync::Arc;

use async_trait::async_trait;
pub use cache::CachedStore;
pub use error::StoreError;
pub use json::{JsonStore, Snapshot};
pub use memory::MemoryStore;
pub use model::{Brand, Controversy, Proposition, PropositionStatus, RecordId};
pub use open::open_store;
pub use rest::RestStore;

/// Read access to the candidate collections.
///
/// Each call returns a fresh, full collection. Implementations must filter at the source:
/// `approved_controversies` returns only published controversies and `pending_propositions`
/// only propositions still awaiting moderation.
#[async_trait]
pub trait CandidateStore: Send + Sync {
    /// Every tracked brand.
    async fn brands(&self) -> Result<Vec<Brand>, StoreError>;

    /// Every moderator-approved controversy.
    async fn approved_controversies(&self) -> Result<Vec<Controversy>, StoreError>;

    /// Every proposition with a pending status.
    async fn pending_propositions(&self) -> Result<Vec<Proposition>, StoreError>;

    /// Short human-readable description of where records come from.
    fn describe(&self) -> String;
}

#[async_trait]
impl<T: CandidateStore + ?Sized> CandidateStore for Arc<T> {
    async fn brands(&self) -> Result<Vec<Brand>, StoreError> {
        (**self).brands().await
    }

    async fn approved_controversies(&self) -> Result<Vec<Controversy>, StoreError> {
        (**self).approved_controversies().await
    }

    async fn pending_propositions(&self) -> Result<Vec<Proposition>, StoreError> {
        (**self).pending_propositions().await
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
