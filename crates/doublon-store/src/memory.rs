//! In-process candidate collections.

use async_trait::async_trait;

use crate::{Brand, CandidateStore, Controversy, Proposition, StoreError};

/// A store holding its collections in memory.
///
/// Useful when embedding the engine next to an existing data layer, and in tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    /// Brands.
    pub brands: Vec<Brand>,
    /// Approved controversies.
    pub controversies: Vec<Controversy>,
    /// Propositions in any moderation state.
    pub propositions: Vec<Proposition>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds brands.
    pub fn with_brands(mut self, brands: impl IntoIterator<Item = Brand>) -> Self {
        self.brands.extend(brands);
        self
    }

    /// Adds controversies.
    pub fn with_controversies(mut self, items: impl IntoIterator<Item = Controversy>) -> Self {
        self.controversies.extend(items);
        self
    }

    /// Adds propositions.
    pub fn with_propositions(mut self, items: impl IntoIterator<Item = Proposition>) -> Self {
        self.propositions.extend(items);
        self
    }
}

#[async_trait]
impl CandidateStore for MemoryStore {
    async fn brands(&self) -> Result<Vec<Brand>, StoreError> {
        Ok(self.brands.clone())
    }

    async fn approved_controversies(&self) -> Result<Vec<Controversy>, StoreError> {
        Ok(self.controversies.clone())
    }

    async fn pending_propositions(&self) -> Result<Vec<Proposition>, StoreError> {
        Ok(self
            .propositions
            .iter()
            .filter(|p| p.is_pending())
            .cloned()
            .collect())
    }

    fn describe(&self) -> String {
        String::from("memory")
    }
}
