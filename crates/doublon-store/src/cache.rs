//! Time-bounded caching around another store.

use std::{future::Future, time::Duration};

use async_trait::async_trait;
use tokio::{sync::Mutex, time::Instant};
use tracing::trace;

use crate::{Brand, CandidateStore, Controversy, Proposition, StoreError};

/// A collection fetched at a known instant.
type Slot<T> = Mutex<Option<(Instant, Vec<T>)>>;

/// Wraps a store and reuses fetched collections until they are `ttl` old.
///
/// Errors are never cached: a failed fetch leaves the previous entry (if any) untouched and
/// the next call tries again.
#[derive(Debug)]
pub struct CachedStore<S> {
    /// Store being cached.
    inner: S,
    /// Entry lifetime.
    ttl: Duration,
    /// Cached brands.
    brands: Slot<Brand>,
    /// Cached controversies.
    controversies: Slot<Controversy>,
    /// Cached pending propositions.
    propositions: Slot<Proposition>,
}

impl<S> CachedStore<S> {
    /// Wraps `inner` with entries living for `ttl`.
    pub fn new(inner: S, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            brands: Mutex::new(None),
            controversies: Mutex::new(None),
            propositions: Mutex::new(None),
        }
    }

    /// The wrapped store.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Drops every cached collection.
    pub async fn invalidate(&self) {
        *self.brands.lock().await = None;
        *self.controversies.lock().await = None;
        *self.propositions.lock().await = None;
    }
}

/// Returns the cached collection in `slot` if fresh, otherwise runs `fetch` and stores it.
async fn cached<T, F>(
    slot: &Slot<T>,
    ttl: Duration,
    name: &str,
    fetch: F,
) -> Result<Vec<T>, StoreError>
where
    T: Clone,
    F: Future<Output = Result<Vec<T>, StoreError>>,
{
    let mut entry = slot.lock().await;
    if let Some((fetched_at, items)) = entry.as_ref()
        && fetched_at.elapsed() < ttl
    {
        trace!(collection = name, "cache hit");
        return Ok(items.clone());
    }

    let items = fetch.await?;
    trace!(collection = name, count = items.len(), "cache refreshed");
    *entry = Some((Instant::now(), items.clone()));
    Ok(items)
}

#[async_trait]
impl<S: CandidateStore> CandidateStore for CachedStore<S> {
    async fn brands(&self) -> Result<Vec<Brand>, StoreError> {
        cached(&self.brands, self.ttl, "brands", self.inner.brands()).await
    }

    async fn approved_controversies(&self) -> Result<Vec<Controversy>, StoreError> {
        cached(
            &self.controversies,
            self.ttl,
            "controversies",
            self.inner.approved_controversies(),
        )
        .await
    }

    async fn pending_propositions(&self) -> Result<Vec<Proposition>, StoreError> {
        cached(
            &self.propositions,
            self.ttl,
            "propositions",
            self.inner.pending_propositions(),
        )
        .await
    }

    fn describe(&self) -> String {
        format!("{} (cached {}s)", self.inner.describe(), self.ttl.as_secs())
    }
}
