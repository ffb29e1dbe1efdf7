//! Building a store from configuration.

use std::{env, sync::Arc, time::Duration};

use doublon_config::{StoreBackend, StoreSettings};
use tracing::{debug, warn};

use crate::{CachedStore, CandidateStore, JsonStore, RestStore, StoreError};

/// Opens the store described by `settings`.
///
/// The JSON backend needs `store.path`, the REST backend needs `store.url`. When
/// `cache_ttl_secs` is non-zero the store is wrapped in a [`CachedStore`].
pub fn open_store(settings: &StoreSettings) -> Result<Arc<dyn CandidateStore>, StoreError> {
    let store: Arc<dyn CandidateStore> = match settings.backend {
        StoreBackend::Json => {
            let path = settings.path.as_ref().ok_or_else(|| {
                StoreError::Config(String::from("store.path is required for the json backend"))
            })?;
            wrap(JsonStore::new(path), settings.cache_ttl_secs)
        }
        StoreBackend::Rest => {
            let url = settings.url.as_deref().ok_or_else(|| {
                StoreError::Config(String::from("store.url is required for the rest backend"))
            })?;
            let api_key = env::var(&settings.api_key_env).ok();
            if api_key.is_none() {
                warn!(var = %settings.api_key_env, "API key not set, sending anonymous requests");
            }
            let store = RestStore::new(
                url,
                settings.tables.clone(),
                api_key,
                Duration::from_secs(settings.timeout_secs),
            )?;
            wrap(store, settings.cache_ttl_secs)
        }
    };

    debug!(store = %store.describe(), "opened candidate store");
    Ok(store)
}

/// Boxes `store`, adding a cache layer when `ttl_secs` is non-zero.
fn wrap<S: CandidateStore + 'static>(store: S, ttl_secs: u64) -> Arc<dyn CandidateStore> {
    if ttl_secs == 0 {
        Arc::new(store)
    } else {
        Arc::new(CachedStore::new(store, Duration::from_secs(ttl_secs)))
    }
}
