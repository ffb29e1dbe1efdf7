//! The candidate search orchestrator.

use doublon_config::{Config, LimitSettings};
use doublon_similarity::{GATE_THRESHOLD, Thresholds};
use doublon_store::{CandidateStore, StoreError};
use tracing::{debug, error};

use crate::{EngineError, Query, QueryKind, ResultBundle, rank};

/// Tunables of a search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectorSettings {
    /// Inclusion and labeling cutoffs. Only `low` filters results.
    pub thresholds: Thresholds,
    /// Per-collection result caps.
    pub limits: LimitSettings,
    /// Minimum brand name similarity for controversies and propositions.
    pub gate: f64,
}

impl Default for DetectorSettings {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            limits: LimitSettings::default(),
            gate: GATE_THRESHOLD,
        }
    }
}

impl From<&Config> for DetectorSettings {
    fn from(config: &Config) -> Self {
        Self {
            thresholds: Thresholds {
                low: config.thresholds.low,
                medium: config.thresholds.medium,
                high: config.thresholds.high,
            },
            limits: config.limits,
            gate: config.matching.gate,
        }
    }
}

/// Searches a store for records resembling a query.
///
/// Holds no state between calls: every search fetches full collections from the store.
#[derive(Debug, Clone)]
pub struct Detector<S> {
    /// Where candidates come from.
    store: S,
    /// Search tunables.
    settings: DetectorSettings,
}

impl<S: CandidateStore> Detector<S> {
    /// Creates a detector with default settings.
    pub fn new(store: S) -> Self {
        Self::with_settings(store, DetectorSettings::default())
    }

    /// Creates a detector with explicit settings.
    pub fn with_settings(store: S, settings: DetectorSettings) -> Self {
        Self { store, settings }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Search tunables.
    pub fn settings(&self) -> &DetectorSettings {
        &self.settings
    }

    /// Finds brands, controversies and propositions resembling `query`.
    ///
    /// Brand queries only search brands. Controversy queries also search approved
    /// controversies and pending propositions, keeping only those whose brand name clears the
    /// gate. Each list is sorted best first and capped. A store failure aborts the whole
    /// search.
    pub async fn find_similar(&self, query: &Query) -> Result<ResultBundle, EngineError> {
        let DetectorSettings {
            thresholds,
            limits,
            gate,
        } = self.settings;

        let bundle = match query.kind {
            QueryKind::Brand => {
                let brands = self.store.brands().await.map_err(log_store_error)?;
                ResultBundle {
                    brands: rank(query, brands, None, thresholds.low, limits.brands),
                    ..ResultBundle::default()
                }
            }
            QueryKind::Controversy => {
                let (brands, controversies, propositions) = tokio::try_join!(
                    self.store.brands(),
                    self.store.approved_controversies(),
                    self.store.pending_propositions(),
                )
                .map_err(log_store_error)?;
                debug!(
                    brands = brands.len(),
                    controversies = controversies.len(),
                    propositions = propositions.len(),
                    "fetched candidates"
                );
                ResultBundle {
                    brands: rank(query, brands, None, thresholds.low, limits.brands),
                    controversies: rank(
                        query,
                        controversies,
                        Some(gate),
                        thresholds.low,
                        limits.controversies,
                    ),
                    propositions: rank(
                        query,
                        propositions,
                        Some(gate),
                        thresholds.low,
                        limits.propositions,
                    ),
                }
            }
        };

        debug!(
            kind = %query.kind,
            brand = %query.brand_name,
            brands = bundle.brands.len(),
            controversies = bundle.controversies.len(),
            propositions = bundle.propositions.len(),
            "similarity search finished"
        );
        Ok(bundle)
    }
}

/// Logs a failed fetch before it is returned to the caller.
fn log_store_error(err: StoreError) -> EngineError {
    error!(error = %err, "failed to fetch candidates");
    EngineError::Store(err)
}
