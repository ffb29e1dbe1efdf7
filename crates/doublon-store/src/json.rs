//! JSON snapshot adapter.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::{Brand, CandidateStore, Controversy, Proposition, StoreError, decode::decode_rows};

/// On-disk layout of a snapshot file.
///
/// ```json
/// { "marques": [], "evenements": [], "propositions": [] }
/// ```
///
/// Missing collections are treated as empty, and records that do not decode are skipped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Brands.
    #[serde(rename = "marques", alias = "brands", default)]
    pub brands: Vec<Brand>,
    /// Approved controversies.
    #[serde(rename = "evenements", alias = "controversies", default)]
    pub controversies: Vec<Controversy>,
    /// Propositions in any moderation state.
    #[serde(default)]
    pub propositions: Vec<Proposition>,
}

/// The snapshot with its records still undecoded.
#[derive(Debug, Default, Deserialize)]
struct RawSnapshot {
    /// Brand rows.
    #[serde(rename = "marques", alias = "brands", default)]
    brands: Vec<Value>,
    /// Controversy rows.
    #[serde(rename = "evenements", alias = "controversies", default)]
    controversies: Vec<Value>,
    /// Proposition rows.
    #[serde(default)]
    propositions: Vec<Value>,
}

/// A store reading a JSON snapshot file.
///
/// The file is re-read on every fetch so edits are picked up without a restart.
#[derive(Debug, Clone)]
pub struct JsonStore {
    /// Snapshot location.
    path: PathBuf,
}

impl JsonStore {
    /// Creates a store for the snapshot at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Snapshot location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and parses the snapshot.
    pub async fn load(&self) -> Result<Snapshot, StoreError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| StoreError::ReadSnapshot {
                path: self.path.clone(),
                source,
            })?;
        let raw: RawSnapshot =
            serde_json::from_slice(&bytes).map_err(|source| StoreError::ParseSnapshot {
                path: self.path.clone(),
                source,
            })?;
        let snapshot = Snapshot {
            brands: decode_rows("marques", raw.brands),
            controversies: decode_rows("evenements", raw.controversies),
            propositions: decode_rows("propositions", raw.propositions),
        };
        debug!(
            path = %self.path.display(),
            brands = snapshot.brands.len(),
            controversies = snapshot.controversies.len(),
            propositions = snapshot.propositions.len(),
            "loaded snapshot"
        );
        Ok(snapshot)
    }
}

#[async_trait]
impl CandidateStore for JsonStore {
    async fn brands(&self) -> Result<Vec<Brand>, StoreError> {
        Ok(self.load().await?.brands)
    }

    async fn approved_controversies(&self) -> Result<Vec<Controversy>, StoreError> {
        Ok(self.load().await?.controversies)
    }

    async fn pending_propositions(&self) -> Result<Vec<Proposition>, StoreError> {
        let mut propositions = self.load().await?.propositions;
        propositions.retain(Proposition::is_pending);
        Ok(propositions)
    }

    fn describe(&self) -> String {
        format!("json snapshot {}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    /// Writes `content` as `snapshot.json` in `dir`.
    fn write_snapshot(dir: &tempfile::TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("snapshot.json");
        fs::write(&path, content).unwrap();
        path
    }

    #[tokio::test]
    async fn reads_all_collections() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_snapshot(
            &dir,
            r#"{
                "marques": [{"id": 1, "nom": "Acme Corp"}, {"id": 2, "nom": "Globex"}],
                "evenements": [{"id": 10, "marque_nom": "Acme Corp", "titre": "Fuite"}],
                "propositions": [
                    {"id": 20, "marque_nom": "Acme", "statut": "en_attente"},
                    {"id": 21, "marque_nom": "Acme", "statut": "rejete"},
                    {"id": 22, "marque_nom": "Acme"}
                ]
            }"#,
        );
        let store = JsonStore::new(&path);

        assert_eq!(store.brands().await.unwrap().len(), 2);
        assert_eq!(store.approved_controversies().await.unwrap().len(), 1);

        let pending = store.pending_propositions().await.unwrap();
        let ids: Vec<String> = pending.iter().map(|p| p.id.to_string()).collect();
        assert_eq!(ids, vec!["20", "22"]);
    }

    #[tokio::test]
    async fn missing_collections_are_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_snapshot(&dir, r#"{"marques": [{"id": 1, "nom": "Acme"}]}"#);
        let store = JsonStore::new(path);

        assert!(store.approved_controversies().await.unwrap().is_empty());
        assert!(store.pending_propositions().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn picks_up_edits_between_fetches() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_snapshot(&dir, r#"{"marques": []}"#);
        let store = JsonStore::new(&path);
        assert!(store.brands().await.unwrap().is_empty());

        fs::write(&path, r#"{"marques": [{"id": 1, "nom": "Acme"}]}"#).unwrap();
        assert_eq!(store.brands().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("absent.json"));

        let err = store.brands().await.unwrap_err();
        assert!(matches!(err, StoreError::ReadSnapshot { .. }));
    }

    #[tokio::test]
    async fn malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_snapshot(&dir, r#"{"marques": [{"id": 1, "nom": "Acme"}"#);
        let store = JsonStore::new(path);

        let err = store.brands().await.unwrap_err();
        assert!(matches!(err, StoreError::ParseSnapshot { .. }));
        assert!(err.to_string().contains("snapshot.json"));
    }

    #[tokio::test]
    async fn collection_of_wrong_type_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_snapshot(&dir, r#"{"marques": {"id": 1}}"#);
        let store = JsonStore::new(path);

        let err = store.brands().await.unwrap_err();
        assert!(matches!(err, StoreError::ParseSnapshot { .. }));
    }

    #[tokio::test]
    async fn bad_records_do_not_hide_good_ones() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_snapshot(
            &dir,
            r#"{
                "marques": [{"id": 1, "nom": "Acme Corp"}, {"id": 2}],
                "evenements": [{"id": 10, "titre": "no brand"}],
                "propositions": [
                    {"id": 20, "marque_nom": "Acme Corp", "statut": "en_attente"},
                    {"id": 21, "marque_nom": "Acme Corp", "statut": null},
                    {"id": 22, "marque_nom": "Acme Corp", "statut": "archive"}
                ]
            }"#,
        );
        let store = JsonStore::new(path);

        let brands = store.brands().await.unwrap();
        assert_eq!(brands.len(), 1);
        assert_eq!(brands[0].name, "Acme Corp");
        assert!(store.approved_controversies().await.unwrap().is_empty());

        let pending = store.pending_propositions().await.unwrap();
        let ids: Vec<String> = pending.iter().map(|p| p.id.to_string()).collect();
        assert_eq!(ids, vec!["20", "21"]);
    }
}
