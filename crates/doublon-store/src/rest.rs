//! PostgREST-style HTTP adapter.

use std::time::Duration;

use async_trait::async_trait;
use doublon_config::TableNames;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::{
    Brand, CandidateStore, Controversy, Proposition, PropositionStatus, StoreError,
    decode::decode_rows,
};

/// A store backed by a PostgREST-style REST API.
///
/// Each collection is a table fetched with `GET {base}/{table}?select=*`. Moderation status is
/// filtered server-side: `statut=eq.approuve` for controversies, `statut=eq.en_attente` for
/// propositions.
#[derive(Debug, Clone)]
pub struct RestStore {
    /// HTTP client.
    client: Client,
    /// Base URL, always ending in `/`.
    base: Url,
    /// Table names.
    tables: TableNames,
    /// Key sent as `apikey` and bearer token.
    api_key: Option<String>,
}

impl RestStore {
    /// Creates a store for the backend at `base`.
    pub fn new(
        base: &str,
        tables: TableNames,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, StoreError> {
        let mut base =
            Url::parse(base).map_err(|e| StoreError::Config(format!("invalid URL {base}: {e}")))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(StoreError::Client)?;

        Ok(Self {
            client,
            base,
            tables,
            api_key,
        })
    }

    /// Base URL requests are resolved against.
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Builds the URL fetching `table` with the extra `filters` applied.
    pub fn collection_url(&self, table: &str, filters: &[(&str, &str)]) -> Result<Url, StoreError> {
        let mut url = self
            .base
            .join(table)
            .map_err(|e| StoreError::Config(format!("invalid table name {table}: {e}")))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("select", "*");
            for (key, value) in filters {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// Fetches one table and decodes its rows, skipping those that do not fit `T`.
    async fn fetch<T: DeserializeOwned>(
        &self,
        table: &str,
        filters: &[(&str, &str)],
    ) -> Result<Vec<T>, StoreError> {
        let url = self.collection_url(table, filters)?;
        debug!(%url, "fetching collection");

        let mut request = self.client.get(url);
        if let Some(key) = &self.api_key {
            request = request.header("apikey", key).bearer_auth(key);
        }

        let request_error = |source| StoreError::Request {
            collection: table.to_string(),
            source,
        };
        let response = request.send().await.map_err(request_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Status {
                collection: table.to_string(),
                status: status.as_u16(),
            });
        }
        let rows: Vec<Value> = response.json().await.map_err(request_error)?;
        let received = rows.len();
        let records: Vec<T> = decode_rows(table, rows);
        debug!(table, received, decoded = records.len(), "fetched collection");
        Ok(records)
    }
}

/// PostgREST equality filter on a moderation status.
fn status_filter(status: PropositionStatus) -> String {
    format!("eq.{}", status.as_str())
}

#[async_trait]
impl CandidateStore for RestStore {
    async fn brands(&self) -> Result<Vec<Brand>, StoreError> {
        self.fetch(&self.tables.brands, &[]).await
    }

    async fn approved_controversies(&self) -> Result<Vec<Controversy>, StoreError> {
        let filter = status_filter(PropositionStatus::Approved);
        self.fetch(&self.tables.controversies, &[("statut", filter.as_str())])
            .await
    }

    async fn pending_propositions(&self) -> Result<Vec<Proposition>, StoreError> {
        let filter = status_filter(PropositionStatus::Pending);
        self.fetch(&self.tables.propositions, &[("statut", filter.as_str())])
            .await
    }

    fn describe(&self) -> String {
        format!("rest backend {}", self.base)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Json, Router,
        extract::{Path, RawQuery, State},
        http::{HeaderMap, StatusCode},
        response::{IntoResponse, Response},
        routing::get,
    };
    use serde_json::json;
    use tokio::net::TcpListener;

    use super::*;

    /// A request as the fake backend saw it.
    #[derive(Debug, Clone)]
    struct Received {
        /// Table from the path.
        table: String,
        /// Raw query string.
        query: String,
        /// `apikey` header.
        apikey: Option<String>,
        /// `Authorization` header.
        authorization: Option<String>,
    }

    /// Requests received by the fake backend.
    type Log = Arc<Mutex<Vec<Received>>>;

    /// Serves canned rows per table; any other table answers 503.
    async fn table_rows(
        State(log): State<Log>,
        Path(table): Path<String>,
        RawQuery(query): RawQuery,
        headers: HeaderMap,
    ) -> Response {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        log.lock().unwrap().push(Received {
            table: table.clone(),
            query: query.unwrap_or_default(),
            apikey: header("apikey"),
            authorization: header("authorization"),
        });

        let rows = match table.as_str() {
            "marques" => json!([{"id": 1, "nom": "Acme Corp", "secteur": "chimie"}, {"id": 2}]),
            "evenements" => json!([{
                "id": 10,
                "marque_nom": "Acme Corp",
                "titre": "Pollution",
                "date": "2023-03-14T00:00:00",
                "statut": "approuve"
            }]),
            "propositions" => json!([
                {"id": 20, "marque_nom": "Acme Corp", "statut": "en_attente"},
                {"id": 21, "marque_nom": "Acme Corp", "statut": null}
            ]),
            _ => return StatusCode::SERVICE_UNAVAILABLE.into_response(),
        };
        Json(rows).into_response()
    }

    /// Starts the fake backend on an ephemeral port, returning its base URL and request log.
    async fn backend() -> (String, Log) {
        let log = Log::default();
        let app = Router::new()
            .route("/rest/v1/{table}", get(table_rows))
            .with_state(Arc::clone(&log));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        (format!("http://{addr}/rest/v1"), log)
    }

    /// A store for `base` with the given key.
    fn keyed(base: &str, key: Option<&str>) -> RestStore {
        RestStore::new(
            base,
            TableNames::default(),
            key.map(str::to_string),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn fetches_and_decodes_brands() {
        let (base, log) = backend().await;
        let store = keyed(&base, Some("secret"));

        let brands = store.brands().await.unwrap();

        assert_eq!(brands.len(), 1);
        assert_eq!(brands[0].name, "Acme Corp");
        assert_eq!(brands[0].extra["secteur"], "chimie");

        let seen = log.lock().unwrap().clone();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].table, "marques");
        assert_eq!(seen[0].query, "select=*");
        assert_eq!(seen[0].apikey.as_deref(), Some("secret"));
        assert_eq!(seen[0].authorization.as_deref(), Some("Bearer secret"));
    }

    #[tokio::test]
    async fn filters_by_status_on_the_wire() {
        let (base, log) = backend().await;
        let store = keyed(&base, None);

        let controversies = store.approved_controversies().await.unwrap();
        let propositions = store.pending_propositions().await.unwrap();

        assert_eq!(controversies.len(), 1);
        assert_eq!(controversies[0].occurred_on.as_deref(), Some("2023-03-14T00:00:00"));
        assert_eq!(propositions.len(), 2);
        assert!(propositions.iter().all(Proposition::is_pending));

        let seen = log.lock().unwrap().clone();
        assert_eq!(seen[0].table, "evenements");
        assert_eq!(seen[0].query, "select=*&statut=eq.approuve");
        assert_eq!(seen[1].table, "propositions");
        assert_eq!(seen[1].query, "select=*&statut=eq.en_attente");
        assert!(seen.iter().all(|r| r.apikey.is_none() && r.authorization.is_none()));
    }

    #[tokio::test]
    async fn error_status_is_reported() {
        let (base, _log) = backend().await;
        let tables = TableNames {
            brands: String::from("offline"),
            ..TableNames::default()
        };
        let store = RestStore::new(&base, tables, None, Duration::from_secs(5)).unwrap();

        let err = store.brands().await.unwrap_err();

        match err {
            StoreError::Status { collection, status } => {
                assert_eq!(collection, "offline");
                assert_eq!(status, 503);
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreachable_backend_is_request_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let store = keyed(&format!("http://{addr}/rest/v1"), None);

        let err = store.brands().await.unwrap_err();
        assert!(matches!(err, StoreError::Request { .. }));
    }

    /// A store for `base` without credentials.
    fn store(base: &str) -> RestStore {
        RestStore::new(base, TableNames::default(), None, Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn base_gets_trailing_slash() {
        let store = store("https://db.example.com/rest/v1");
        assert_eq!(store.base().as_str(), "https://db.example.com/rest/v1/");
    }

    #[test]
    fn collection_url_selects_all() {
        let store = store("https://db.example.com/rest/v1/");
        let url = store.collection_url("marques", &[]).unwrap();
        assert_eq!(url.as_str(), "https://db.example.com/rest/v1/marques?select=*");
    }

    #[test]
    fn collection_url_appends_filters() {
        let store = store("https://db.example.com/rest/v1");
        let url = store
            .collection_url("propositions", &[("statut", "eq.en_attente")])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://db.example.com/rest/v1/propositions?select=*&statut=eq.en_attente"
        );
    }

    #[test]
    fn status_filters() {
        assert_eq!(status_filter(PropositionStatus::Approved), "eq.approuve");
        assert_eq!(status_filter(PropositionStatus::Pending), "eq.en_attente");
    }

    #[test]
    fn invalid_base_is_config_error() {
        let err = RestStore::new("not a url", TableNames::default(), None, Duration::from_secs(1))
            .unwrap_err();
        assert!(matches!(err, StoreError::Config(_)));
    }

    #[test]
    fn describe_names_backend() {
        let store = store("https://db.example.com/rest/v1");
        assert_eq!(store.describe(), "rest backend https://db.example.com/rest/v1/");
    }
}
