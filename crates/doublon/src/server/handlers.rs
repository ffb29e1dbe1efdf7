//! Route handlers.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use doublon_engine::{Query as SimilarityQuery, ResultBundle, SearchParams};
use serde_json::{Value, json};
use tracing::debug;

use super::{AppError, AppResult, AppState};

/// `GET /api/v1/similar`: searches for records resembling the query string.
pub async fn similar(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> AppResult<Json<ResultBundle>> {
    let Query(params) = params.map_err(|e| AppError::bad_request(e.body_text()))?;
    let query = SimilarityQuery::try_from(params)?;
    debug!(kind = %query.kind, brand = %query.brand_name, "similarity request");

    let bundle = state.detector.find_similar(&query).await?;
    Ok(Json(bundle))
}

/// `GET /health`: reports that the service is up.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
