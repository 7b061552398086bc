//! Date lookup against the observation table.

use fredseries_core::query::{QueryKey, QueryResponse};
use fredseries_core::storage::{ObservationRepository, RepositoryError};
use serde_json::Value;

/// Looks up every item stored under `key`.
///
/// Without a key the literal error response is returned and the repository
/// is not touched.
pub async fn handle_query<R: ObservationRepository + ?Sized>(
    repo: &R,
    key: Option<QueryKey>,
) -> Result<QueryResponse, RepositoryError> {
    let Some(key) = key else {
        tracing::warn!("Query without a key");
        return Ok(QueryResponse::missing_key());
    };

    let items = repo.query_by_date(key.as_str()).await?;
    tracing::debug!(date = key.as_str(), items = items.len(), "Query handled");
    Ok(QueryResponse::Items(items))
}

/// Same as [`handle_query`], with the key taken from `params.path.val`.
pub async fn handle_query_event<R: ObservationRepository + ?Sized>(
    repo: &R,
    event: &Value,
) -> Result<QueryResponse, RepositoryError> {
    handle_query(repo, QueryKey::from_event(event)).await
}
