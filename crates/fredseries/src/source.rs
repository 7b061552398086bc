//! CSV source fetch (Imperative Shell).

use crate::error::Result;

/// Downloads the CSV body at `url`.
///
/// Non-success HTTP statuses are errors. No retries.
pub async fn fetch_csv(client: &reqwest::Client, url: &str) -> Result<Vec<u8>> {
    tracing::debug!(url, "Fetching CSV source");

    let body = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .bytes()
        .await?;

    tracing::debug!(url, bytes = body.len(), "Fetched CSV source");
    Ok(body.to_vec())
}
