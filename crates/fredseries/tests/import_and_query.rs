//! Import and query flows against the in-memory repository.

use fredseries::importer::{ensure_table, load_csv};
use fredseries::query::{handle_query, handle_query_event};
use fredseries::storage::InMemoryRepository;
use fredseries_core::query::{QueryKey, QueryResponse};
use fredseries_core::table::{fred_table_config, ActivationPolicy};
use serde_json::json;
use std::time::Duration;

const CSV: &str = "date,DCOILWTICO\n2020-01-02,61.06\n2020-01-03,61.18\n";

fn fast_policy() -> ActivationPolicy {
    ActivationPolicy {
        poll_interval: Duration::from_millis(1),
        max_attempts: 5,
    }
}

async fn import(repo: &InMemoryRepository, csv: &str) -> usize {
    ensure_table(repo, &fred_table_config(), fast_policy())
        .await
        .unwrap();
    load_csv(repo, csv.as_bytes()).await.unwrap().items_written
}

async fn query(repo: &InMemoryRepository, date: &str) -> serde_json::Value {
    let response = handle_query(repo, QueryKey::parse(Some(date)))
        .await
        .unwrap();
    serde_json::to_value(response).unwrap()
}

#[tokio::test]
async fn test_import_then_query_date() {
    let repo = InMemoryRepository::new(fred_table_config()).with_creation_delay(1);

    assert_eq!(import(&repo, CSV).await, 2);

    assert_eq!(
        query(&repo, "2020-01-02").await,
        json!([{"date": "2020-01-02", "DCOILWTICO": "61.06"}])
    );
    assert_eq!(repo.create_calls(), 1);
}

#[tokio::test]
async fn test_reimport_is_idempotent() {
    let repo = InMemoryRepository::new(fred_table_config());

    import(&repo, CSV).await;
    let first = repo.observations().await;
    import(&repo, CSV).await;

    assert_eq!(repo.observations().await, first);
    assert_eq!(repo.create_calls(), 1);
}

#[tokio::test]
async fn test_every_row_becomes_one_observation() {
    let repo = InMemoryRepository::new(fred_table_config());
    let mut csv = String::from("DATE,DCOILWTICO\n");
    for day in 1..=28 {
        for month in 1..=3 {
            csv.push_str(&format!("2021-{month:02}-{day:02},{}.5\n", 40 + day));
        }
    }

    let written = import(&repo, &csv).await;

    assert_eq!(written, 84);
    assert_eq!(repo.observations().await.len(), 84);
    assert_eq!(repo.batch_write_calls(), 4);
}

#[tokio::test]
async fn test_missing_value_sentinel_is_stored() {
    let repo = InMemoryRepository::new(fred_table_config());

    import(&repo, "DATE,DCOILWTICO\n2020-01-01,.\n").await;

    assert_eq!(
        query(&repo, "2020-01-01").await,
        json!([{"date": "2020-01-01", "DCOILWTICO": "."}])
    );
}

#[tokio::test]
async fn test_absent_date_returns_empty_list() {
    let repo = InMemoryRepository::new(fred_table_config());
    import(&repo, CSV).await;

    assert_eq!(query(&repo, "2019-12-31").await, json!([]));
}

#[tokio::test]
async fn test_missing_key_does_not_touch_table() {
    let repo = InMemoryRepository::new(fred_table_config());
    import(&repo, CSV).await;

    for event in [json!({}), json!({"params": {}}), json!({"params": {"path": {"val": ""}}})] {
        let response = handle_query_event(&repo, &event).await.unwrap();
        assert_eq!(response, QueryResponse::missing_key());
    }
    assert_eq!(repo.query_calls(), 0);
}

#[tokio::test]
async fn test_query_never_created_table() {
    let repo = InMemoryRepository::new(fred_table_config());

    assert_eq!(query(&repo, "2020-01-02").await, json!([]));
    assert_eq!(repo.describe_calls(), 0);
}
