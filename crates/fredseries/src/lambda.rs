//! AWS Lambda request handlers.
//!
//! Both handlers receive the shared SDK client and build a repository scoped
//! to the invocation.

use aws_sdk_dynamodb::Client;
use lambda_runtime::{Error, LambdaEvent};
use serde::Serialize;
use serde_json::Value;

use crate::config::Config;
use crate::importer::{run_import, ImportReport};
use crate::query::handle_query_event;
use crate::storage::DynamoDbRepository;

/// Import handler response: status 0 plus the run report.
#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub status: i32,
    #[serde(flatten)]
    pub report: ImportReport,
}

/// Runs an import. The event payload is ignored.
pub async fn import_handler(
    client: &Client,
    http: &reqwest::Client,
    config: &Config,
    _event: LambdaEvent<Value>,
) -> Result<ImportResponse, Error> {
    let repo = DynamoDbRepository::new(client.clone(), config.table.clone());
    let report = run_import(&repo, config, http).await?;
    Ok(ImportResponse { status: 0, report })
}

/// Answers a lookup for `params.path.val`.
pub async fn query_handler(
    client: &Client,
    config: &Config,
    event: LambdaEvent<Value>,
) -> Result<Value, Error> {
    let repo = DynamoDbRepository::new(client.clone(), config.table.clone());
    let response = handle_query_event(&repo, &event.payload).await?;
    Ok(serde_json::to_value(response)?)
}
