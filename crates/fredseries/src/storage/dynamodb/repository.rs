//! DynamoDB repository implementation.
//!
//! Implements the storage traits from `fredseries_core::storage` using DynamoDB.

use std::fmt::Debug;
use std::future::Future;

use async_trait::async_trait;
use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::create_table::CreateTableError;
use aws_sdk_dynamodb::types::{
    AttributeDefinition, AttributeValue, BillingMode, KeySchemaElement, KeyType,
    ProvisionedThroughput, PutRequest, ScalarAttributeType, WriteRequest,
};
use aws_sdk_dynamodb::Client;

use fredseries_core::observation::Observation;
use fredseries_core::storage::{
    CreateTableOutcome, Item, ObservationRepository, RepositoryError, Result, TableProvisioner,
};
use fredseries_core::table::{TableConfig, TableState};

use super::conversions::{item_to_json, observation_to_item, table_status_from_sdk};
use super::error::{
    map_batch_write_error, map_create_table_error, map_describe_table_error, map_query_error,
};

/// Rounds of unprocessed-item resubmission before a batch is declared failed.
const MAX_WRITE_ROUNDS: usize = 5;

/// DynamoDB-based repository implementation.
///
/// Bound to a single table and key schema.
pub struct DynamoDbRepository {
    client: Client,
    config: TableConfig,
}

impl DynamoDbRepository {
    /// Creates a new repository with the given DynamoDB client and table config.
    pub fn new(client: Client, config: TableConfig) -> Self {
        Self { client, config }
    }

    /// Get the table name.
    pub fn table_name(&self) -> &str {
        &self.config.table_name
    }

    fn put_request(&self, observation: &Observation) -> Result<WriteRequest> {
        let put = PutRequest::builder()
            .set_item(Some(observation_to_item(
                &self.config.key_schema,
                observation,
            )))
            .build()
            .map_err(|e| RepositoryError::InvalidData(e.to_string()))?;

        Ok(WriteRequest::builder().put_request(put).build())
    }
}

// ============================================================================
// TableProvisioner implementation
// ============================================================================

#[async_trait]
impl TableProvisioner for DynamoDbRepository {
    async fn describe_table(&self) -> Result<Option<TableState>> {
        let response = match self
            .client
            .describe_table()
            .table_name(self.table_name())
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                return match map_describe_table_error(err, self.table_name()) {
                    RepositoryError::TableNotFound { .. } => Ok(None),
                    err => Err(err),
                }
            }
        };

        let status = table_status_from_sdk(response.table().and_then(|t| t.table_status()));
        Ok(Some(TableState { status }))
    }

    async fn create_table(&self) -> Result<CreateTableOutcome> {
        let schema = &self.config.key_schema;
        let build_err = |e: aws_sdk_dynamodb::error::BuildError| {
            RepositoryError::ProvisioningFailed(e.to_string())
        };

        let key_schema = vec![
            KeySchemaElement::builder()
                .attribute_name(&schema.partition_key)
                .key_type(KeyType::Hash)
                .build()
                .map_err(build_err)?,
            KeySchemaElement::builder()
                .attribute_name(&schema.sort_key)
                .key_type(KeyType::Range)
                .build()
                .map_err(build_err)?,
        ];

        let attribute_definitions = vec![
            AttributeDefinition::builder()
                .attribute_name(&schema.partition_key)
                .attribute_type(ScalarAttributeType::S)
                .build()
                .map_err(build_err)?,
            AttributeDefinition::builder()
                .attribute_name(&schema.sort_key)
                .attribute_type(ScalarAttributeType::S)
                .build()
                .map_err(build_err)?,
        ];

        let throughput = ProvisionedThroughput::builder()
            .read_capacity_units(self.config.throughput.read_capacity_units)
            .write_capacity_units(self.config.throughput.write_capacity_units)
            .build()
            .map_err(build_err)?;

        let result = self
            .client
            .create_table()
            .table_name(self.table_name())
            .set_key_schema(Some(key_schema))
            .set_attribute_definitions(Some(attribute_definitions))
            .billing_mode(BillingMode::Provisioned)
            .provisioned_throughput(throughput)
            .send()
            .await;

        create_table_outcome(result)
    }
}

// ============================================================================
// ObservationRepository implementation
// ============================================================================

#[async_trait]
impl ObservationRepository for DynamoDbRepository {
    async fn put_observations(&self, observations: &[Observation]) -> Result<()> {
        if observations.is_empty() {
            return Ok(());
        }

        let pending = observations
            .iter()
            .map(|observation| self.put_request(observation))
            .collect::<Result<Vec<_>>>()?;

        let table_name = self.table_name();
        let client = &self.client;
        write_until_processed(table_name, pending, move |batch| async move {
            let output = client
                .batch_write_item()
                .request_items(table_name, batch)
                .send()
                .await
                .map_err(|e| map_batch_write_error(e, table_name))?;

            Ok::<_, RepositoryError>(
                output
                    .unprocessed_items
                    .and_then(|mut unprocessed| unprocessed.remove(table_name))
                    .unwrap_or_default(),
            )
        })
        .await
    }

    async fn query_by_date(&self, date: &str) -> Result<Vec<Item>> {
        let mut pages = self
            .client
            .query()
            .table_name(self.table_name())
            .key_condition_expression("#pk = :pk")
            .expression_attribute_names("#pk", &self.config.key_schema.partition_key)
            .expression_attribute_values(":pk", AttributeValue::S(date.to_string()))
            .into_paginator()
            .send();

        let mut items = Vec::new();
        let mut page_count = 0;
        while let Some(page) = pages.next().await {
            let page = match page {
                Ok(page) => page,
                Err(err) => return empty_if_missing(map_query_error(err, self.table_name())),
            };

            page_count += 1;
            items.extend(page.items.unwrap_or_default().iter().map(item_to_json));
        }

        tracing::debug!(
            table = %self.table_name(),
            date,
            pages = page_count,
            items = items.len(),
            "Query complete"
        );

        Ok(items)
    }
}

/// `ResourceInUse` means another creator got there first.
fn create_table_outcome<T, R>(
    result: std::result::Result<T, SdkError<CreateTableError, R>>,
) -> Result<CreateTableOutcome>
where
    R: Debug + Send + Sync + 'static,
{
    match result {
        Ok(_) => Ok(CreateTableOutcome::Created),
        Err(err)
            if matches!(
                err.as_service_error(),
                Some(CreateTableError::ResourceInUseException(_))
            ) =>
        {
            Ok(CreateTableOutcome::AlreadyExists)
        }
        Err(err) => Err(map_create_table_error(err)),
    }
}

/// Sends `pending` through `send`, resubmitting whatever comes back
/// unprocessed, for at most [`MAX_WRITE_ROUNDS`] rounds.
async fn write_until_processed<F, Fut>(
    table_name: &str,
    mut pending: Vec<WriteRequest>,
    mut send: F,
) -> Result<()>
where
    F: FnMut(Vec<WriteRequest>) -> Fut,
    Fut: Future<Output = Result<Vec<WriteRequest>>>,
{
    for round in 1..=MAX_WRITE_ROUNDS {
        pending = send(pending).await?;
        if pending.is_empty() {
            return Ok(());
        }

        tracing::warn!(
            table = %table_name,
            unprocessed = pending.len(),
            round,
            "Resubmitting unprocessed items"
        );
    }

    Err(RepositoryError::WriteFailed(format!(
        "{} items left unprocessed after {} rounds",
        pending.len(),
        MAX_WRITE_ROUNDS
    )))
}

/// A query against a table that does not exist finds nothing.
fn empty_if_missing(err: RepositoryError) -> Result<Vec<Item>> {
    match err {
        RepositoryError::TableNotFound { table_name } => {
            tracing::debug!(table = %table_name, "Queried a missing table");
            Ok(Vec::new())
        }
        err => Err(err),
    }
}
