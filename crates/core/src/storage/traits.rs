use async_trait::async_trait;

use crate::observation::Observation;
use crate::table::TableState;

use super::{Item, Result};

/// Result of issuing a create-table request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateTableOutcome {
    /// The request was accepted and the table is being created.
    Created,
    /// Another caller created the table first.
    AlreadyExists,
}

/// Table lifecycle operations, scoped to the table the implementor was
/// configured with.
#[async_trait]
pub trait TableProvisioner: Send + Sync {
    /// Describes the table. Returns `None` when it does not exist; any other
    /// failure is an error.
    async fn describe_table(&self) -> Result<Option<TableState>>;

    /// Creates the table with the configured key schema and throughput.
    async fn create_table(&self) -> Result<CreateTableOutcome>;
}

/// Observation storage.
#[async_trait]
pub trait ObservationRepository: Send + Sync {
    /// Upserts a batch of at most [`super::MAX_BATCH_SIZE`] observations with
    /// distinct keys.
    async fn put_observations(&self, observations: &[Observation]) -> Result<()>;

    /// Returns every stored item whose partition key equals `date`.
    ///
    /// A table that does not exist yields an empty list.
    async fn query_by_date(&self, date: &str) -> Result<Vec<Item>>;
}
