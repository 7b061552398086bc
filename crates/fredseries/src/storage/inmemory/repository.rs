//! In-memory repository implementation.

use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use fredseries_core::observation::Observation;
use fredseries_core::storage::{
    CreateTableOutcome, Item, ObservationRepository, RepositoryError, Result, TableProvisioner,
    MAX_BATCH_SIZE,
};
use fredseries_core::table::{TableConfig, TableState, TableStatus};

#[derive(Debug)]
struct Table {
    status: TableStatus,
    /// Describe calls that still report `Creating`.
    polls_until_active: u32,
    observations: BTreeMap<(String, String), Observation>,
}

impl Table {
    fn with_status(status: TableStatus, polls_until_active: u32) -> Self {
        Self {
            status,
            polls_until_active,
            observations: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Default)]
struct Counters {
    describe: AtomicUsize,
    create: AtomicUsize,
    batch_write: AtomicUsize,
    query: AtomicUsize,
}

/// In-memory storage backend for testing.
///
/// Data is not persisted and will be lost when the repository is dropped.
/// Clones share the same table.
#[derive(Debug, Clone)]
pub struct InMemoryRepository {
    config: TableConfig,
    table: Arc<RwLock<Option<Table>>>,
    creation_polls: u32,
    concurrent_creator: bool,
    counters: Arc<Counters>,
}

impl InMemoryRepository {
    /// Creates a repository whose table does not exist yet.
    pub fn new(config: TableConfig) -> Self {
        Self {
            config,
            table: Arc::new(RwLock::new(None)),
            creation_polls: 0,
            concurrent_creator: false,
            counters: Arc::new(Counters::default()),
        }
    }

    /// Creates a repository with an existing table in the given status.
    ///
    /// A `Creating` table is reported as such once, then turns `Active`.
    pub fn with_table(config: TableConfig, status: TableStatus) -> Self {
        let polls = u32::from(status == TableStatus::Creating);
        let mut repo = Self::new(config);
        repo.table = Arc::new(RwLock::new(Some(Table::with_status(status, polls))));
        repo
    }

    /// Tables created through this repository stay `Creating` for `polls`
    /// describe calls before turning `Active`.
    pub fn with_creation_delay(mut self, polls: u32) -> Self {
        self.creation_polls = polls;
        self
    }

    /// Simulates another process creating the table between describe and
    /// create: `create_table` sets the table up but reports `AlreadyExists`.
    pub fn with_concurrent_creator(mut self) -> Self {
        self.concurrent_creator = true;
        self
    }

    /// Every stored observation, in key order.
    pub async fn observations(&self) -> Vec<Observation> {
        let table = self.table.read().await;
        table
            .as_ref()
            .map(|t| t.observations.values().cloned().collect())
            .unwrap_or_default()
    }

    pub async fn table_status(&self) -> Option<TableStatus> {
        self.table.read().await.as_ref().map(|t| t.status.clone())
    }

    pub fn describe_calls(&self) -> usize {
        self.counters.describe.load(Ordering::SeqCst)
    }

    pub fn create_calls(&self) -> usize {
        self.counters.create.load(Ordering::SeqCst)
    }

    pub fn batch_write_calls(&self) -> usize {
        self.counters.batch_write.load(Ordering::SeqCst)
    }

    pub fn query_calls(&self) -> usize {
        self.counters.query.load(Ordering::SeqCst)
    }

    fn table_not_found(&self) -> RepositoryError {
        RepositoryError::TableNotFound {
            table_name: self.config.table_name.clone(),
        }
    }
}

#[async_trait]
impl TableProvisioner for InMemoryRepository {
    async fn describe_table(&self) -> Result<Option<TableState>> {
        self.counters.describe.fetch_add(1, Ordering::SeqCst);
        let mut table = self.table.write().await;
        let Some(table) = table.as_mut() else {
            return Ok(None);
        };

        if table.status == TableStatus::Creating && table.polls_until_active == 0 {
            table.status = TableStatus::Active;
        }
        let state = TableState {
            status: table.status.clone(),
        };
        if table.status == TableStatus::Creating {
            table.polls_until_active -= 1;
        }

        Ok(Some(state))
    }

    async fn create_table(&self) -> Result<CreateTableOutcome> {
        self.counters.create.fetch_add(1, Ordering::SeqCst);
        let mut table = self.table.write().await;
        if table.is_some() {
            return Ok(CreateTableOutcome::AlreadyExists);
        }
        *table = Some(Table::with_status(TableStatus::Creating, self.creation_polls));
        if self.concurrent_creator {
            return Ok(CreateTableOutcome::AlreadyExists);
        }
        Ok(CreateTableOutcome::Created)
    }
}

#[async_trait]
impl ObservationRepository for InMemoryRepository {
    async fn put_observations(&self, observations: &[Observation]) -> Result<()> {
        self.counters.batch_write.fetch_add(1, Ordering::SeqCst);

        if observations.len() > MAX_BATCH_SIZE {
            return Err(RepositoryError::InvalidData(format!(
                "Batch of {} items exceeds the limit of {}",
                observations.len(),
                MAX_BATCH_SIZE
            )));
        }
        let keys: HashSet<_> = observations.iter().map(Observation::key).collect();
        if keys.len() != observations.len() {
            return Err(RepositoryError::InvalidData(
                "Batch contains duplicate keys".to_string(),
            ));
        }

        let mut table = self.table.write().await;
        let table = table.as_mut().ok_or_else(|| self.table_not_found())?;
        if !table.status.is_usable() {
            return Err(RepositoryError::TableUnavailable {
                table_name: self.config.table_name.clone(),
                status: table.status.to_string(),
            });
        }

        for observation in observations {
            table.observations.insert(
                (observation.date.clone(), observation.value.clone()),
                observation.clone(),
            );
        }
        Ok(())
    }

    async fn query_by_date(&self, date: &str) -> Result<Vec<Item>> {
        self.counters.query.fetch_add(1, Ordering::SeqCst);
        let table = self.table.read().await;
        let Some(table) = table.as_ref() else {
            return Ok(Vec::new());
        };

        Ok(table
            .observations
            .values()
            .filter(|o| o.date == date)
            .map(|o| self.config.key_schema.item_for(o))
            .collect())
    }
}
