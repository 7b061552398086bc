//! CSV import: provision the table, then load every observation.

use std::io::Read;

use fredseries_core::observation::ObservationReader;
use fredseries_core::storage::{
    CreateTableOutcome, ObservationRepository, RepositoryError, TableProvisioner,
};
use fredseries_core::table::{
    calculate_provision_plan, format_provision_plan, ActivationPolicy, ProvisionPlan, TableConfig,
};
use serde::Serialize;

use crate::config::Config;
use crate::error::Result;
use crate::source;
use crate::writer::BatchWriter;

/// Outcome of a successful import run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub table_name: String,
    pub table_created: bool,
    pub rows_read: usize,
    pub items_written: usize,
}

/// Counters from loading a CSV body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadStats {
    pub rows_read: usize,
    pub items_written: usize,
}

/// Makes sure the table exists and accepts writes.
///
/// Returns `true` when this call created the table.
pub async fn ensure_table<P: TableProvisioner + ?Sized>(
    provisioner: &P,
    config: &TableConfig,
    policy: ActivationPolicy,
) -> std::result::Result<bool, RepositoryError> {
    let current = provisioner.describe_table().await?;
    let plan = calculate_provision_plan(current.as_ref());

    for line in format_provision_plan(&plan, config) {
        tracing::debug!("{}", line);
    }

    match plan {
        ProvisionPlan::Ready => Ok(false),
        ProvisionPlan::WaitForActive => {
            wait_for_table_active(provisioner, &config.table_name, policy).await?;
            Ok(false)
        }
        ProvisionPlan::Create => {
            tracing::info!(table = %config.table_name, "Creating table");
            let outcome = provisioner.create_table().await?;
            wait_for_table_active(provisioner, &config.table_name, policy).await?;
            Ok(outcome == CreateTableOutcome::Created)
        }
        ProvisionPlan::Unavailable { status } => Err(RepositoryError::TableUnavailable {
            table_name: config.table_name.clone(),
            status: status.to_string(),
        }),
    }
}

/// Polls until the table is usable, giving up after `policy.max_attempts`.
pub async fn wait_for_table_active<P: TableProvisioner + ?Sized>(
    provisioner: &P,
    table_name: &str,
    policy: ActivationPolicy,
) -> std::result::Result<(), RepositoryError> {
    tracing::info!(
        table = %table_name,
        timeout_secs = policy.timeout().as_secs(),
        "Waiting for table to become active"
    );
    for attempt in 1..=policy.max_attempts {
        match provisioner.describe_table().await? {
            Some(state) if state.status.is_usable() => {
                tracing::info!(table = %table_name, attempt, "Table is active");
                return Ok(());
            }
            Some(state) => {
                tracing::debug!(table = %table_name, attempt, status = %state.status, "Waiting for table");
            }
            None => {
                tracing::debug!(table = %table_name, attempt, "Table not visible yet");
            }
        }
        if attempt < policy.max_attempts {
            tokio::time::sleep(policy.poll_interval).await;
        }
    }

    Err(RepositoryError::TableActivationTimeout {
        table_name: table_name.to_string(),
        attempts: policy.max_attempts,
    })
}

/// Reads the CSV body and writes every data row through a batch writer.
///
/// Stops at the first invalid row; batches already flushed stay written.
pub async fn load_csv<R, S>(repo: &R, source: S) -> Result<LoadStats>
where
    R: ObservationRepository + ?Sized,
    S: Read,
{
    let mut reader = ObservationReader::new(source)?;
    tracing::debug!(
        date_column = %reader.header().date_column,
        value_column = %reader.header().value_column,
        "Read CSV header"
    );

    let mut writer = BatchWriter::new(repo);
    let mut rows_read = 0;
    for observation in &mut reader {
        writer.put(observation?).await?;
        rows_read += 1;
    }
    let items_written = writer.finish().await?;

    Ok(LoadStats {
        rows_read,
        items_written,
    })
}

/// Runs a full import: ensure the table, fetch the CSV, load it.
pub async fn run_import<S>(store: &S, config: &Config, http: &reqwest::Client) -> Result<ImportReport>
where
    S: TableProvisioner + ObservationRepository + ?Sized,
{
    let table_created = ensure_table(store, &config.table, config.activation).await?;
    let body = source::fetch_csv(http, &config.source_url).await?;
    let stats = load_csv(store, body.as_slice()).await?;

    let report = ImportReport {
        table_name: config.table.table_name.clone(),
        table_created,
        rows_read: stats.rows_read,
        items_written: stats.items_written,
    };

    tracing::info!(
        table = %report.table_name,
        table_created = report.table_created,
        rows = report.rows_read,
        items = report.items_written,
        "Import complete"
    );

    Ok(report)
}
