//! Table schema and provisioning plans.

mod config;
mod planning;

pub use config::{
    fred_table_config, ActivationPolicy, KeySchema, TableConfig, Throughput, DATE_ATTRIBUTE,
    DEFAULT_SERIES_ID, DEFAULT_TABLE_NAME,
};
pub use planning::{calculate_provision_plan, format_provision_plan, ProvisionPlan, TableState, TableStatus};
