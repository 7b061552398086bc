use std::{env, time::Duration};

use fredseries_core::table::{fred_table_config, ActivationPolicy, TableConfig, Throughput};

use crate::storage::dynamodb::AwsConfig;

/// FRED daily WTI crude oil prices since mid-2009.
pub const DEFAULT_SOURCE_URL: &str =
    "https://fred.stlouisfed.org/graph/fredgraph.csv?id=DCOILWTICO&fgsnd=2009-06-01&fq=Daily";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// URL serving the CSV series
    pub source_url: String,
    /// Destination table, key schema and provisioned throughput
    pub table: TableConfig,
    /// Bounded wait for a new table to become active
    pub activation: ActivationPolicy,
    /// DynamoDB endpoint and region overrides
    pub aws: AwsConfig,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `FRED_SOURCE_URL` - CSV source (default: FRED DCOILWTICO daily)
    /// - `FRED_TABLE_NAME` - Table name (default: "FREDdata")
    /// - `FRED_SERIES_ID` - Series column and sort key (default: "DCOILWTICO")
    /// - `FRED_READ_CAPACITY` - Read capacity units at creation (default: 5)
    /// - `FRED_WRITE_CAPACITY` - Write capacity units at creation (default: 100)
    /// - `FRED_ACTIVE_POLL_SECONDS` - Activation poll interval (default: 2)
    /// - `FRED_ACTIVE_MAX_ATTEMPTS` - Activation poll attempts (default: 60)
    /// - `AWS_ENDPOINT_URL` - Use local DynamoDB (e.g., http://localhost:8000)
    /// - `AWS_REGION` - AWS region (defaults to the SDK provider chain)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Unset or unparsable values fall back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let parsed = |key: &str| lookup(key).and_then(|v| v.trim().parse::<u64>().ok());

        let defaults = Throughput::default();
        let throughput = Throughput {
            read_capacity_units: parsed("FRED_READ_CAPACITY")
                .and_then(|v| i64::try_from(v).ok())
                .unwrap_or(defaults.read_capacity_units),
            write_capacity_units: parsed("FRED_WRITE_CAPACITY")
                .and_then(|v| i64::try_from(v).ok())
                .unwrap_or(defaults.write_capacity_units),
        };

        let mut table = fred_table_config().with_throughput(throughput);
        if let Some(name) = lookup("FRED_TABLE_NAME").filter(|v| !v.is_empty()) {
            table = table.with_table_name(&name);
        }
        if let Some(series) = lookup("FRED_SERIES_ID").filter(|v| !v.is_empty()) {
            table = table.with_series(&series);
        }

        let default_activation = ActivationPolicy::default();
        let activation = ActivationPolicy {
            poll_interval: parsed("FRED_ACTIVE_POLL_SECONDS")
                .map(Duration::from_secs)
                .unwrap_or(default_activation.poll_interval),
            max_attempts: parsed("FRED_ACTIVE_MAX_ATTEMPTS")
                .and_then(|v| u32::try_from(v).ok())
                .unwrap_or(default_activation.max_attempts),
        };

        Self {
            source_url: lookup("FRED_SOURCE_URL")
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_SOURCE_URL.to_string()),
            table,
            activation,
            aws: AwsConfig::from_lookup(&lookup),
        }
    }

    pub fn with_source_url(mut self, url: &str) -> Self {
        self.source_url = url.to_string();
        self
    }

    pub fn with_table_name(mut self, name: &str) -> Self {
        self.table = self.table.with_table_name(name);
        self
    }

    pub fn with_series(mut self, series: &str) -> Self {
        self.table = self.table.with_series(series);
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
