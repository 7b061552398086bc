//! Table configuration types (Functional Core - pure data).

use std::time::Duration;

use crate::observation::Observation;
use crate::storage::Item;

/// Partition key attribute shared by every series table.
pub const DATE_ATTRIBUTE: &str = "date";

pub const DEFAULT_TABLE_NAME: &str = "FREDdata";

/// Crude oil prices: West Texas Intermediate, daily.
pub const DEFAULT_SERIES_ID: &str = "DCOILWTICO";

/// Composite primary key: `date` (HASH) plus the series column (RANGE).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySchema {
    pub partition_key: String,
    pub sort_key: String,
}

impl KeySchema {
    /// Key schema for a series, with the sort key named after it.
    pub fn for_series(series: &str) -> Self {
        Self {
            partition_key: DATE_ATTRIBUTE.to_string(),
            sort_key: series.to_string(),
        }
    }

    /// Renders an observation as the attribute map stored in the table.
    pub fn item_for(&self, observation: &Observation) -> Item {
        let mut item = Item::new();
        item.insert(
            self.partition_key.clone(),
            serde_json::Value::String(observation.date.clone()),
        );
        item.insert(
            self.sort_key.clone(),
            serde_json::Value::String(observation.value.clone()),
        );
        item
    }
}

/// Provisioned capacity set when the table is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Throughput {
    pub read_capacity_units: i64,
    pub write_capacity_units: i64,
}

impl Default for Throughput {
    fn default() -> Self {
        Self {
            read_capacity_units: 5,
            write_capacity_units: 100,
        }
    }
}

/// Table schema configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    pub table_name: String,
    pub key_schema: KeySchema,
    pub throughput: Throughput,
}

impl TableConfig {
    /// Sets the table name.
    pub fn with_table_name(mut self, name: &str) -> Self {
        self.table_name = name.to_string();
        self
    }

    /// Renames the sort key after another series.
    pub fn with_series(mut self, series: &str) -> Self {
        self.key_schema = KeySchema::for_series(series);
        self
    }

    pub fn with_throughput(mut self, throughput: Throughput) -> Self {
        self.throughput = throughput;
        self
    }

    /// Name of the series column, which is also the sort key.
    pub fn series(&self) -> &str {
        &self.key_schema.sort_key
    }
}

/// Returns the canonical table configuration.
/// This is a pure function - no I/O.
pub fn fred_table_config() -> TableConfig {
    TableConfig {
        table_name: DEFAULT_TABLE_NAME.to_string(),
        key_schema: KeySchema::for_series(DEFAULT_SERIES_ID),
        throughput: Throughput::default(),
    }
}

/// How long to wait for a new table to become active.
///
/// The wait polls `max_attempts` times, sleeping `poll_interval` between
/// polls, then gives up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivationPolicy {
    pub poll_interval: Duration,
    pub max_attempts: u32,
}

impl Default for ActivationPolicy {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(2),
            max_attempts: 60,
        }
    }
}

impl ActivationPolicy {
    /// Upper bound on the time spent waiting.
    pub fn timeout(&self) -> Duration {
        self.poll_interval * self.max_attempts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = fred_table_config();
        assert_eq!(config.table_name, "FREDdata");
        assert_eq!(config.key_schema.partition_key, "date");
        assert_eq!(config.key_schema.sort_key, "DCOILWTICO");
        assert_eq!(config.throughput.read_capacity_units, 5);
        assert_eq!(config.throughput.write_capacity_units, 100);
    }

    #[test]
    fn test_with_series_renames_sort_key() {
        let config = fred_table_config()
            .with_table_name("rates")
            .with_series("DGS10");
        assert_eq!(config.table_name, "rates");
        assert_eq!(config.series(), "DGS10");
        assert_eq!(config.key_schema.partition_key, "date");
    }

    #[test]
    fn test_item_for_uses_schema_names() {
        let schema = KeySchema::for_series("DCOILWTICO");
        let item = schema.item_for(&Observation::new("2020-01-02", "61.06"));
        assert_eq!(
            serde_json::Value::Object(item),
            serde_json::json!({"date": "2020-01-02", "DCOILWTICO": "61.06"})
        );
    }

    #[test]
    fn test_activation_timeout() {
        let policy = ActivationPolicy {
            poll_interval: Duration::from_millis(500),
            max_attempts: 10,
        };
        assert_eq!(policy.timeout(), Duration::from_secs(5));
    }
}
