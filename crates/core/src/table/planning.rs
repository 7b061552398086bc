//! Pure functions for calculating provisioning plans (Functional Core).

use std::fmt;

use super::TableConfig;

/// Represents the current state of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableState {
    pub status: TableStatus,
}

/// Table status as reported by the table service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableStatus {
    Active,
    Creating,
    Updating,
    Deleting,
    Archiving,
    Archived,
    Inaccessible,
    Unknown(String),
}

impl fmt::Display for TableStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableStatus::Active => write!(f, "ACTIVE"),
            TableStatus::Creating => write!(f, "CREATING"),
            TableStatus::Updating => write!(f, "UPDATING"),
            TableStatus::Deleting => write!(f, "DELETING"),
            TableStatus::Archiving => write!(f, "ARCHIVING"),
            TableStatus::Archived => write!(f, "ARCHIVED"),
            TableStatus::Inaccessible => write!(f, "INACCESSIBLE"),
            TableStatus::Unknown(status) => write!(f, "{status}"),
        }
    }
}

impl TableStatus {
    /// Reads and writes are accepted in this status.
    pub fn is_usable(&self) -> bool {
        matches!(self, TableStatus::Active | TableStatus::Updating)
    }
}

/// What the importer has to do before it can write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisionPlan {
    /// Table doesn't exist, create it and wait for it.
    Create,
    /// Table is being created by someone else.
    WaitForActive,
    /// Table accepts writes.
    Ready,
    /// Table exists but will never accept writes in its current status.
    Unavailable { status: TableStatus },
}

/// Pure function: Calculate what needs to happen for the table to accept writes.
pub fn calculate_provision_plan(current: Option<&TableState>) -> ProvisionPlan {
    match current {
        None => ProvisionPlan::Create,
        Some(state) if state.status.is_usable() => ProvisionPlan::Ready,
        Some(state) if state.status == TableStatus::Creating => ProvisionPlan::WaitForActive,
        Some(state) => ProvisionPlan::Unavailable {
            status: state.status.clone(),
        },
    }
}

/// Pure function: Format a provisioning plan for display.
pub fn format_provision_plan(plan: &ProvisionPlan, config: &TableConfig) -> Vec<String> {
    match plan {
        ProvisionPlan::Create => vec![
            format!("+ Create table: {}", config.table_name),
            format!("  Partition key: {} (S)", config.key_schema.partition_key),
            format!("  Sort key: {} (S)", config.key_schema.sort_key),
            format!(
                "  Throughput: {} RCU / {} WCU",
                config.throughput.read_capacity_units, config.throughput.write_capacity_units
            ),
        ],
        ProvisionPlan::WaitForActive => {
            vec![format!("~ Wait for table '{}' to become active", config.table_name)]
        }
        ProvisionPlan::Ready => vec![format!("= Table '{}' is ready", config.table_name)],
        ProvisionPlan::Unavailable { status } => vec![format!(
            "! Table '{}' is unavailable ({})",
            config.table_name, status
        )],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::fred_table_config;

    fn state(status: TableStatus) -> TableState {
        TableState { status }
    }

    #[test]
    fn test_missing_table_is_created() {
        assert_eq!(calculate_provision_plan(None), ProvisionPlan::Create);
    }

    #[test]
    fn test_active_and_updating_are_ready() {
        assert_eq!(
            calculate_provision_plan(Some(&state(TableStatus::Active))),
            ProvisionPlan::Ready
        );
        assert_eq!(
            calculate_provision_plan(Some(&state(TableStatus::Updating))),
            ProvisionPlan::Ready
        );
    }

    #[test]
    fn test_creating_waits() {
        assert_eq!(
            calculate_provision_plan(Some(&state(TableStatus::Creating))),
            ProvisionPlan::WaitForActive
        );
    }

    #[test]
    fn test_deleting_is_unavailable() {
        assert_eq!(
            calculate_provision_plan(Some(&state(TableStatus::Deleting))),
            ProvisionPlan::Unavailable {
                status: TableStatus::Deleting
            }
        );
    }

    #[test]
    fn test_unknown_status_is_unavailable() {
        let plan = calculate_provision_plan(Some(&state(TableStatus::Unknown("NEW".into()))));
        assert!(matches!(plan, ProvisionPlan::Unavailable { .. }));
    }

    #[test]
    fn test_format_create_plan() {
        let lines = format_provision_plan(&ProvisionPlan::Create, &fred_table_config());
        assert_eq!(lines[0], "+ Create table: FREDdata");
        assert_eq!(lines[1], "  Partition key: date (S)");
        assert_eq!(lines[2], "  Sort key: DCOILWTICO (S)");
        assert_eq!(lines[3], "  Throughput: 5 RCU / 100 WCU");
    }

    #[test]
    fn test_format_unavailable_plan() {
        let plan = ProvisionPlan::Unavailable {
            status: TableStatus::Archived,
        };
        assert_eq!(
            format_provision_plan(&plan, &fred_table_config()),
            vec!["! Table 'FREDdata' is unavailable (ARCHIVED)".to_string()]
        );
    }
}
