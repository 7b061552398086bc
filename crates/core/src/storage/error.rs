use thiserror::Error;

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Table '{table_name}' not found")]
    TableNotFound { table_name: String },
    #[error("Table '{table_name}' is unavailable ({status})")]
    TableUnavailable { table_name: String, status: String },
    #[error("Timeout waiting for table '{table_name}' to become active after {attempts} attempts")]
    TableActivationTimeout { table_name: String, attempts: u32 },
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Provisioning failed: {0}")]
    ProvisioningFailed(String),
    #[error("Write failed: {0}")]
    WriteFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;
