use fredseries_core::observation::ObservationError;
use fredseries_core::storage::RepositoryError;
use thiserror::Error;

/// Result type alias for the importer and query handler.
pub type Result<T> = std::result::Result<T, AppError>;

/// Errors that abort an import or query run.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Failed to fetch CSV source: {0}")]
    Source(#[from] reqwest::Error),

    #[error(transparent)]
    Observation(#[from] ObservationError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
