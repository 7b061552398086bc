mod error;
mod traits;
mod types;

pub use error::{RepositoryError, Result};
pub use traits::{CreateTableOutcome, ObservationRepository, TableProvisioner};
pub use types::{Item, MAX_BATCH_SIZE};
