mod error;
mod reader;
mod types;

pub use error::{ObservationError, Result};
pub use reader::{parse_observations, CsvHeader, ObservationReader};
pub use types::{Observation, MISSING_VALUE};
