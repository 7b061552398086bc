use thiserror::Error;

/// Errors raised while reading observations from CSV text.
///
/// Line numbers are 1-based and count the header line.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ObservationError {
    #[error("CSV source is empty, expected a header row")]
    MissingHeader,
    #[error("CSV header must have at least {expected} columns, found {found}")]
    HeaderTooNarrow { expected: usize, found: usize },
    #[error("Line {line}: expected {expected} columns, found {found}")]
    ColumnCount {
        line: u64,
        expected: usize,
        found: usize,
    },
    #[error("Line {line}: invalid date '{value}'")]
    InvalidDate { line: u64, value: String },
    #[error("Line {line}: value column is empty")]
    EmptyValue { line: u64 },
    #[error("CSV read error: {0}")]
    Read(String),
}

/// Result type for observation parsing.
pub type Result<T> = std::result::Result<T, ObservationError>;

impl From<csv::Error> for ObservationError {
    fn from(err: csv::Error) -> Self {
        ObservationError::Read(err.to_string())
    }
}
