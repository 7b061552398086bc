//! Streaming CSV reader that yields validated observations.

use std::io::Read;

use chrono::NaiveDate;
use csv::{StringRecord, StringRecordsIntoIter, Trim};

use super::{Observation, ObservationError, Result};

/// Minimum number of columns: date and value.
const MIN_COLUMNS: usize = 2;

/// Column names taken from the header row.
///
/// The header's content is not validated, only its width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvHeader {
    pub date_column: String,
    pub value_column: String,
    pub width: usize,
}

/// Iterator over the data rows of a CSV source.
///
/// The header is consumed when the reader is built. Each following row is
/// validated and turned into an [`Observation`] keyed by its first two
/// columns. Rows are read lazily, one at a time.
pub struct ObservationReader<R: Read> {
    header: CsvHeader,
    records: StringRecordsIntoIter<R>,
}

impl<R: Read> ObservationReader<R> {
    /// Builds a reader and consumes the header row.
    pub fn new(source: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(source);

        let headers = reader.headers()?.clone();
        if headers.is_empty() {
            return Err(ObservationError::MissingHeader);
        }
        if headers.len() < MIN_COLUMNS {
            return Err(ObservationError::HeaderTooNarrow {
                expected: MIN_COLUMNS,
                found: headers.len(),
            });
        }

        let header = CsvHeader {
            date_column: headers[0].to_string(),
            value_column: headers[1].to_string(),
            width: headers.len(),
        };

        Ok(Self {
            header,
            records: reader.into_records(),
        })
    }

    pub fn header(&self) -> &CsvHeader {
        &self.header
    }
}

impl<R: Read> Iterator for ObservationReader<R> {
    type Item = Result<Observation>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = match self.records.next()? {
            Ok(record) => record,
            Err(err) => return Some(Err(err.into())),
        };
        Some(validate_record(&record, self.header.width))
    }
}

/// Reads every observation from `source`, stopping at the first invalid row.
pub fn parse_observations<R: Read>(source: R) -> Result<Vec<Observation>> {
    ObservationReader::new(source)?.collect()
}

fn validate_record(record: &StringRecord, width: usize) -> Result<Observation> {
    let line = record.position().map(|p| p.line()).unwrap_or_default();

    if record.len() != width {
        return Err(ObservationError::ColumnCount {
            line,
            expected: width,
            found: record.len(),
        });
    }

    let date = &record[0];
    if NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
        return Err(ObservationError::InvalidDate {
            line,
            value: date.to_string(),
        });
    }

    let value = &record[1];
    if value.is_empty() {
        return Err(ObservationError::EmptyValue { line });
    }

    Ok(Observation::new(date, value))
}
