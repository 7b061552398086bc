/// Value FRED writes for days without a published observation.
pub const MISSING_VALUE: &str = ".";

/// A single time-series data point.
///
/// Both fields are stored as strings: `date` is an ISO `YYYY-MM-DD` date and
/// `value` is the raw CSV cell, either a decimal number or [`MISSING_VALUE`].
/// Together they form the table's composite primary key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Observation {
    pub date: String,
    pub value: String,
}

impl Observation {
    pub fn new(date: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            value: value.into(),
        }
    }

    /// Returns the `(partition, sort)` key pair.
    pub fn key(&self) -> (&str, &str) {
        (&self.date, &self.value)
    }

    /// Returns true when the source had no data for this date.
    pub fn is_missing(&self) -> bool {
        self.value == MISSING_VALUE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_is_date_then_value() {
        let obs = Observation::new("2020-01-02", "61.06");
        assert_eq!(obs.key(), ("2020-01-02", "61.06"));
    }

    #[test]
    fn test_missing_value_sentinel() {
        assert!(Observation::new("2020-01-20", ".").is_missing());
        assert!(!Observation::new("2020-01-21", "58.34").is_missing());
    }

    #[test]
    fn test_ordering_follows_date() {
        let mut observations = vec![
            Observation::new("2020-01-03", "61.18"),
            Observation::new("2020-01-02", "61.06"),
        ];
        observations.sort();
        assert_eq!(observations[0].date, "2020-01-02");
    }
}
