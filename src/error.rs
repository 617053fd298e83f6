//! Error types for fakeseries
//!
//! Configuration is the only place anything can go wrong: once a generator
//! has been constructed, advancing it, reading it and snapshotting its
//! statistics are total operations.

use thiserror::Error;

/// Result type alias for fakeseries operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for fakeseries operations
#[derive(Error, Debug)]
pub enum Error {
    /// A generator or series configuration was rejected at construction
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    /// A series configuration or statistics record failed to (de)serialize
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A series configuration file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reasons a configuration is rejected
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Every generator needs a non-blank identifier
    #[error("ID for a fake {kind} cannot be blank")]
    BlankId { kind: &'static str },

    /// The numeric generator needs at least one sample to scale against
    #[error("Samples for '{id}' must be positive, got {samples}")]
    NonPositiveSamples { id: String, samples: i64 },

    /// Lower bound above upper bound
    #[error("Bounds for '{id}' are inverted: from {from} > to {to}")]
    InvertedBounds { id: String, from: f64, to: f64 },

    /// Ratio or probability outside its domain
    #[error("{field} for '{id}' must be between {min} and {max}, got {value}")]
    OutOfRange {
        id: String,
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },

    /// Count or length that must not be negative
    #[error("{field} for '{id}' cannot be less than 0, got {value}")]
    Negative {
        id: String,
        field: &'static str,
        value: i64,
    },

    /// Pattern with nothing to repeat
    #[error("Good and bad in a fake pattern with id '{id}' cannot both be 0")]
    EmptyPattern { id: String },

    /// More seasonality waves than the generator composes
    #[error("'{id}' configures {count} seasonality waves, at most {max} are supported")]
    TooManyWaves { id: String, count: usize, max: usize },

    /// Wave periods are sample counts and must be at least 1
    #[error("Seasonality wave period for '{id}' must be positive, got {period}")]
    InvalidWavePeriod { id: String, period: i64 },

    /// Two series columns share an identifier
    #[error("Duplicate column id '{0}'")]
    DuplicateColumn(String),

    /// Gate refers to a column that does not exist
    #[error("Gate column '{0}' does not exist")]
    UnknownGate(String),

    /// Gate refers to a column that does not produce booleans
    #[error("Gate column '{0}' is not a boolean column")]
    GateNotBoolean(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::from(ConfigError::BlankId { kind: "pattern" });
        assert_eq!(
            err.to_string(),
            "Invalid configuration: ID for a fake pattern cannot be blank"
        );
    }

    #[test]
    fn test_out_of_range_display() {
        let err = ConfigError::OutOfRange {
            id: "r1".to_string(),
            field: "Percentage good",
            min: 0.0,
            max: 1.0,
            value: 1.5,
        };
        assert_eq!(
            err.to_string(),
            "Percentage good for 'r1' must be between 0 and 1, got 1.5"
        );
    }

    #[test]
    fn test_config_error_conversion() {
        let err: Error = ConfigError::DuplicateColumn("cpu".to_string()).into();
        assert!(matches!(
            err,
            Error::InvalidConfiguration(ConfigError::DuplicateColumn(_))
        ));
    }
}
