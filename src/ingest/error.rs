use crate::records::CalibrationError;

/// Errors that can occur while parsing raw instrument files
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// I/O error reading a raw file
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV/TSV parsing error
    #[error("CSV parsing error: {0}")]
    CsvError(#[from] csv::Error),

    /// Log file has neither of the known layouts
    #[error("Log file {filename} has {lines} lines, expected 30 or 34")]
    UnsupportedLayout {
        /// Log file name
        filename: String,
        /// Number of lines found
        lines: usize,
    },

    /// Required field is absent
    #[error("Missing field: {0}")]
    MissingField(String),

    /// Field could not be parsed as a number
    #[error("Invalid number in {field}: {value:?}")]
    InvalidNumber {
        /// Field description
        field: String,
        /// Raw text
        value: String,
    },

    /// Timestamp did not match the expected format
    #[error("Invalid timestamp {value:?}: {source}")]
    InvalidDate {
        /// Raw text
        value: String,
        /// Parse failure
        source: chrono::ParseError,
    },

    /// A calibration row describes an invalid record
    #[error("Invalid calibration on row {row}: {source}")]
    InvalidCalibration {
        /// 1-indexed data row
        row: usize,
        /// Validation failure
        source: CalibrationError,
    },
}

impl IngestError {
    pub(super) fn missing(field: impl Into<String>) -> Self {
        Self::MissingField(field.into())
    }

    pub(super) fn number(field: impl Into<String>, value: &str) -> Self {
        Self::InvalidNumber {
            field: field.into(),
            value: value.to_string(),
        }
    }
}

/// Parse a timestamp, keeping the raw text on failure
pub(super) fn parse_date(value: &str, format: &str) -> Result<chrono::NaiveDateTime, IngestError> {
    chrono::NaiveDateTime::parse_from_str(value, format).map_err(|source| {
        IngestError::InvalidDate {
            value: value.to_string(),
            source,
        }
    })
}

/// Parse a floating-point field, tolerating surrounding whitespace
pub(super) fn parse_f64(field: &str, value: &str) -> Result<f64, IngestError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| IngestError::number(field, value))
}
