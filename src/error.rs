//! Error handling for IOS file processing.
//!
//! Every fatal condition aborts the current file only. Variants are grouped
//! into four failure categories via [`IosError::category`] so that callers
//! can decide how to treat a failed file without matching every variant.

use std::path::PathBuf;
use thiserror::Error;

/// Coarse classification of a fatal error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureCategory {
    /// File could not be read or decoded.
    HardOpen,
    /// Header or data block does not have the declared structure.
    Structural,
    /// Time anchor is missing, unparseable or inconsistent with the data.
    Temporal,
    /// A channel's name/unit combination has no identity rule.
    UnitAmbiguity,
}

#[derive(Error, Debug)]
pub enum IosError {
    #[error("Unable to open file: {path} - {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File is not valid text: {file} - {reason}")]
    Decode { file: String, reason: String },

    #[error("Required section *{section} missing in file: {file}")]
    MissingSection { file: String, section: String },

    #[error("No '*END OF HEADER' marker found in file: {file}")]
    NoEndOfHeader { file: String },

    #[error("Unterminated subsection {subsection} in file: {file}")]
    UnterminatedSubsection { file: String, subsection: String },

    #[error("Table {table} in file {file}: expected {expected} rows, found {found}")]
    TableRowMismatch {
        file: String,
        table: String,
        expected: usize,
        found: usize,
    },

    #[error("Table {table} in file {file}: row {row} has {found} fields, expected at least {expected}")]
    TableFieldMismatch {
        file: String,
        table: String,
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Invalid header value for {key} in file {file}: '{value}'")]
    InvalidHeaderValue {
        file: String,
        key: String,
        value: String,
    },

    #[error("Unable to decode data block in file {file}: {reason}")]
    DataDecode { file: String, reason: String },

    #[error("Unrecognized time zone '{zone}' in time string '{value}' in file: {file}")]
    UnknownTimeZone {
        file: String,
        zone: String,
        value: String,
    },

    #[error("Invalid time '{value}': {reason} in file: {file}")]
    InvalidTime {
        file: String,
        value: String,
        reason: String,
    },

    #[error(
        "First record time {first} differs from start time {start} by {seconds}s in file: {file}"
    )]
    TimeMismatch {
        file: String,
        first: String,
        start: String,
        seconds: i64,
    },

    #[error("No date/time channels and no usable time increment in file: {file}")]
    MissingTimeAxis { file: String },

    #[error("No identity rule for {kind} channel '{name}' with units '{units}' in file: {file}")]
    UnresolvedIdentity {
        file: String,
        kind: String,
        name: String,
        units: String,
    },

    #[error("Cannot convert units '{units}' for {kind} channel '{name}' in file: {file}")]
    UnitConversion {
        file: String,
        kind: String,
        name: String,
        units: String,
    },

    #[error("Vocabulary table error: {message}")]
    Vocabulary {
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl IosError {
    /// Map the error to the failure category reported to the caller.
    pub fn category(&self) -> FailureCategory {
        match self {
            IosError::Open { .. } | IosError::Decode { .. } => FailureCategory::HardOpen,
            IosError::UnknownTimeZone { .. }
            | IosError::InvalidTime { .. }
            | IosError::TimeMismatch { .. }
            | IosError::MissingTimeAxis { .. } => FailureCategory::Temporal,
            IosError::UnresolvedIdentity { .. } | IosError::UnitConversion { .. } => {
                FailureCategory::UnitAmbiguity
            }
            IosError::MissingSection { .. }
            | IosError::NoEndOfHeader { .. }
            | IosError::UnterminatedSubsection { .. }
            | IosError::TableRowMismatch { .. }
            | IosError::TableFieldMismatch { .. }
            | IosError::InvalidHeaderValue { .. }
            | IosError::DataDecode { .. }
            | IosError::Vocabulary { .. }
            | IosError::Configuration { .. } => FailureCategory::Structural,
        }
    }

    /// Create a vocabulary error without an underlying CSV error
    pub fn vocabulary(message: impl Into<String>) -> Self {
        Self::Vocabulary {
            message: message.into(),
            source: None,
        }
    }

    /// Create an invalid time error
    pub fn invalid_time(
        file: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidTime {
            file: file.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}

impl From<csv::Error> for IosError {
    fn from(error: csv::Error) -> Self {
        Self::Vocabulary {
            message: "CSV parsing failed".to_string(),
            source: Some(error),
        }
    }
}

pub type Result<T> = std::result::Result<T, IosError>;
