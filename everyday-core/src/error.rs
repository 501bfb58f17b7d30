//! Error types for Everyday operations

use crate::{ColumnKind, IdentifierMode, MarkerKind};
use chrono::NaiveDate;
use thiserror::Error;

/// Submission errors: bad or missing entry fields.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid site '{site}': expected one of {allowed:?}")]
    InvalidSite { site: String, allowed: Vec<String> },

    #[error("Required field missing: {field}")]
    MissingField { field: String },

    #[error(
        "Extra column mismatch: extra column enabled = {enabled}, notebook reference supplied = {supplied}"
    )]
    ExtraColumnMismatch { enabled: bool, supplied: bool },

    #[error("Invalid character {found:?} in field {field}")]
    InvalidCharacter { field: String, found: char },
}

/// Host document errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Marker not found: {marker}")]
    MarkersNotFound { marker: MarkerKind },

    #[error("Markers malformed: {reason}")]
    MarkersMalformed { reason: String },

    #[error("Column count mismatch on line {line}: expected {expected}, found {found}")]
    ColumnCountMismatch {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("Malformed table on line {line}: {reason}")]
    MalformedTable { line: usize, reason: String },

    #[error("Unrecognized column '{label}'")]
    UnrecognizedColumn { label: String },

    #[error("Duplicate column: {kind:?}")]
    DuplicateColumn { kind: ColumnKind },

    #[error("Missing column: {kind:?}")]
    MissingColumn { kind: ColumnKind },
}

/// Identifier assignment errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SequencingError {
    #[error("Non-monotonic identifier: {next} does not follow {last}")]
    NonMonotonicIdentifier { last: String, next: String },

    #[error("Unexpected gap: {next} does not directly follow {last}")]
    UnexpectedGap { last: String, next: String },

    #[error("Duplicate identifier: {identifier} is already in the table")]
    DuplicateIdentifier { identifier: String },

    #[error("Malformed identifier '{identifier}' for {mode:?} mode")]
    MalformedIdentifier {
        identifier: String,
        mode: IdentifierMode,
    },

    #[error("Entry date {date} is before project start {start}")]
    BeforeProjectStart { date: NaiveDate, start: NaiveDate },
}

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required configuration field: {field}")]
    MissingRequired { field: String },

    #[error("Invalid value for {field}: {value} - {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// Master error type for all engine operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Sequencing error: {0}")]
    Sequencing(#[from] SequencingError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

// =============================================================================
// TESTS
// =============================================================================
