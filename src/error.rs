//! # Record Codec Errors
//!
//! Codec operations return `eyre::Result`. Domain failures are raised as a
//! [`RecordError`] payload so callers can recover the exact failure:
//!
//! ```ignore
//! match record.set(0, "far too long") {
//!     Err(report) => match report.downcast_ref::<RecordError>() {
//!         Some(RecordError::Truncation { kind, .. }) => { /* ... */ }
//!         _ => return Err(report),
//!     },
//!     Ok(()) => {}
//! }
//! ```
//!
//! ## Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Truncation | `Truncation` |
//! | Format | `Format` |
//! | TypeMismatch | `TypeMismatch` |
//! | Schema | `Unsupported`, `UnknownFieldType`, `InvalidSchema` |
//! | Lookup | `NoSuchColumn`, `ColumnIndexOutOfRange` |
//!
//! Stream I/O is not part of this taxonomy: `read_from`/`write_to` return
//! `std::io::Result` and pass the sink's or source's error through as-is.

use thiserror::Error;

use crate::types::FieldType;

/// Which truncation axis of the policy rejected a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TruncationKind {
    String,
    IntegerDigits,
    DecimalDigits,
}

impl TruncationKind {
    pub fn name(&self) -> &'static str {
        match self {
            TruncationKind::String => "string",
            TruncationKind::IntegerDigits => "integer digits",
            TruncationKind::DecimalDigits => "decimal digits",
        }
    }
}

impl std::fmt::Display for TruncationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Truncation,
    Format,
    TypeMismatch,
    Schema,
    Lookup,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("value for column '{column}' would be truncated ({kind}): {len} exceeds {max}")]
    Truncation {
        column: String,
        kind: TruncationKind,
        len: usize,
        max: usize,
    },

    #[error("invalid value {value:?} for column '{column}': {reason}")]
    Format {
        column: String,
        value: String,
        reason: &'static str,
    },

    #[error("column '{column}' is {actual:?}, operation requires {expected}")]
    TypeMismatch {
        column: String,
        expected: &'static str,
        actual: FieldType,
    },

    #[error("column '{column}' has unsupported field type {field_type:?}")]
    Unsupported {
        column: String,
        field_type: FieldType,
    },

    #[error("unknown field type tag 0x{0:02X}")]
    UnknownFieldType(u8),

    #[error("invalid schema: {0}")]
    InvalidSchema(String),

    #[error("no such column '{0}'")]
    NoSuchColumn(String),

    #[error("column index {index} out of range for {count} columns")]
    ColumnIndexOutOfRange { index: usize, count: usize },
}

impl RecordError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            RecordError::Truncation { .. } => ErrorCategory::Truncation,
            RecordError::Format { .. } => ErrorCategory::Format,
            RecordError::TypeMismatch { .. } => ErrorCategory::TypeMismatch,
            RecordError::Unsupported { .. }
            | RecordError::UnknownFieldType(_)
            | RecordError::InvalidSchema(_) => ErrorCategory::Schema,
            RecordError::NoSuchColumn(_) | RecordError::ColumnIndexOutOfRange { .. } => {
                ErrorCategory::Lookup
            }
        }
    }

    /// Extracts the typed payload from a report produced by this crate.
    pub fn from_report(report: &eyre::Report) -> Option<&RecordError> {
        report.downcast_ref::<RecordError>()
    }
}
