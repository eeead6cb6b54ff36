// ⚠️ Error Taxonomy
// Construction failures are fatal and surfaced immediately.
// Cross-kind comparison is NOT an error: it simply answers false.

use thiserror::Error;

/// Every failure the library can report.
#[derive(Error, Debug)]
pub enum RecordError {
    /// A mandatory field was omitted or carries an invalid value.
    #[error("cannot construct {kind}: field `{field}` {reason}")]
    InvalidConstruction {
        kind: &'static str,
        field: &'static str,
        reason: String,
    },

    /// Text input could not be parsed into the field's type.
    #[error("invalid value {value:?} for field `{field}`: {reason}")]
    InvalidField {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RecordError {
    /// Shorthand for a mandatory field that was never supplied.
    pub fn missing(kind: &'static str, field: &'static str) -> Self {
        RecordError::InvalidConstruction {
            kind,
            field,
            reason: "is required".to_string(),
        }
    }

    /// Shorthand for a field that was supplied but rejected.
    pub fn invalid(kind: &'static str, field: &'static str, reason: impl Into<String>) -> Self {
        RecordError::InvalidConstruction {
            kind,
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RecordError>;

// ============================================================================
// TESTS
// ============================================================================
