//! Error types for user input validation.

use thiserror::Error;

/// Errors raised while turning a line of user text into a typed value.
///
/// The two variants map to the two ways an answer can be wrong: it is not
/// the right kind of value at all, or it is the right kind but outside the
/// domain's accepted interval.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' could not parse '{input}': {reason}")]
    Parse {
        field: String,
        input: String,
        reason: String,
    },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    Range {
        field: String,
        min: f64,
        max: f64,
        actual: f64,
    },
}

impl ValidationError {
    /// Creates a parse error.
    pub fn parse(
        field: impl Into<String>,
        input: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        ValidationError::Parse {
            field: field.into(),
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Creates an out of range error.
    pub fn range(field: impl Into<String>, min: f64, max: f64, actual: f64) -> Self {
        ValidationError::Range {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Name of the field that failed.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Parse { field, .. } | ValidationError::Range { field, .. } => field,
        }
    }

    /// Returns true for the out-of-range variant.
    pub fn is_range(&self) -> bool {
        matches!(self, ValidationError::Range { .. })
    }
}
