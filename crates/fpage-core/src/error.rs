//! # Error Types
//!
//! Errors for malformed input that never reached the validation rules.
//! Rule failures are not errors in this sense; they are
//! [`FieldViolation`](crate::FieldViolation) values.

use thiserror::Error;

/// Top-level error type for the form page core.
#[derive(Error, Debug)]
pub enum FpageError {
    /// A date string was not a valid `YYYY-MM-DD` calendar date.
    #[error("invalid date {value:?}: {reason}")]
    InvalidDate {
        /// The rejected input.
        value: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// A gender value that is not one of the declared options.
    #[error("unknown gender option {0:?}; expected one of male, female, other, prefer_not_to_say")]
    UnknownGender(String),
}
