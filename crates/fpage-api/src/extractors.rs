//! # Custom Extractors & Validation
//!
//! Provides the [`Validate`] trait for request DTOs and helpers to extract
//! and pre-check JSON bodies in handlers.

use axum::extract::rejection::JsonRejection;
use axum::Json;
use fpage_core::{FieldErrors, FormSchema};

use crate::error::AppError;

/// Request types that check field presence and shape beyond what serde
/// deserialization enforces.
///
/// Checks run against the form declaration being served, so messages use
/// the same titles a client was shown.
pub trait Validate {
    /// Returns the fields that failed, if any.
    fn validate(&self, schema: &FormSchema) -> Result<(), FieldErrors>;
}

/// Extract a JSON body, mapping every rejection to [`AppError::BadRequest`].
///
/// This includes framing problems such as a missing `Content-Type`, which
/// also surface as 422 rather than 415.
pub fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    result
        .map(|Json(v)| v)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}

/// Extract a JSON body and check it with the [`Validate`] trait.
pub fn extract_validated_json<T: Validate>(
    result: Result<Json<T>, JsonRejection>,
    schema: &FormSchema,
) -> Result<T, AppError> {
    let value = extract_json(result)?;
    value.validate(schema).map_err(AppError::Fields)?;
    Ok(value)
}
