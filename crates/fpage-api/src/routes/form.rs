//! # Form Routes
//!
//! Routes:
//! - GET  /v1/form: Form declaration
//! - POST /v1/form: Submit the form
//! - GET  /v1/form/policy: Effective validation policy
//!
//! A submission passes two gates. The request DTO's [`Validate`] impl
//! rejects empty required fields, the way a form host refuses a blank
//! required input before any custom rule runs. Everything else is decided
//! by [`fpage_form::submit`].

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use chrono::NaiveDate;
use fpage_core::{Field, FieldErrors, FieldViolation, FormSchema, Gender, SubmissionInput};
use fpage_form::{InMemoryMessenger, SubmissionOutcome, ValidationPolicy};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::AppError;
use crate::extractors::{extract_validated_json, Validate};
use crate::state::AppState;

/// Build the form router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/form", get(get_form).post(submit_form))
        .route("/v1/form/policy", get(get_policy))
}

// ---------------------------------------------------------------------------
// Request / Response types
// ---------------------------------------------------------------------------

/// Form submission body.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SubmitFormRequest {
    /// Submitter's name.
    pub name: String,
    /// Date of birth, `YYYY-MM-DD`.
    #[serde(alias = "birth_date", alias = "birthDate")]
    #[schema(value_type = String, format = Date, example = "1996-03-01")]
    pub birthday: NaiveDate,
    /// Age in whole years.
    pub age: i64,
    /// One of `male`, `female`, `other`, `prefer_not_to_say`.
    #[schema(value_type = String, example = "female")]
    pub gender: Gender,
}

impl From<SubmitFormRequest> for SubmissionInput {
    fn from(req: SubmitFormRequest) -> Self {
        SubmissionInput::new(req.name, req.birthday, req.age, req.gender)
    }
}

/// Accepted submission.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubmitFormResponse {
    pub submission_id: Uuid,
    pub accepted: bool,
    /// Confirmation text.
    pub message: String,
    /// Every status message queued while handling the submission.
    pub messages: Vec<String>,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

impl Validate for SubmitFormRequest {
    fn validate(&self, schema: &FormSchema) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.name.trim().is_empty() {
            errors.set(FieldViolation::Required {
                field: Field::Name,
                title: schema.title(Field::Name).to_string(),
            });
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /v1/form: The form declaration.
#[utoipa::path(
    get,
    path = "/v1/form",
    responses(
        (status = 200, description = "Form declaration: fields, kinds, titles, and options"),
    ),
    tag = "form"
)]
pub async fn get_form(State(state): State<AppState>) -> Json<FormSchema> {
    Json(state.schema.as_ref().clone())
}

/// POST /v1/form: Validate and accept a submission.
#[utoipa::path(
    post,
    path = "/v1/form",
    request_body = SubmitFormRequest,
    responses(
        (status = 200, description = "Submission accepted", body = SubmitFormResponse),
        (status = 422, description = "Field errors (VALIDATION_ERROR), or any body rejection including a missing JSON Content-Type (BAD_REQUEST)", body = crate::error::ErrorBody),
    ),
    tag = "form"
)]
pub async fn submit_form(
    State(state): State<AppState>,
    body: Result<Json<SubmitFormRequest>, JsonRejection>,
) -> Result<Json<SubmitFormResponse>, AppError> {
    let input: SubmissionInput = match extract_validated_json(body, &state.schema) {
        Ok(req) => req.into(),
        Err(err) => {
            if let AppError::Fields(_) = &err {
                state.metrics.record_rejected();
            }
            return Err(err);
        }
    };

    let messenger = InMemoryMessenger::new();
    let outcome = fpage_form::submit(
        &input,
        &state.validator,
        state.clock.as_ref(),
        &messenger,
        state.logger.as_ref(),
    );

    match outcome {
        SubmissionOutcome::Accepted(confirmation) => {
            state.metrics.record_accepted();
            Ok(Json(SubmitFormResponse {
                submission_id: confirmation.submission_id,
                accepted: true,
                message: confirmation.message,
                messages: messenger.take(),
            }))
        }
        SubmissionOutcome::Rejected(errors) => {
            state.metrics.record_rejected();
            Err(AppError::Fields(errors))
        }
    }
}

/// GET /v1/form/policy: The validation policy in effect.
#[utoipa::path(
    get,
    path = "/v1/form/policy",
    responses(
        (status = 200, description = "Effective validation policy"),
    ),
    tag = "form"
)]
pub async fn get_policy(State(state): State<AppState>) -> Json<ValidationPolicy> {
    Json(state.validator.policy().clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str) -> SubmitFormRequest {
        SubmitFormRequest {
            name: name.to_string(),
            birthday: NaiveDate::from_ymd_opt(1996, 3, 1).unwrap(),
            age: 30,
            gender: Gender::Other,
        }
    }

    #[test]
    fn blank_name_is_required_error() {
        let errors = request("   ").validate(&FormSchema::form_page()).unwrap_err();
        assert_eq!(
            errors.get(Field::Name).map(|v| v.to_string()),
            Some("Your name: field is required.".to_string())
        );
    }

    #[test]
    fn required_message_uses_served_title() {
        let mut schema = FormSchema::form_page();
        schema.fields[0].title = "Full name:".to_string();
        let errors = request("").validate(&schema).unwrap_err();
        assert_eq!(
            errors.get(Field::Name).map(|v| v.to_string()),
            Some("Full name: field is required.".to_string())
        );
    }

    #[test]
    fn present_name_passes_presence_check() {
        // Too short, but that is the validator's call, not the extractor's.
        assert!(request("A").validate(&FormSchema::form_page()).is_ok());
    }

    #[test]
    fn request_converts_to_submission() {
        let input: SubmissionInput = request("Ada").into();
        assert_eq!(input.name, "Ada");
        assert_eq!(input.age, 30);
        assert_eq!(input.gender, Gender::Other);
    }
}
