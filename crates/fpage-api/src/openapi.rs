//! # OpenAPI Specification Assembly
//!
//! Assembles the utoipa-documented routes into one OpenAPI document,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the form API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Form Page API",
        version = "0.1.0",
        description = "Declares the form page fields, validates submissions, and returns a confirmation or field-level errors.",
        license(name = "AGPL-3.0-or-later")
    ),
    paths(
        crate::routes::form::get_form,
        crate::routes::form::submit_form,
        crate::routes::form::get_policy,
    ),
    components(schemas(
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
        crate::routes::form::SubmitFormRequest,
        crate::routes::form::SubmitFormResponse,
    )),
    tags(
        (name = "form", description = "Form declaration and submission"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json: Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
