//! # fpage-api: Axum Host for the Form Page
//!
//! Serves the form declaration and accepts submissions over HTTP. All rule
//! logic is delegated to `fpage-form`; this crate only decodes requests,
//! wires collaborators, and maps outcomes to responses.
//!
//! ## Routes
//!
//! | Method | Path                | Purpose |
//! |--------|---------------------|---------|
//! | GET    | `/v1/form`          | Form declaration |
//! | POST   | `/v1/form`          | Submit; 200 confirmation or 422 field errors |
//! | GET    | `/v1/form/policy`   | Effective validation policy |
//! | GET    | `/openapi.json`     | OpenAPI document |
//! | GET    | `/metrics`          | Request and submission counters |
//! | GET    | `/health/*`         | Liveness and readiness probes |
//!
//! ## Middleware Stack
//!
//! ```text
//! TraceLayer → MetricsMiddleware → Handler
//! ```

pub mod bootstrap;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::middleware::from_fn_with_state;
use axum::routing::get;
use axum::Router;

pub use error::AppError;
pub use state::{AppConfig, AppState};

/// Assemble the full application router with all routes and middleware.
///
/// Health probes and `/metrics` sit outside the metrics middleware so that
/// probe traffic does not inflate the request counters.
pub fn app(state: AppState) -> Router {
    let mut api = Router::new()
        .merge(routes::form::router())
        .merge(openapi::router());

    if state.config.metrics_enabled {
        api = api.layer(from_fn_with_state(
            state.clone(),
            middleware::metrics::metrics_middleware,
        ));
    }

    let api = api
        .layer(middleware::tracing_layer::layer())
        .with_state(state.clone());

    let ops = Router::new()
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness))
        .route("/metrics", get(middleware::metrics::render))
        .with_state(state);

    Router::new().merge(ops).merge(api).fallback(not_found)
}

/// Fallback for unrouted paths, so they get the JSON error envelope.
async fn not_found(uri: axum::http::Uri) -> AppError {
    AppError::NotFound(format!("no route for {}", uri.path()))
}

/// Liveness probe: always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe: the validator is built before the router, so a
/// running router is ready.
async fn readiness() -> &'static str {
    "ready"
}
