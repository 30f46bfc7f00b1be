//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor.
//!
//! Holds the validator and the collaborators the submission flow needs.
//! There is no per-submission storage: an accepted submission exists only
//! in its response and its log record.

use std::path::PathBuf;
use std::sync::Arc;

use fpage_core::{Clock, FormSchema, SystemClock};
use fpage_form::{FormValidator, SubmissionLogger, TracingLogger, ValidationPolicy};

use crate::middleware::metrics::ApiMetrics;

/// Process configuration, read from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Validation policy YAML. If `None`, the default policy applies.
    pub policy_path: Option<PathBuf>,
    /// Whether request counters are collected.
    pub metrics_enabled: bool,
}

impl AppConfig {
    /// Build configuration from `PORT`, `FPAGE_POLICY`, and
    /// `FPAGE_METRICS_ENABLED`.
    ///
    /// An unparseable `PORT` falls back to 8080. Metrics are on unless
    /// `FPAGE_METRICS_ENABLED` is `false`.
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);
        let policy_path = std::env::var_os("FPAGE_POLICY")
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);
        let metrics_enabled = std::env::var("FPAGE_METRICS_ENABLED")
            .map(|v| v.to_lowercase() != "false")
            .unwrap_or(true);
        Self {
            port,
            policy_path,
            metrics_enabled,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            policy_path: None,
            metrics_enabled: true,
        }
    }
}

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub schema: Arc<FormSchema>,
    pub validator: Arc<FormValidator>,
    pub clock: Arc<dyn Clock>,
    pub logger: Arc<dyn SubmissionLogger>,
    pub metrics: ApiMetrics,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("policy", self.validator.policy())
            .field("today", &self.clock.today())
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Default configuration and default policy.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default(), ValidationPolicy::default())
    }

    /// System clock, tracing logger, and the given policy.
    pub fn with_config(config: AppConfig, policy: ValidationPolicy) -> Self {
        Self {
            config,
            schema: Arc::new(FormSchema::form_page()),
            validator: Arc::new(FormValidator::new(policy)),
            clock: Arc::new(SystemClock),
            logger: Arc::new(TracingLogger),
            metrics: ApiMetrics::new(),
        }
    }

    /// Replace the clock.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Replace the submission logger.
    pub fn with_logger(mut self, logger: Arc<dyn SubmissionLogger>) -> Self {
        self.logger = logger;
        self
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
