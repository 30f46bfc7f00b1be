//! # Startup Bootstrap
//!
//! Turns an [`AppConfig`] into a ready [`AppState`]:
//!
//! 1. **Load Policy**: Read the YAML file named by `FPAGE_POLICY`, or use
//!    the default policy when unset.
//! 2. **Build State**: Validator, schema, clock, logger.
//! 3. **Log Identity**: One structured startup line with the effective policy.

use std::path::Path;

use fpage_form::{PolicyError, ValidationPolicy};

use crate::state::{AppConfig, AppState};

/// Errors during bootstrap.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    /// Policy file not found at the configured path.
    #[error("policy file not found: {path}")]
    PolicyNotFound { path: String },

    /// Policy file exists but is unusable.
    #[error("invalid policy: {0}")]
    InvalidPolicy(#[from] PolicyError),
}

/// Build the application state from configuration.
pub fn bootstrap(config: AppConfig) -> Result<AppState, BootstrapError> {
    let policy = match &config.policy_path {
        Some(path) => load_policy(path)?,
        None => {
            tracing::info!("FPAGE_POLICY not set; using default validation policy");
            ValidationPolicy::default()
        }
    };

    tracing::info!(
        name_min_length = policy.name_min_length,
        name_charset = ?policy.name_charset,
        max_age = policy.max_age,
        age_reckoning = ?policy.age_reckoning,
        metrics = config.metrics_enabled,
        "form page configured"
    );

    Ok(AppState::with_config(config, policy))
}

fn load_policy(path: &Path) -> Result<ValidationPolicy, BootstrapError> {
    if !path.exists() {
        return Err(BootstrapError::PolicyNotFound {
            path: path.display().to_string(),
        });
    }
    let policy = ValidationPolicy::from_file(path)?;
    tracing::info!(path = %path.display(), "loaded validation policy");
    Ok(policy)
}
