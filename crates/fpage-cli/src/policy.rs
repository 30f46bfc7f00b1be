//! # Policy Subcommand
//!
//! Loads the validation policy the same way `validate` does and prints it,
//! so operators can confirm which rule variants are in effect.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use fpage_form::ValidationPolicy;

/// Arguments for the policy subcommand.
#[derive(Args, Debug)]
pub struct PolicyArgs {
    /// Validation policy YAML. Defaults to the built-in policy.
    #[arg(long, env = "FPAGE_POLICY")]
    pub policy: Option<PathBuf>,
}

/// Load the policy at `path`, or the default policy when `None`.
pub fn load_policy(path: Option<&Path>) -> anyhow::Result<ValidationPolicy> {
    match path {
        Some(path) => {
            let policy = ValidationPolicy::from_file(path)
                .with_context(|| format!("loading policy from {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded validation policy");
            Ok(policy)
        }
        None => Ok(ValidationPolicy::default()),
    }
}

/// Print the effective policy as YAML.
pub fn run(args: &PolicyArgs) -> anyhow::Result<()> {
    let policy = load_policy(args.policy.as_deref())?;
    print!("{}", policy.to_yaml()?);
    Ok(())
}
