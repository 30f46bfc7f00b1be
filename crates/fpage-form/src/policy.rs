//! # Validation Policy
//!
//! Selects between the rule variants the form has shipped with. Two
//! deployments of the form disagreed on the name character class and the
//! upper age bound, so both are configuration here rather than constants.
//!
//! ## YAML
//!
//! ```yaml
//! name_min_length: 2
//! name_charset: alphabetic   # or: printable
//! max_age: 150
//! age_reckoning: calendar_year   # or: anniversary
//! ```
//!
//! Every key is optional; omitted keys take the defaults shown.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors loading or checking a policy.
#[derive(Error, Debug)]
pub enum PolicyError {
    /// Policy file could not be read.
    #[error("failed to read policy file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Policy document is not valid YAML or has unknown keys.
    #[error("failed to parse policy: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Policy parsed but holds an unusable value.
    #[error("invalid policy: {0}")]
    Invalid(String),
}

/// Character class a name must be drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameCharset {
    /// ASCII letters only. No spaces, hyphens, or apostrophes.
    #[default]
    Alphabetic,
    /// Any character that is not a control character.
    Printable,
}

impl NameCharset {
    /// Whether `name` is non-empty and drawn entirely from this class.
    pub fn allows(&self, name: &str) -> bool {
        if name.is_empty() {
            return false;
        }
        match self {
            Self::Alphabetic => name.chars().all(|c| c.is_ascii_alphabetic()),
            Self::Printable => name.chars().all(|c| !c.is_control()),
        }
    }
}

/// How the birth date is turned into an age for the consistency check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeReckoning {
    /// `current year - birth year`. Ignores month and day, so the check is
    /// off by one for anyone whose birthday has not come yet this year.
    #[default]
    CalendarYear,
    /// Completed years as of today.
    Anniversary,
}

/// Validation rule configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidationPolicy {
    /// Minimum name length in characters.
    pub name_min_length: usize,
    pub name_charset: NameCharset,
    /// Largest accepted age, inclusive.
    pub max_age: i64,
    pub age_reckoning: AgeReckoning,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            name_min_length: 2,
            name_charset: NameCharset::Alphabetic,
            max_age: 150,
            age_reckoning: AgeReckoning::CalendarYear,
        }
    }
}

impl ValidationPolicy {
    /// Parse and check a policy from a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, PolicyError> {
        // An empty document is the default policy.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let policy: Self = serde_yaml::from_str(yaml)?;
        policy.check()?;
        Ok(policy)
    }

    /// Read, parse, and check a policy file.
    pub fn from_file(path: &Path) -> Result<Self, PolicyError> {
        let content = std::fs::read_to_string(path).map_err(|source| PolicyError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Render as YAML.
    pub fn to_yaml(&self) -> Result<String, PolicyError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Reject values that would make the rules meaningless.
    pub fn check(&self) -> Result<(), PolicyError> {
        if self.name_min_length == 0 {
            return Err(PolicyError::Invalid(
                "name_min_length must be at least 1".to_string(),
            ));
        }
        if self.max_age < 0 {
            return Err(PolicyError::Invalid(format!(
                "max_age must not be negative, got {}",
                self.max_age
            )));
        }
        Ok(())
    }
}
