//! # Submission Record
//!
//! The flat record a user submits through the form. Every field is
//! mandatory at the type level: a body missing a field fails to
//! deserialize and never reaches the validation rules.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::FpageError;

/// Gender options offered by the form's select element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
    /// Accepts the spaced spelling `prefer not to say` on input.
    #[serde(alias = "prefer not to say")]
    PreferNotToSay,
}

impl Gender {
    /// All options, in the order the form lists them.
    pub const ALL: [Gender; 4] = [
        Gender::Male,
        Gender::Female,
        Gender::Other,
        Gender::PreferNotToSay,
    ];

    /// Wire value of the option.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
            Self::PreferNotToSay => "prefer_not_to_say",
        }
    }

    /// Label shown in the select element.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Other => "Other",
            Self::PreferNotToSay => "Prefer not to say",
        }
    }
}

/// Renders the option as a lowercase phrase for use inside sentences.
impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PreferNotToSay => f.write_str("prefer not to say"),
            other => f.write_str(other.as_str()),
        }
    }
}

impl FromStr for Gender {
    type Err = FpageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(' ', "_");
        Gender::ALL
            .into_iter()
            .find(|g| g.as_str() == normalized)
            .ok_or_else(|| FpageError::UnknownGender(s.to_string()))
    }
}

/// One complete form submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionInput {
    /// Submitter's name, as typed.
    pub name: String,
    /// Date of birth, `YYYY-MM-DD` on the wire.
    #[serde(alias = "birth_date", alias = "birthDate")]
    pub birthday: NaiveDate,
    /// Claimed age in whole years. Signed so that negative input can be
    /// reported rather than rejected at parse time.
    pub age: i64,
    pub gender: Gender,
}

impl SubmissionInput {
    /// Assemble a submission from already-typed values.
    pub fn new(name: impl Into<String>, birthday: NaiveDate, age: i64, gender: Gender) -> Self {
        Self {
            name: name.into(),
            birthday,
            age,
            gender,
        }
    }
}
