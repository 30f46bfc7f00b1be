//! # Form Fields and Field-Level Errors
//!
//! [`Field`] names the inputs declared on the form. A [`FieldViolation`] is
//! one failed rule, and [`FieldErrors`] collects them per field.
//!
//! ## Accumulation
//!
//! `FieldErrors` holds at most one violation per field. Setting a second
//! violation on the same field replaces the first, so the last rule to
//! fail on a field is the one reported.

use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

/// An input declared on the form.
///
/// Variant order is display order, and `FieldErrors` iterates in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// Free-text name of the submitter.
    Name,
    /// Date of birth.
    Birthday,
    /// Age in whole years.
    Age,
    /// Selected gender option.
    Gender,
}

impl Field {
    /// All fields, in display order.
    pub const ALL: [Field; 4] = [Field::Name, Field::Birthday, Field::Age, Field::Gender];

    /// Machine name of the field, as used in request bodies and error maps.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Birthday => "birthday",
            Self::Age => "age",
            Self::Gender => "gender",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single failed validation rule.
///
/// The `Display` output is the user-facing message shown next to the field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldViolation {
    /// A required field was submitted empty.
    #[error("{title} field is required.")]
    Required {
        /// The empty field.
        field: Field,
        /// Human-readable field title.
        title: String,
    },

    /// The name is shorter than the configured minimum.
    #[error("Please enter a valid name of at least {min} characters.")]
    NameTooShort {
        /// Minimum accepted length in characters.
        min: usize,
    },

    /// The name contains characters outside the allowed class.
    #[error("The name {value} contains invalid characters.")]
    NameInvalidCharacters {
        /// The rejected name, verbatim.
        value: String,
    },

    /// A negative age.
    #[error("Hmmm... according to various calculations, you aren't even born yet!")]
    AgeNegative,

    /// An age above the configured plausible maximum.
    #[error("An age of {age} exceeds the plausible maximum of {max} years.")]
    AgeAboveMaximum {
        /// The submitted age.
        age: i64,
        /// The configured upper bound.
        max: i64,
    },

    /// The birth date does not produce the submitted age.
    #[error("Your birth date and age do not correspond.")]
    BirthdayAgeMismatch,
}

impl FieldViolation {
    /// The field this violation is reported against.
    pub fn field(&self) -> Field {
        match self {
            Self::Required { field, .. } => *field,
            Self::NameTooShort { .. } | Self::NameInvalidCharacters { .. } => Field::Name,
            Self::AgeNegative | Self::AgeAboveMaximum { .. } => Field::Age,
            Self::BirthdayAgeMismatch => Field::Birthday,
        }
    }

    /// Stable machine-readable code for this violation.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Required { .. } => "required",
            Self::NameTooShort { .. } => "name_too_short",
            Self::NameInvalidCharacters { .. } => "name_invalid_characters",
            Self::AgeNegative => "age_negative",
            Self::AgeAboveMaximum { .. } => "age_above_maximum",
            Self::BirthdayAgeMismatch => "birthday_age_mismatch",
        }
    }
}

/// Field-level errors for one submission, at most one per field.
///
/// Serializes as a JSON object mapping field name to message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, FieldViolation>);

impl FieldErrors {
    /// An empty error set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation against its field, replacing any earlier one.
    ///
    /// Returns the replaced violation, if there was one.
    pub fn set(&mut self, violation: FieldViolation) -> Option<FieldViolation> {
        self.0.insert(violation.field(), violation)
    }

    /// The violation recorded for `field`, if any.
    pub fn get(&self, field: Field) -> Option<&FieldViolation> {
        self.0.get(&field)
    }

    /// Whether `field` has a recorded violation.
    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    /// Whether the submission passed every rule.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields with a violation.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate violations in field display order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &FieldViolation)> {
        self.0.iter().map(|(field, violation)| (*field, violation))
    }

    /// Field name to message, for display or serialization.
    pub fn messages(&self) -> BTreeMap<&'static str, String> {
        self.iter()
            .map(|(field, violation)| (field.as_str(), violation.to_string()))
            .collect()
    }
}

impl Serialize for FieldErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (field, violation) in &self.0 {
            map.serialize_entry(field.as_str(), &violation.to_string())?;
        }
        map.end()
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, violation) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {violation}")?;
            first = false;
        }
        Ok(())
    }
}
