//! # Form Schema
//!
//! The declarative description of the form: which fields exist, what kind
//! of input each one is, its title, whether it is required, and the option
//! list for select elements. Rendering layers consume this value; nothing
//! here knows about HTML.

use serde::{Deserialize, Serialize};

use crate::field::Field;
use crate::submission::Gender;

/// Input element kind for a declared field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Textfield,
    Date,
    Number,
    Select,
}

/// One `value` / `label` pair of a select element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// Declaration of a single form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub field: Field,
    pub kind: FieldKind,
    pub title: String,
    pub required: bool,
    /// Present only for `select` fields.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
}

/// The complete form declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSchema {
    /// Stable form identifier.
    pub form_id: String,
    /// Introductory text shown above the fields.
    pub description: String,
    /// Fields in display order.
    pub fields: Vec<FieldSpec>,
    /// Label of the primary submit action.
    pub submit_label: String,
}

impl FormSchema {
    /// The form page declaration: name, birth date, age, and gender, all
    /// required.
    pub fn form_page() -> Self {
        let gender_options = Gender::ALL
            .into_iter()
            .map(|g| SelectOption {
                value: g.as_str().to_string(),
                label: g.label().to_string(),
            })
            .collect();

        Self {
            form_id: "form_page".to_string(),
            description: "This is a form which will take in a few details and display them."
                .to_string(),
            fields: vec![
                FieldSpec::required(Field::Name, FieldKind::Textfield, "Your name:"),
                FieldSpec::required(Field::Birthday, FieldKind::Date, "Your birth date:"),
                FieldSpec::required(Field::Age, FieldKind::Number, "Your age:"),
                FieldSpec {
                    options: gender_options,
                    ..FieldSpec::required(Field::Gender, FieldKind::Select, "Your gender:")
                },
            ],
            submit_label: "Submit".to_string(),
        }
    }

    /// Look up the declaration of `field`.
    pub fn field(&self, field: Field) -> Option<&FieldSpec> {
        self.fields.iter().find(|spec| spec.field == field)
    }

    /// Title of `field`, falling back to its machine name if undeclared.
    pub fn title(&self, field: Field) -> &str {
        self.field(field)
            .map(|spec| spec.title.as_str())
            .unwrap_or_else(|| field.as_str())
    }
}

impl FieldSpec {
    fn required(field: Field, kind: FieldKind, title: &str) -> Self {
        Self {
            field,
            kind,
            title: title.to_string(),
            required: true,
            options: Vec::new(),
        }
    }
}

impl Default for FormSchema {
    fn default() -> Self {
        Self::form_page()
    }
}
