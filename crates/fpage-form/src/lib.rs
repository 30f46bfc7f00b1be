//! # fpage-form: Validation and Submission
//!
//! The only logic in the form page lives here:
//!
//! - [`policy`]: which rule variants apply (name character class, upper
//!   age bound, how age is reckoned from the birth date), loadable from YAML.
//! - [`validator`]: [`FormValidator`], a pure function from a submission
//!   to its field-level errors.
//! - [`submit`]: the accept path: on a clean submission, format the
//!   confirmation, hand it to a [`Messenger`], and log the acceptance
//!   through a [`SubmissionLogger`].
//!
//! ## Crate Policy
//!
//! - Collaborators are trait parameters. There is no global messenger or
//!   logger to reach for.
//! - Rule failures are returned as [`fpage_core::FieldErrors`], never as `Err`.

pub mod policy;
pub mod submit;
pub mod validator;

pub use policy::{AgeReckoning, NameCharset, PolicyError, ValidationPolicy};
pub use submit::{
    confirmation_message, submit, Confirmation, InMemoryMessenger, Messenger, SubmissionLogger,
    SubmissionOutcome, TracingLogger,
};
pub use validator::{calendar_age, completed_years, FormValidator};
