//! # fpage-core: Foundational Types for the Form Page
//!
//! Defines the value types every other crate in the workspace agrees on:
//! the submitted record, the field-level error map, the declarative form
//! schema, and the clock used to answer "what year is it".
//! Every other crate depends on `fpage-core`; it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Typed fields.** `Field` is an enum, not a string. Error maps,
//!    schema entries, and messages are all keyed by it.
//!
//! 2. **Typed choices.** `Gender` is a closed enum; an unknown option is a
//!    deserialization failure, never a silent fallback.
//!
//! 3. **Errors are values.** Rule failures are [`FieldViolation`]s collected
//!    in a [`FieldErrors`] map with last-write-wins semantics per field.
//!    [`FpageError`] is reserved for input that cannot be parsed at all.
//!
//! 4. **Injected time.** Nothing reads the system clock directly; callers
//!    hand in a [`Clock`].
//!
//! ## Crate Policy
//!
//! - No dependencies on other `fpage-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod field;
pub mod schema;
pub mod submission;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use error::FpageError;
pub use field::{Field, FieldErrors, FieldViolation};
pub use schema::{FieldKind, FieldSpec, FormSchema, SelectOption};
pub use submission::{Gender, SubmissionInput};
pub use temporal::{parse_date, Clock, FixedClock, SystemClock};
