//! # fpage-cli: Form Page Command-Line Interface
//!
//! ## Subcommands
//!
//! - `validate`: Run a submission through the rules and print the outcome
//! - `schema`: Print the form declaration as JSON
//! - `policy`: Print the effective validation policy as YAML
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from the handlers.
//! - Handlers delegate to `fpage-form`; no rule logic here.

pub mod policy;
pub mod schema;
pub mod validate;
