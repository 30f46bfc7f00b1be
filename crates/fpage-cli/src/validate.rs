//! # Validate Subcommand
//!
//! Runs one submission through the form rules. The submission comes either
//! from individual flags or from a JSON/YAML file shaped like the HTTP
//! request body.
//!
//! ```text
//! fpage validate --name Ada --birthday 1996-03-01 --age 30 --gender female
//! fpage validate --file submission.yaml --policy strict.yaml --json
//! ```

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::Args;
use fpage_core::{parse_date, Clock, FieldErrors, FixedClock, Gender, SubmissionInput, SystemClock};
use fpage_form::{FormValidator, InMemoryMessenger, SubmissionOutcome, TracingLogger};
use serde::Serialize;

use crate::policy::load_policy;

/// Arguments for the validate subcommand.
#[derive(Args, Debug, Default)]
pub struct ValidateArgs {
    /// Read the submission from a JSON or YAML file.
    #[arg(long, conflicts_with_all = ["name", "birthday", "age", "gender"])]
    pub file: Option<PathBuf>,

    /// Submitter's name.
    #[arg(long, required_unless_present = "file")]
    pub name: Option<String>,

    /// Date of birth, YYYY-MM-DD.
    #[arg(long, required_unless_present = "file")]
    pub birthday: Option<String>,

    /// Age in whole years.
    #[arg(long, required_unless_present = "file", allow_hyphen_values = true)]
    pub age: Option<i64>,

    /// male, female, other, or prefer_not_to_say.
    #[arg(long, required_unless_present = "file")]
    pub gender: Option<String>,

    /// Validate as of this date (YYYY-MM-DD) instead of today.
    #[arg(long)]
    pub today: Option<String>,

    /// Validation policy YAML. Defaults to the built-in policy.
    #[arg(long, env = "FPAGE_POLICY")]
    pub policy: Option<PathBuf>,

    /// Print the outcome as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Outcome of one validation run.
#[derive(Debug, Serialize)]
pub struct Report {
    pub accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "FieldErrors::is_empty")]
    pub errors: FieldErrors,
}

impl Report {
    /// Human-readable rendering: the confirmation, or one `field: message`
    /// line per error.
    pub fn to_text(&self) -> String {
        match &self.message {
            Some(message) if self.accepted => message.clone(),
            _ => self
                .errors
                .iter()
                .map(|(field, violation)| format!("{field}: {violation}"))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

/// Build the submission from a file or from individual flags.
pub fn read_input(args: &ValidateArgs) -> anyhow::Result<SubmissionInput> {
    if let Some(path) = &args.file {
        return load_submission_file(path);
    }

    let (Some(name), Some(birthday), Some(age), Some(gender)) =
        (&args.name, &args.birthday, args.age, &args.gender)
    else {
        bail!("--name, --birthday, --age, and --gender are required without --file");
    };

    Ok(SubmissionInput::new(
        name.clone(),
        parse_date(birthday)?,
        age,
        gender.parse::<Gender>()?,
    ))
}

/// Read a submission from JSON, or YAML when the extension is `.yaml`/`.yml`.
pub fn load_submission_file(path: &Path) -> anyhow::Result<SubmissionInput> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading submission {}", path.display()))?;
    let is_yaml = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));

    let input = if is_yaml {
        serde_yaml::from_str(&content)
            .with_context(|| format!("parsing YAML submission {}", path.display()))?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("parsing JSON submission {}", path.display()))?
    };
    Ok(input)
}

/// Validate the submission described by `args`.
pub fn evaluate(args: &ValidateArgs) -> anyhow::Result<Report> {
    let input = read_input(args)?;
    let validator = FormValidator::new(load_policy(args.policy.as_deref())?);
    let clock: Box<dyn Clock> = match &args.today {
        Some(today) => Box::new(FixedClock(parse_date(today)?)),
        None => Box::new(SystemClock),
    };

    let messenger = InMemoryMessenger::new();
    let outcome = fpage_form::submit(
        &input,
        &validator,
        clock.as_ref(),
        &messenger,
        &TracingLogger,
    );

    Ok(match outcome {
        SubmissionOutcome::Accepted(confirmation) => Report {
            accepted: true,
            message: Some(confirmation.message),
            errors: FieldErrors::new(),
        },
        SubmissionOutcome::Rejected(errors) => Report {
            accepted: false,
            message: None,
            errors,
        },
    })
}

/// Run the subcommand, print the outcome, and report whether it was accepted.
pub fn run(args: &ValidateArgs) -> anyhow::Result<bool> {
    let report = evaluate(args)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.to_text());
    }
    Ok(report.accepted)
}
