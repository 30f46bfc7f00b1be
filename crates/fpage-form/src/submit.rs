//! # Submission Flow
//!
//! Validates a submission and, when it is clean, performs the two side
//! effects of accepting it: a confirmation message for the user and a log
//! record for operators. Both go through collaborators the caller passes in.

use fpage_core::{Clock, FieldErrors, SubmissionInput};
use parking_lot::Mutex;
use serde::Serialize;
use uuid::Uuid;

use crate::validator::FormValidator;

/// Receives user-facing status messages.
pub trait Messenger: Send + Sync {
    /// Queue a status message for display.
    fn add_status(&self, message: &str);
}

/// Records accepted submissions.
pub trait SubmissionLogger: Send + Sync {
    /// Called once per accepted submission.
    fn accepted(&self, submission_id: Uuid, input: &SubmissionInput);
}

/// Messenger that buffers messages in memory until taken.
#[derive(Debug, Default)]
pub struct InMemoryMessenger {
    messages: Mutex<Vec<String>>,
}

impl InMemoryMessenger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of queued messages.
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }

    /// Drain queued messages.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.messages.lock())
    }
}

impl Messenger for InMemoryMessenger {
    fn add_status(&self, message: &str) {
        self.messages.lock().push(message.to_string());
    }
}

/// Logger that emits one `tracing` info event per accepted submission.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl SubmissionLogger for TracingLogger {
    fn accepted(&self, submission_id: Uuid, input: &SubmissionInput) {
        tracing::info!(
            %submission_id,
            name = %input.name,
            "form submission accepted from {}",
            input.name
        );
    }
}

/// Result of an accepted submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Confirmation {
    pub submission_id: Uuid,
    pub message: String,
}

/// What happened to a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Accepted(Confirmation),
    Rejected(FieldErrors),
}

impl SubmissionOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    /// The field errors, if the submission was rejected.
    pub fn errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Accepted(_) => None,
            Self::Rejected(errors) => Some(errors),
        }
    }
}

/// The confirmation text shown to the user after acceptance.
pub fn confirmation_message(input: &SubmissionInput) -> String {
    format!(
        "Your name is {} and you are {}. You were born on {} and are {} years old.",
        input.name,
        input.gender,
        input.birthday.format("%Y-%m-%d"),
        input.age
    )
}

/// Validate `input` against `clock`'s today and, if clean, accept it.
///
/// A rejected submission produces no message and no log record.
pub fn submit(
    input: &SubmissionInput,
    validator: &FormValidator,
    clock: &dyn Clock,
    messenger: &dyn Messenger,
    logger: &dyn SubmissionLogger,
) -> SubmissionOutcome {
    let errors = validator.validate_on(input, clock.today());
    if !errors.is_empty() {
        tracing::debug!(fields = errors.len(), "form submission rejected");
        return SubmissionOutcome::Rejected(errors);
    }

    let confirmation = Confirmation {
        submission_id: Uuid::new_v4(),
        message: confirmation_message(input),
    };
    messenger.add_status(&confirmation.message);
    logger.accepted(confirmation.submission_id, input);

    SubmissionOutcome::Accepted(confirmation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use fpage_core::{Field, FixedClock, Gender};

    #[derive(Default)]
    struct RecordingLogger {
        names: Mutex<Vec<(Uuid, String)>>,
    }

    impl SubmissionLogger for RecordingLogger {
        fn accepted(&self, submission_id: Uuid, input: &SubmissionInput) {
            self.names.lock().push((submission_id, input.name.clone()));
        }
    }

    fn clock() -> FixedClock {
        FixedClock(NaiveDate::from_ymd_opt(2026, 10, 18).unwrap())
    }

    fn input(name: &str, age: i64) -> SubmissionInput {
        SubmissionInput::new(
            name,
            NaiveDate::from_ymd_opt(1996, 3, 1).unwrap(),
            age,
            Gender::Male,
        )
    }

    #[test]
    fn accepted_submission_messages_and_logs() {
        let messenger = InMemoryMessenger::new();
        let logger = RecordingLogger::default();
        let outcome = submit(
            &input("Al", 30),
            &FormValidator::default(),
            &clock(),
            &messenger,
            &logger,
        );

        let confirmation = match outcome {
            SubmissionOutcome::Accepted(c) => c,
            other => panic!("expected acceptance, got {other:?}"),
        };
        assert!(confirmation.message.contains("Al"));
        assert!(confirmation.message.contains("30"));
        assert_eq!(messenger.messages(), vec![confirmation.message.clone()]);

        let logged = logger.names.lock();
        assert_eq!(logged.len(), 1);
        assert_eq!(logged[0], (confirmation.submission_id, "Al".to_string()));
    }

    #[test]
    fn rejected_submission_has_no_side_effects() {
        let messenger = InMemoryMessenger::new();
        let logger = RecordingLogger::default();
        let outcome = submit(
            &input("A", 30),
            &FormValidator::default(),
            &clock(),
            &messenger,
            &logger,
        );

        assert!(!outcome.is_accepted());
        assert!(outcome.errors().unwrap().contains(Field::Name));
        assert!(messenger.messages().is_empty());
        assert!(logger.names.lock().is_empty());
    }

    #[test]
    fn confirmation_message_format() {
        let mut s = input("Grace", 30);
        s.gender = Gender::PreferNotToSay;
        assert_eq!(
            confirmation_message(&s),
            "Your name is Grace and you are prefer not to say. \
             You were born on 1996-03-01 and are 30 years old."
        );
    }

    #[test]
    fn messenger_take_drains() {
        let messenger = InMemoryMessenger::new();
        messenger.add_status("one");
        messenger.add_status("two");
        assert_eq!(messenger.take(), vec!["one", "two"]);
        assert!(messenger.messages().is_empty());
    }

    #[test]
    fn each_acceptance_gets_a_fresh_id() {
        let messenger = InMemoryMessenger::new();
        let v = FormValidator::default();
        let a = submit(&input("Al", 30), &v, &clock(), &messenger, &TracingLogger);
        let b = submit(&input("Al", 30), &v, &clock(), &messenger, &TracingLogger);
        match (a, b) {
            (SubmissionOutcome::Accepted(a), SubmissionOutcome::Accepted(b)) => {
                assert_ne!(a.submission_id, b.submission_id)
            }
            other => panic!("expected two acceptances, got {other:?}"),
        }
    }
}
