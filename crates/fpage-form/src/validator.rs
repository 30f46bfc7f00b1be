//! # Form Validator
//!
//! Runs every rule against a submission and collects the failures.
//!
//! Rules run in a fixed order and never short-circuit:
//!
//! 1. name shorter than the minimum
//! 2. name outside the allowed character class (overwrites 1)
//! 3. negative age
//! 4. age above the maximum
//! 5. birth date inconsistent with age
//!
//! Rules 1 and 2 target the same field, as do 3 and 4. [`FieldErrors`]
//! keeps the last violation set on a field.

use chrono::{Datelike, NaiveDate};
use fpage_core::{FieldErrors, FieldViolation, SubmissionInput};

use crate::policy::{AgeReckoning, ValidationPolicy};

/// Age as `year - birth year`, ignoring month and day.
pub fn calendar_age(birthday: NaiveDate, year: i32) -> i64 {
    i64::from(year) - i64::from(birthday.year())
}

/// Completed years between `birthday` and `today`.
///
/// Negative when `birthday` lies in the future. A 29 February birthday is
/// treated as reached on 1 March in non-leap years.
pub fn completed_years(birthday: NaiveDate, today: NaiveDate) -> i64 {
    let years = calendar_age(birthday, today.year());
    if (today.month(), today.day()) < (birthday.month(), birthday.day()) {
        years - 1
    } else {
        years
    }
}

/// Stateless validator for form submissions.
#[derive(Debug, Clone, Default)]
pub struct FormValidator {
    policy: ValidationPolicy,
}

impl FormValidator {
    pub fn new(policy: ValidationPolicy) -> Self {
        Self { policy }
    }

    /// The policy this validator applies.
    pub fn policy(&self) -> &ValidationPolicy {
        &self.policy
    }

    /// Validate against a bare year.
    ///
    /// The birth date check is always `current_year - birth year == age`,
    /// whatever the policy's reckoning; use [`validate_on`](Self::validate_on)
    /// when a full date is available.
    pub fn validate(&self, input: &SubmissionInput, current_year: i32) -> FieldErrors {
        let mut errors = self.check_name_and_age(input);
        if calendar_age(input.birthday, current_year) != input.age {
            errors.set(FieldViolation::BirthdayAgeMismatch);
        }
        errors
    }

    /// Validate against today's date, honouring the policy's age reckoning.
    pub fn validate_on(&self, input: &SubmissionInput, today: NaiveDate) -> FieldErrors {
        match self.policy.age_reckoning {
            AgeReckoning::CalendarYear => self.validate(input, today.year()),
            AgeReckoning::Anniversary => {
                let mut errors = self.check_name_and_age(input);
                if completed_years(input.birthday, today) != input.age {
                    errors.set(FieldViolation::BirthdayAgeMismatch);
                }
                errors
            }
        }
    }

    fn check_name_and_age(&self, input: &SubmissionInput) -> FieldErrors {
        let mut errors = FieldErrors::new();
        let name = input.name.as_str();

        if name.chars().count() < self.policy.name_min_length {
            errors.set(FieldViolation::NameTooShort {
                min: self.policy.name_min_length,
            });
        }
        if !self.policy.name_charset.allows(name) {
            errors.set(FieldViolation::NameInvalidCharacters {
                value: name.to_string(),
            });
        }

        if input.age < 0 {
            errors.set(FieldViolation::AgeNegative);
        }
        if input.age > self.policy.max_age {
            errors.set(FieldViolation::AgeAboveMaximum {
                age: input.age,
                max: self.policy.max_age,
            });
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::NameCharset;
    use fpage_core::{Field, Gender};
    use proptest::prelude::*;

    const YEAR: i32 = 2026;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn submission(name: &str, birth_year: i32, age: i64) -> SubmissionInput {
        SubmissionInput::new(name, date(birth_year, 6, 15), age, Gender::Male)
    }

    // ---- scenarios ----

    #[test]
    fn clean_submission_has_no_errors() {
        let v = FormValidator::default();
        assert!(v.validate(&submission("Al", YEAR - 30, 30), YEAR).is_empty());
    }

    #[test]
    fn single_letter_name_is_only_too_short() {
        let v = FormValidator::default();
        let errors = v.validate(&submission("A", YEAR - 30, 30), YEAR);
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get(Field::Name),
            Some(&FieldViolation::NameTooShort { min: 2 })
        );
    }

    #[test]
    fn implausible_age_is_reported() {
        let v = FormValidator::default();
        let errors = v.validate(&submission("Bob", 1990, 200), YEAR);
        assert_eq!(
            errors.get(Field::Age),
            Some(&FieldViolation::AgeAboveMaximum { age: 200, max: 150 })
        );
    }

    #[test]
    fn mismatched_birth_year_is_only_birthday_error() {
        let v = FormValidator::default();
        let errors = v.validate(&submission("Bob", YEAR - 30, 25), YEAR);
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get(Field::Birthday),
            Some(&FieldViolation::BirthdayAgeMismatch)
        );
    }

    #[test]
    fn negative_age_reports_not_born_yet() {
        let v = FormValidator::default();
        let errors = v.validate(&submission("Bob", YEAR + 2, -2), YEAR);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(Field::Age), Some(&FieldViolation::AgeNegative));
    }

    #[test]
    fn rules_do_not_short_circuit() {
        let v = FormValidator::default();
        let errors = v.validate(&submission("X", 1900, 500), YEAR);
        assert!(errors.contains(Field::Name));
        assert!(errors.contains(Field::Age));
        assert!(errors.contains(Field::Birthday));
    }

    // ---- last write wins ----

    #[test]
    fn short_invalid_name_reports_invalid_characters() {
        let v = FormValidator::default();
        let errors = v.validate(&submission("7", YEAR - 30, 30), YEAR);
        assert_eq!(
            errors.get(Field::Name),
            Some(&FieldViolation::NameInvalidCharacters {
                value: "7".to_string()
            })
        );
    }

    #[test]
    fn empty_name_reports_invalid_characters() {
        let v = FormValidator::default();
        let errors = v.validate(&submission("", YEAR - 30, 30), YEAR);
        assert_eq!(errors.get(Field::Name).map(|e| e.code()), Some("name_invalid_characters"));
    }

    // ---- policy variants ----

    #[test]
    fn printable_charset_accepts_full_names() {
        let v = FormValidator::new(ValidationPolicy {
            name_charset: NameCharset::Printable,
            ..ValidationPolicy::default()
        });
        assert!(v.validate(&submission("Ada Lovelace", YEAR - 30, 30), YEAR).is_empty());
        let strict = FormValidator::default();
        assert!(strict
            .validate(&submission("Ada Lovelace", YEAR - 30, 30), YEAR)
            .contains(Field::Name));
    }

    #[test]
    fn max_age_bound_is_inclusive_and_configurable() {
        let v = FormValidator::new(ValidationPolicy {
            max_age: 120,
            ..ValidationPolicy::default()
        });
        assert!(!v.validate(&submission("Old", YEAR - 120, 120), YEAR).contains(Field::Age));
        assert!(v.validate(&submission("Old", YEAR - 121, 121), YEAR).contains(Field::Age));
        let default = FormValidator::default();
        assert!(!default.validate(&submission("Old", YEAR - 121, 121), YEAR).contains(Field::Age));
    }

    #[test]
    fn name_length_counts_characters_not_bytes() {
        let v = FormValidator::new(ValidationPolicy {
            name_charset: NameCharset::Printable,
            ..ValidationPolicy::default()
        });
        // One character, two bytes.
        let errors = v.validate(&submission("é", YEAR - 30, 30), YEAR);
        assert_eq!(errors.get(Field::Name), Some(&FieldViolation::NameTooShort { min: 2 }));
    }

    // ---- age reckoning ----

    #[test]
    fn calendar_year_ignores_month_and_day() {
        let v = FormValidator::default();
        let before_birthday = SubmissionInput::new("Ada", date(1990, 12, 31), 35, Gender::Female);
        let today = date(2026, 1, 1);
        // Truly 35, but the calendar-year rule expects 36.
        assert!(v.validate_on(&before_birthday, today).contains(Field::Birthday));
    }

    #[test]
    fn anniversary_uses_completed_years() {
        let v = FormValidator::new(ValidationPolicy {
            age_reckoning: AgeReckoning::Anniversary,
            ..ValidationPolicy::default()
        });
        let input = SubmissionInput::new("Ada", date(1990, 12, 31), 35, Gender::Female);
        assert!(v.validate_on(&input, date(2026, 1, 1)).is_empty());
        assert!(v.validate_on(&input, date(2026, 12, 31)).contains(Field::Birthday));
    }

    #[test]
    fn anniversary_future_birthday_is_mismatch() {
        let v = FormValidator::new(ValidationPolicy {
            age_reckoning: AgeReckoning::Anniversary,
            ..ValidationPolicy::default()
        });
        let input = SubmissionInput::new("Ada", date(2027, 3, 1), 0, Gender::Female);
        let errors = v.validate_on(&input, date(2026, 10, 18));
        assert_eq!(
            errors.get(Field::Birthday),
            Some(&FieldViolation::BirthdayAgeMismatch)
        );
        assert!(!errors.contains(Field::Age));
    }

    #[test]
    fn validate_with_year_is_always_calendar_year() {
        let v = FormValidator::new(ValidationPolicy {
            age_reckoning: AgeReckoning::Anniversary,
            ..ValidationPolicy::default()
        });
        let input = SubmissionInput::new("Ada", date(1990, 12, 31), 36, Gender::Female);
        assert!(v.validate(&input, 2026).is_empty());
    }

    #[test]
    fn completed_years_cases() {
        assert_eq!(completed_years(date(2000, 3, 10), date(2026, 3, 9)), 25);
        assert_eq!(completed_years(date(2000, 3, 10), date(2026, 3, 10)), 26);
        assert_eq!(completed_years(date(2000, 2, 29), date(2025, 2, 28)), 24);
        assert_eq!(completed_years(date(2000, 2, 29), date(2025, 3, 1)), 25);
        assert_eq!(completed_years(date(2030, 1, 1), date(2026, 6, 1)), -4);
    }

    // ---- properties ----

    fn birthday_strategy() -> impl Strategy<Value = NaiveDate> {
        (1850i32..2100, 1u32..=12, 1u32..=28).prop_map(|(y, m, d)| date(y, m, d))
    }

    proptest! {
        /// Any name shorter than the minimum always yields a name error.
        #[test]
        fn short_names_always_fail(name in "\\PC{0,1}", age in 0i64..=150) {
            let v = FormValidator::default();
            let errors = v.validate(&submission(&name, YEAR - age as i32, age), YEAR);
            prop_assert!(errors.contains(Field::Name));
        }

        /// Alphabetic names of at least two letters never yield a name error.
        #[test]
        fn alphabetic_names_pass(name in "[A-Za-z]{2,40}", age in 0i64..=150) {
            let v = FormValidator::default();
            let errors = v.validate(&submission(&name, YEAR - age as i32, age), YEAR);
            prop_assert!(!errors.contains(Field::Name));
        }

        /// Printable names of at least two characters pass under the printable class.
        #[test]
        fn printable_names_pass(name in "[ -~]{2,40}") {
            let v = FormValidator::new(ValidationPolicy {
                name_charset: NameCharset::Printable,
                ..ValidationPolicy::default()
            });
            let errors = v.validate(&submission(&name, YEAR - 30, 30), YEAR);
            prop_assert!(!errors.contains(Field::Name));
        }

        /// Age errors appear exactly when age is outside [0, max_age].
        #[test]
        fn age_bounds(age in -1000i64..1000, max_age in 0i64..300) {
            let v = FormValidator::new(ValidationPolicy { max_age, ..ValidationPolicy::default() });
            let errors = v.validate(&submission("Bob", 2000, age), YEAR);
            prop_assert_eq!(errors.contains(Field::Age), age < 0 || age > max_age);
        }

        /// The birthday error appears exactly when the calendar years disagree.
        #[test]
        fn birthday_consistency(
            birthday in birthday_strategy(),
            age in -50i64..200,
            current_year in 1900i32..2200,
        ) {
            let v = FormValidator::default();
            let input = SubmissionInput::new("Bob", birthday, age, Gender::Other);
            let errors = v.validate(&input, current_year);
            let consistent = i64::from(current_year) - i64::from(birthday.year()) == age;
            prop_assert_eq!(errors.contains(Field::Birthday), !consistent);
        }

        /// Anniversary reckoning accepts exactly the completed-years age.
        #[test]
        fn anniversary_accepts_completed_years(
            birthday in birthday_strategy(),
            today in birthday_strategy(),
        ) {
            prop_assume!(today >= birthday);
            let v = FormValidator::new(ValidationPolicy {
                age_reckoning: AgeReckoning::Anniversary,
                max_age: 1000,
                ..ValidationPolicy::default()
            });
            let age = completed_years(birthday, today);
            let input = SubmissionInput::new("Bob", birthday, age, Gender::Other);
            prop_assert!(v.validate_on(&input, today).is_empty());
        }
    }
}
