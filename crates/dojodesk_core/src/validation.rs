//! Form-level input validation.
//!
//! # Responsibility
//! - Check required fields and formats before any store call.
//! - Report problems as field-level messages for inline display.
//! - Convert accepted form input into store create/patch requests.
//!
//! # Invariants
//! - Text inputs are trimmed before checks and before conversion.
//! - Errors are reported in form field order.

use crate::model::class_session::{ClassSessionPatch, NewClassSession};
use crate::model::student::{NewStudent, StudentPatch};
use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Accepted `scheduled_at` input layouts, tried in order.
const SCHEDULE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
];

/// Canonical display/input layout for class times.
pub const SCHEDULE_DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Default belt label for new students.
pub const DEFAULT_RANK: &str = "White";

/// One inline message bound to a form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Ordered field errors for one form submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormErrors {
    errors: Vec<FieldError>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a single-field error set.
    pub fn single(field: &str, message: &str) -> Self {
        let mut errors = Self::new();
        errors.push(field, message);
        errors
    }

    pub fn push(&mut self, field: &str, message: &str) {
        self.errors.push(FieldError {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// First message for `field`, if any.
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, FormErrors> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

impl Display for FormErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let rendered = self
            .errors
            .iter()
            .map(|error| format!("{}: {}", error.field, error.message))
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "{rendered}")
    }
}

impl Error for FormErrors {}

/// Raw login form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Checks required fields. The password is not trimmed.
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::new();
        if self.username.trim().is_empty() {
            errors.push("username", "username is required");
        }
        if self.password.is_empty() {
            errors.push("password", "password is required");
        }
        errors.into_result(|| ())
    }
}

/// Raw student form input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentForm {
    pub name: String,
    pub email: String,
    pub rank: String,
    pub active: bool,
}

impl Default for StudentForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            rank: DEFAULT_RANK.to_string(),
            active: true,
        }
    }
}

impl StudentForm {
    /// Validates input and returns a create request.
    pub fn validate(&self) -> Result<NewStudent, FormErrors> {
        let name = self.name.trim();
        let email = self.email.trim();
        let rank = self.rank.trim();

        let mut errors = FormErrors::new();
        if name.is_empty() {
            errors.push("name", "name is required");
        }
        if email.is_empty() {
            errors.push("email", "email is required");
        } else if !is_valid_email(email) {
            errors.push("email", "email is not valid");
        }
        if rank.is_empty() {
            errors.push("rank", "rank is required");
        }

        errors.into_result(|| NewStudent {
            name: name.to_string(),
            email: email.to_string(),
            rank: rank.to_string(),
            active: self.active,
        })
    }

    /// Validates input and returns a full-replacement patch for editing.
    pub fn validate_patch(&self) -> Result<StudentPatch, FormErrors> {
        self.validate().map(StudentPatch::from)
    }
}

/// Raw class form input. `scheduled_at` is text as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassForm {
    pub title: String,
    pub scheduled_at: String,
    pub instructor: String,
}

impl ClassForm {
    /// Validates input and returns a create request.
    pub fn validate(&self) -> Result<NewClassSession, FormErrors> {
        let title = self.title.trim();
        let instructor = self.instructor.trim();

        let mut errors = FormErrors::new();
        if title.is_empty() {
            errors.push("title", "title is required");
        }
        let scheduled_at = if self.scheduled_at.trim().is_empty() {
            errors.push("scheduled_at", "date is required");
            None
        } else {
            let parsed = parse_schedule(&self.scheduled_at);
            if parsed.is_none() {
                errors.push("scheduled_at", "date must look like YYYY-MM-DD HH:MM");
            }
            parsed
        };
        if instructor.is_empty() {
            errors.push("instructor", "instructor is required");
        }

        match scheduled_at {
            Some(scheduled_at) if errors.is_empty() => Ok(NewClassSession {
                title: title.to_string(),
                scheduled_at,
                instructor: instructor.to_string(),
            }),
            _ => Err(errors),
        }
    }

    /// Validates input and returns a full-replacement patch for editing.
    pub fn validate_patch(&self) -> Result<ClassSessionPatch, FormErrors> {
        self.validate().map(ClassSessionPatch::from)
    }
}

/// Returns whether `value` looks like an email address.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value.trim())
}

/// Parses class time input in any accepted layout.
pub fn parse_schedule(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    SCHEDULE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
}

/// Renders a class time in the canonical input layout.
pub fn format_schedule(value: &NaiveDateTime) -> String {
    value.format(SCHEDULE_DISPLAY_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::{format_schedule, is_valid_email, parse_schedule, ClassForm, LoginForm, StudentForm};

    #[test]
    fn email_shape_check() {
        assert!(is_valid_email("a@x.com"));
        assert!(is_valid_email(" coach@dojo.example.org "));
        assert!(!is_valid_email("a@x"));
        assert!(!is_valid_email("no-at-sign.com"));
        assert!(!is_valid_email("two words@x.com"));
    }

    #[test]
    fn schedule_accepts_space_and_t_separators() {
        let spaced = parse_schedule("2025-12-31 18:00").expect("spaced layout");
        let iso = parse_schedule("2025-12-31T18:00:00").expect("iso layout");
        assert_eq!(spaced, iso);
        assert_eq!(format_schedule(&spaced), "2025-12-31 18:00");
        assert!(parse_schedule("31/12/2025").is_none());
    }

    #[test]
    fn login_form_requires_both_fields() {
        let errors = LoginForm::default().validate().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.message_for("username"), Some("username is required"));
        assert_eq!(errors.message_for("password"), Some("password is required"));
    }

    #[test]
    fn student_form_defaults_match_new_student_screen() {
        let form = StudentForm::default();
        assert_eq!(form.rank, "White");
        assert!(form.active);
    }

    #[test]
    fn student_form_trims_and_converts() {
        let form = StudentForm {
            name: "  Ana ".to_string(),
            email: "a@x.com ".to_string(),
            rank: "Blue".to_string(),
            active: false,
        };
        let fields = form.validate().expect("valid form");
        assert_eq!(fields.name, "Ana");
        assert_eq!(fields.email, "a@x.com");
        assert!(!fields.active);
    }

    #[test]
    fn student_form_reports_fields_in_order() {
        let form = StudentForm {
            name: String::new(),
            email: "broken".to_string(),
            rank: " ".to_string(),
            active: true,
        };
        let errors = form.validate().unwrap_err();
        let fields = errors.iter().map(|error| error.field.as_str()).collect::<Vec<_>>();
        assert_eq!(fields, vec!["name", "email", "rank"]);
        assert_eq!(errors.message_for("email"), Some("email is not valid"));
    }

    #[test]
    fn class_form_rejects_unparseable_date() {
        let form = ClassForm {
            title: "Fundamentals".to_string(),
            scheduled_at: "tomorrow".to_string(),
            instructor: "Carlos".to_string(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.message_for("scheduled_at").is_some());
    }

    #[test]
    fn class_form_patch_sets_every_field() {
        let form = ClassForm {
            title: "Open Mat".to_string(),
            scheduled_at: "2026-01-10 10:30".to_string(),
            instructor: "Rita".to_string(),
        };
        let patch = form.validate_patch().expect("valid form");
        assert_eq!(patch.title.as_deref(), Some("Open Mat"));
        assert_eq!(patch.instructor.as_deref(), Some("Rita"));
        assert!(patch.scheduled_at.is_some());
    }
}
