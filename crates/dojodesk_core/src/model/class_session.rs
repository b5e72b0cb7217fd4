//! Scheduled class model.
//!
//! # Responsibility
//! - Define the canonical class record, its create request and patch.
//! - Own attendee-set mutation so uniqueness holds in one place.
//!
//! # Invariants
//! - `id` is stable and never reused for another class.
//! - `title` is never blank.
//! - `attendee_ids` holds each student id at most once.
//! - Patches never touch `id` or `attendee_ids`.

use crate::model::student::StudentId;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a scheduled class.
pub type ClassId = Uuid;

/// One scheduled class and the students marked present for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassSession {
    pub id: ClassId,
    pub title: String,
    /// Local wall-clock time of the class.
    pub scheduled_at: NaiveDateTime,
    pub instructor: String,
    /// Present students in the order they were marked.
    pub attendee_ids: Vec<StudentId>,
}

/// Field set for scheduling a class; id and attendees are store-assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewClassSession {
    pub title: String,
    pub scheduled_at: NaiveDateTime,
    pub instructor: String,
}

/// Partial update for a class. Only `Some` fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassSessionPatch {
    pub title: Option<String>,
    pub scheduled_at: Option<NaiveDateTime>,
    pub instructor: Option<String>,
}

/// Store-level validation failures for class records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassValidationError {
    NilId,
    BlankTitle,
    DuplicateAttendee(StudentId),
}

impl Display for ClassValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "class id must not be nil"),
            Self::BlankTitle => write!(f, "class title must not be blank"),
            Self::DuplicateAttendee(id) => write!(f, "attendee listed twice: {id}"),
        }
    }
}

impl Error for ClassValidationError {}

impl ClassSession {
    /// Builds a class with a generated id and an empty attendee set.
    pub fn create(fields: NewClassSession) -> Result<Self, ClassValidationError> {
        Self::with_id(Uuid::new_v4(), fields)
    }

    /// Builds a class with a caller-provided id and an empty attendee set.
    pub fn with_id(id: ClassId, fields: NewClassSession) -> Result<Self, ClassValidationError> {
        let class = Self {
            id,
            title: fields.title,
            scheduled_at: fields.scheduled_at,
            instructor: fields.instructor,
            attendee_ids: Vec::new(),
        };
        class.validate()?;
        Ok(class)
    }

    /// Checks record invariants.
    pub fn validate(&self) -> Result<(), ClassValidationError> {
        if self.id.is_nil() {
            return Err(ClassValidationError::NilId);
        }
        if self.title.trim().is_empty() {
            return Err(ClassValidationError::BlankTitle);
        }
        for (index, attendee) in self.attendee_ids.iter().enumerate() {
            if self.attendee_ids[..index].contains(attendee) {
                return Err(ClassValidationError::DuplicateAttendee(*attendee));
            }
        }
        Ok(())
    }

    /// Returns a copy with every present patch field applied.
    pub fn patched(&self, patch: &ClassSessionPatch) -> Result<Self, ClassValidationError> {
        let mut next = self.clone();
        if let Some(title) = &patch.title {
            next.title = title.clone();
        }
        if let Some(scheduled_at) = patch.scheduled_at {
            next.scheduled_at = scheduled_at;
        }
        if let Some(instructor) = &patch.instructor {
            next.instructor = instructor.clone();
        }
        next.validate()?;
        Ok(next)
    }

    pub fn has_attendee(&self, student_id: StudentId) -> bool {
        self.attendee_ids.contains(&student_id)
    }

    /// Flips membership of `student_id`; returns whether it is now present.
    pub fn toggle_attendee(&mut self, student_id: StudentId) -> bool {
        if self.detach(student_id) {
            return false;
        }
        self.attendee_ids.push(student_id);
        true
    }

    /// Removes `student_id` from the attendee set; returns whether it was there.
    pub fn detach(&mut self, student_id: StudentId) -> bool {
        let before = self.attendee_ids.len();
        self.attendee_ids.retain(|id| *id != student_id);
        self.attendee_ids.len() != before
    }
}

impl ClassSessionPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.scheduled_at.is_none() && self.instructor.is_none()
    }
}

impl From<NewClassSession> for ClassSessionPatch {
    fn from(value: NewClassSession) -> Self {
        Self {
            title: Some(value.title),
            scheduled_at: Some(value.scheduled_at),
            instructor: Some(value.instructor),
        }
    }
}
