//! Student domain model.
//!
//! # Responsibility
//! - Define the canonical student record and its create/patch inputs.
//! - Validate store-owned invariants before a record enters the roster.
//!
//! # Invariants
//! - `id` is stable and never reused for another student.
//! - `name` is never blank.
//! - Email shape is checked by the form layer, not here.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a student.
pub type StudentId = Uuid;

/// Academy student record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    pub email: String,
    /// Free-text belt label (e.g. `White`, `Blue`).
    pub rank: String,
    pub active: bool,
}

/// Field set for creating a student; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStudent {
    pub name: String,
    pub email: String,
    pub rank: String,
    pub active: bool,
}

/// Partial update for a student. Only `Some` fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub rank: Option<String>,
    pub active: Option<bool>,
}

/// Store-level validation failures for student records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudentValidationError {
    NilId,
    BlankName,
}

impl Display for StudentValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "student id must not be nil"),
            Self::BlankName => write!(f, "student name must not be blank"),
        }
    }
}

impl Error for StudentValidationError {}

impl Student {
    /// Builds a student from a create request with a generated id.
    pub fn create(fields: NewStudent) -> Result<Self, StudentValidationError> {
        Self::with_id(Uuid::new_v4(), fields)
    }

    /// Builds a student with a caller-provided id.
    ///
    /// Used by tests and future import paths where identity exists already.
    pub fn with_id(id: StudentId, fields: NewStudent) -> Result<Self, StudentValidationError> {
        let student = Self {
            id,
            name: fields.name,
            email: fields.email,
            rank: fields.rank,
            active: fields.active,
        };
        student.validate()?;
        Ok(student)
    }

    /// Checks record invariants.
    pub fn validate(&self) -> Result<(), StudentValidationError> {
        if self.id.is_nil() {
            return Err(StudentValidationError::NilId);
        }
        if self.name.trim().is_empty() {
            return Err(StudentValidationError::BlankName);
        }
        Ok(())
    }

    /// Returns a copy with every present patch field applied.
    ///
    /// The result is validated, so a patch with a blank name is rejected
    /// without touching `self`.
    pub fn patched(&self, patch: &StudentPatch) -> Result<Self, StudentValidationError> {
        let mut next = self.clone();
        if let Some(name) = &patch.name {
            next.name = name.clone();
        }
        if let Some(email) = &patch.email {
            next.email = email.clone();
        }
        if let Some(rank) = &patch.rank {
            next.rank = rank.clone();
        }
        if let Some(active) = patch.active {
            next.active = active;
        }
        next.validate()?;
        Ok(next)
    }
}

impl StudentPatch {
    /// Returns whether the patch carries no field at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.rank.is_none() && self.active.is_none()
    }
}

impl From<NewStudent> for StudentPatch {
    fn from(value: NewStudent) -> Self {
        Self {
            name: Some(value.name),
            email: Some(value.email),
            rank: Some(value.rank),
            active: Some(value.active),
        }
    }
}
