//! Roster store: students, classes and attendance.
//!
//! # Responsibility
//! - Own the student and class collections exclusively.
//! - Apply create/update/delete and attendance toggles.
//! - Cascade student removal into every class attendee set.
//!
//! # Invariants
//! - Every class attendee id refers to an existing student.
//! - Collections keep insertion order; removal never reorders survivors.
//! - Errors (unknown id, invalid record) leave both collections unchanged.

use crate::model::class_session::{
    ClassId, ClassSession, ClassSessionPatch, ClassValidationError, NewClassSession,
};
use crate::model::student::{NewStudent, Student, StudentId, StudentPatch, StudentValidationError};
use crate::store::listeners::{Listeners, SubscriptionId};
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RosterResult<T> = Result<T, RosterError>;

/// Roster mutation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterError {
    StudentNotFound(StudentId),
    ClassNotFound(ClassId),
    InvalidStudent(StudentValidationError),
    InvalidClass(ClassValidationError),
}

impl Display for RosterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StudentNotFound(id) => write!(f, "student not found: {id}"),
            Self::ClassNotFound(id) => write!(f, "class not found: {id}"),
            Self::InvalidStudent(err) => write!(f, "{err}"),
            Self::InvalidClass(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RosterError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidStudent(err) => Some(err),
            Self::InvalidClass(err) => Some(err),
            Self::StudentNotFound(_) | Self::ClassNotFound(_) => None,
        }
    }
}

impl From<StudentValidationError> for RosterError {
    fn from(value: StudentValidationError) -> Self {
        Self::InvalidStudent(value)
    }
}

impl From<ClassValidationError> for RosterError {
    fn from(value: ClassValidationError) -> Self {
        Self::InvalidClass(value)
    }
}

/// Roster change notification, emitted after the state is updated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterEvent {
    StudentAdded(StudentId),
    StudentUpdated(StudentId),
    StudentRemoved {
        id: StudentId,
        /// Classes whose attendee set lost this student.
        detached_from: Vec<ClassId>,
    },
    ClassAdded(ClassId),
    ClassUpdated(ClassId),
    ClassRemoved(ClassId),
    AttendanceToggled {
        class_id: ClassId,
        student_id: StudentId,
        present: bool,
    },
}

/// Single owner of the student and class collections.
#[derive(Default)]
pub struct RosterStore {
    students: Vec<Student>,
    classes: Vec<ClassSession>,
    listeners: Listeners<RosterEvent>,
}

impl RosterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a new student with a fresh id and returns the stored record.
    pub fn add_student(&mut self, fields: NewStudent) -> RosterResult<Student> {
        let student = Student::create(fields)?;
        self.students.push(student.clone());
        info!(
            "event=student_add module=roster status=ok student_id={} students={}",
            student.id,
            self.students.len()
        );
        self.listeners.notify(&RosterEvent::StudentAdded(student.id));
        Ok(student)
    }

    /// Merges present patch fields into the matching student.
    pub fn update_student(&mut self, id: StudentId, patch: &StudentPatch) -> RosterResult<Student> {
        let Some(slot) = self.students.iter_mut().find(|student| student.id == id) else {
            warn!("event=student_update module=roster status=error reason=not_found student_id={id}");
            return Err(RosterError::StudentNotFound(id));
        };

        let next = slot.patched(patch)?;
        *slot = next.clone();
        info!("event=student_update module=roster status=ok student_id={id}");
        self.listeners.notify(&RosterEvent::StudentUpdated(id));
        Ok(next)
    }

    /// Removes the student and strips its id from every class attendee set.
    pub fn remove_student(&mut self, id: StudentId) -> RosterResult<Student> {
        let Some(index) = self.students.iter().position(|student| student.id == id) else {
            warn!("event=student_remove module=roster status=error reason=not_found student_id={id}");
            return Err(RosterError::StudentNotFound(id));
        };

        let removed = self.students.remove(index);
        let detached_from = self
            .classes
            .iter_mut()
            .filter_map(|class| class.detach(id).then_some(class.id))
            .collect::<Vec<_>>();
        info!(
            "event=student_remove module=roster status=ok student_id={id} detached_classes={}",
            detached_from.len()
        );
        self.listeners
            .notify(&RosterEvent::StudentRemoved { id, detached_from });
        Ok(removed)
    }

    /// Appends a new class with a fresh id and no attendees.
    pub fn add_class(&mut self, fields: NewClassSession) -> RosterResult<ClassSession> {
        let class = ClassSession::create(fields)?;
        self.classes.push(class.clone());
        info!(
            "event=class_add module=roster status=ok class_id={} classes={}",
            class.id,
            self.classes.len()
        );
        self.listeners.notify(&RosterEvent::ClassAdded(class.id));
        Ok(class)
    }

    /// Merges present patch fields into the matching class.
    ///
    /// Attendees are not part of the patch; use [`Self::toggle_attendance`].
    pub fn update_class(
        &mut self,
        id: ClassId,
        patch: &ClassSessionPatch,
    ) -> RosterResult<ClassSession> {
        let Some(slot) = self.classes.iter_mut().find(|class| class.id == id) else {
            warn!("event=class_update module=roster status=error reason=not_found class_id={id}");
            return Err(RosterError::ClassNotFound(id));
        };

        let next = slot.patched(patch)?;
        *slot = next.clone();
        info!("event=class_update module=roster status=ok class_id={id}");
        self.listeners.notify(&RosterEvent::ClassUpdated(id));
        Ok(next)
    }

    /// Removes the class. Students are unaffected.
    pub fn remove_class(&mut self, id: ClassId) -> RosterResult<ClassSession> {
        let Some(index) = self.classes.iter().position(|class| class.id == id) else {
            warn!("event=class_remove module=roster status=error reason=not_found class_id={id}");
            return Err(RosterError::ClassNotFound(id));
        };

        let removed = self.classes.remove(index);
        info!("event=class_remove module=roster status=ok class_id={id}");
        self.listeners.notify(&RosterEvent::ClassRemoved(id));
        Ok(removed)
    }

    /// Flips the student's presence in the class attendee set.
    ///
    /// Returns whether the student is present after the toggle.
    ///
    /// # Errors
    /// - `ClassNotFound` when the class does not exist.
    /// - `StudentNotFound` when the student does not exist, so the attendee
    ///   set never references an unknown student.
    pub fn toggle_attendance(
        &mut self,
        class_id: ClassId,
        student_id: StudentId,
    ) -> RosterResult<bool> {
        if !self.students.iter().any(|student| student.id == student_id) {
            warn!(
                "event=attendance_toggle module=roster status=error reason=student_not_found class_id={class_id} student_id={student_id}"
            );
            return Err(RosterError::StudentNotFound(student_id));
        }
        let Some(class) = self.classes.iter_mut().find(|class| class.id == class_id) else {
            warn!(
                "event=attendance_toggle module=roster status=error reason=class_not_found class_id={class_id}"
            );
            return Err(RosterError::ClassNotFound(class_id));
        };

        let present = class.toggle_attendee(student_id);
        debug!(
            "event=attendance_toggle module=roster status=ok class_id={class_id} student_id={student_id} present={present} attendees={}",
            class.attendee_ids.len()
        );
        self.listeners.notify(&RosterEvent::AttendanceToggled {
            class_id,
            student_id,
            present,
        });
        Ok(present)
    }

    /// Students in insertion order.
    pub fn list_students(&self) -> &[Student] {
        &self.students
    }

    /// Classes in insertion order.
    pub fn list_classes(&self) -> &[ClassSession] {
        &self.classes
    }

    pub fn get_student(&self, id: StudentId) -> Option<&Student> {
        self.students.iter().find(|student| student.id == id)
    }

    pub fn get_class(&self, id: ClassId) -> Option<&ClassSession> {
        self.classes.iter().find(|class| class.id == id)
    }

    pub fn student_count(&self) -> usize {
        self.students.len()
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn subscribe(
        &mut self,
        listener: impl Fn(&RosterEvent) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }
}
