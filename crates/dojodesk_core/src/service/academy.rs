//! Academy use-case facade.
//!
//! # Responsibility
//! - Own the session and roster stores as the single composition root.
//! - Run form validation before delegating to store mutations.
//! - Serve dashboard and attendance projections.
//!
//! # Invariants
//! - A rejected form never reaches a store.
//! - `save_*` creates when no id is given and edits otherwise.

use crate::config::AcademyConfig;
use crate::model::class_session::{ClassId, ClassSession};
use crate::model::student::{Student, StudentId};
use crate::service::projections::{self, AttendanceSheet, DashboardSummary};
use crate::store::roster_store::{RosterError, RosterStore};
use crate::store::session_store::SessionStore;
use crate::validation::{ClassForm, FormErrors, LoginForm, StudentForm};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Message shown under the password field on a rejected login.
pub const INCORRECT_CREDENTIALS_MESSAGE: &str = "incorrect credentials";

/// Failure of a form-driven save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveError {
    /// Input rejected before reaching the store.
    Form(FormErrors),
    /// Store rejected the mutation (unknown id or invariant).
    Roster(RosterError),
}

impl Display for SaveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Form(err) => write!(f, "invalid form: {err}"),
            Self::Roster(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SaveError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Form(err) => Some(err),
            Self::Roster(err) => Some(err),
        }
    }
}

impl From<FormErrors> for SaveError {
    fn from(value: FormErrors) -> Self {
        Self::Form(value)
    }
}

impl From<RosterError> for SaveError {
    fn from(value: RosterError) -> Self {
        Self::Roster(value)
    }
}

/// Application root holding every store.
///
/// Built once at startup and passed to whatever needs it.
pub struct Academy {
    session: SessionStore,
    roster: RosterStore,
}

impl Default for Academy {
    fn default() -> Self {
        Self::new(AcademyConfig::default())
    }
}

impl Academy {
    pub fn new(config: AcademyConfig) -> Self {
        info!("event=academy_init module=academy status=ok");
        Self {
            session: SessionStore::with_credentials(config.credentials),
            roster: RosterStore::new(),
        }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SessionStore {
        &mut self.session
    }

    pub fn roster(&self) -> &RosterStore {
        &self.roster
    }

    pub fn roster_mut(&mut self) -> &mut RosterStore {
        &mut self.roster
    }

    /// Submits the login form. Returns the signed-in username.
    ///
    /// Wrong credentials produce one `password` field error.
    pub fn login(&mut self, form: &LoginForm) -> Result<String, FormErrors> {
        form.validate()?;
        let username = form.username.trim();
        if !self.session.sign_in(username, &form.password) {
            return Err(FormErrors::single(
                "password",
                INCORRECT_CREDENTIALS_MESSAGE,
            ));
        }
        Ok(username.to_string())
    }

    pub fn logout(&mut self) {
        self.session.sign_off();
    }

    /// Creates (`id == None`) or edits one student from form input.
    pub fn save_student(
        &mut self,
        id: Option<StudentId>,
        form: &StudentForm,
    ) -> Result<Student, SaveError> {
        let student = match id {
            None => self.roster.add_student(form.validate()?)?,
            Some(id) => self.roster.update_student(id, &form.validate_patch()?)?,
        };
        Ok(student)
    }

    /// Creates (`id == None`) or edits one class from form input.
    pub fn save_class(
        &mut self,
        id: Option<ClassId>,
        form: &ClassForm,
    ) -> Result<ClassSession, SaveError> {
        let class = match id {
            None => self.roster.add_class(form.validate()?)?,
            Some(id) => self.roster.update_class(id, &form.validate_patch()?)?,
        };
        Ok(class)
    }

    /// Prefills the student form for editing, or `None` for unknown ids.
    pub fn student_form(&self, id: StudentId) -> Option<StudentForm> {
        self.roster.get_student(id).map(|student| StudentForm {
            name: student.name.clone(),
            email: student.email.clone(),
            rank: student.rank.clone(),
            active: student.active,
        })
    }

    /// Prefills the class form for editing, or `None` for unknown ids.
    pub fn class_form(&self, id: ClassId) -> Option<ClassForm> {
        self.roster.get_class(id).map(|class| ClassForm {
            title: class.title.clone(),
            scheduled_at: crate::validation::format_schedule(&class.scheduled_at),
            instructor: class.instructor.clone(),
        })
    }

    pub fn dashboard(&self) -> DashboardSummary {
        projections::dashboard_summary(&self.roster)
    }

    pub fn attendance_sheet(&self, class_id: ClassId) -> Option<AttendanceSheet> {
        projections::attendance_sheet(&self.roster, class_id)
    }
}
