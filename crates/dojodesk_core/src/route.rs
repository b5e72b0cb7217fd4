//! Typed navigation destinations.
//!
//! # Responsibility
//! - Name every screen the UI can open, with its parameters.
//! - Gate every screen except login behind a signed-in session.
//!
//! # Invariants
//! - `Route::initial()` is `Login`.
//! - Resolving a guarded route without a session yields `Login`.

use crate::model::class_session::ClassId;
use crate::model::student::StudentId;
use crate::store::session_store::SessionStore;
use serde::{Deserialize, Serialize};

/// One navigation destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum Route {
    Login,
    Dashboard,
    Students,
    /// `id == None` opens an empty form for a new student.
    StudentForm { id: Option<StudentId> },
    Classes,
    /// `id == None` opens an empty form for a new class.
    ClassForm { id: Option<ClassId> },
    Attendance { class_id: ClassId },
}

impl Route {
    pub fn initial() -> Self {
        Self::Login
    }

    /// Stable route name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Dashboard => "dashboard",
            Self::Students => "students",
            Self::StudentForm { .. } => "student_form",
            Self::Classes => "classes",
            Self::ClassForm { .. } => "class_form",
            Self::Attendance { .. } => "attendance",
        }
    }

    /// Screen title; form titles depend on create vs edit.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Login => "Sign In",
            Self::Dashboard => "Dashboard",
            Self::Students => "Students",
            Self::StudentForm { id: None } => "New Student",
            Self::StudentForm { id: Some(_) } => "Edit Student",
            Self::Classes => "Classes",
            Self::ClassForm { id: None } => "Schedule Class",
            Self::ClassForm { id: Some(_) } => "Edit Class",
            Self::Attendance { .. } => "Attendance",
        }
    }

    pub fn requires_session(&self) -> bool {
        !matches!(self, Self::Login)
    }
}

/// Returns the route to actually show for `requested`.
pub fn resolve(requested: Route, session: &SessionStore) -> Route {
    if requested.requires_session() && !session.is_signed_in() {
        return Route::Login;
    }
    requested
}

#[cfg(test)]
mod tests {
    use super::{resolve, Route};
    use crate::store::session_store::SessionStore;
    use uuid::Uuid;

    #[test]
    fn guarded_routes_redirect_to_login_when_signed_out() {
        let session = SessionStore::new();
        assert_eq!(resolve(Route::Dashboard, &session), Route::Login);
        assert_eq!(
            resolve(
                Route::Attendance {
                    class_id: Uuid::new_v4()
                },
                &session
            ),
            Route::Login
        );
        assert_eq!(resolve(Route::Login, &session), Route::Login);
    }

    #[test]
    fn signed_in_session_opens_requested_route() {
        let mut session = SessionStore::new();
        assert!(session.sign_in("admin", "1234"));
        let route = Route::StudentForm { id: None };
        assert_eq!(resolve(route, &session), route);
    }

    #[test]
    fn form_titles_follow_create_or_edit() {
        assert_eq!(Route::StudentForm { id: None }.title(), "New Student");
        assert_eq!(
            Route::ClassForm {
                id: Some(Uuid::new_v4())
            }
            .title(),
            "Edit Class"
        );
        assert_eq!(Route::initial().name(), "login");
    }

    #[test]
    fn route_serializes_with_name_tag() {
        let class_id = Uuid::new_v4();
        let json = serde_json::to_value(Route::Attendance { class_id }).unwrap();
        assert_eq!(json["name"], "attendance");
        assert_eq!(json["class_id"], class_id.to_string());
    }
}
