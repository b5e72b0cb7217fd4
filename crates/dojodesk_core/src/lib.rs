//! Core domain logic for DojoDesk.
//! This crate owns every roster and session invariant; UI layers only call it.

pub mod config;
pub mod logging;
pub mod model;
pub mod remote;
pub mod route;
pub mod service;
pub mod store;
pub mod validation;

pub use config::{AcademyConfig, Credentials};
pub use logging::{default_log_level, init_logging, logging_status, LogSettings, LoggingError};
pub use model::class_session::{
    ClassId, ClassSession, ClassSessionPatch, ClassValidationError, NewClassSession,
};
pub use model::student::{NewStudent, Student, StudentId, StudentPatch, StudentValidationError};
pub use remote::{OfflineRemote, RemoteError, RemoteResult, RemoteService, RemoteSession};
pub use route::Route;
pub use service::academy::{Academy, SaveError, INCORRECT_CREDENTIALS_MESSAGE};
pub use service::projections::{AttendanceRow, AttendanceSheet, DashboardSummary};
pub use store::listeners::SubscriptionId;
pub use store::roster_store::{RosterError, RosterEvent, RosterResult, RosterStore};
pub use store::session_store::{SessionEvent, SessionStore};
pub use validation::{ClassForm, FieldError, FormErrors, LoginForm, StudentForm};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
