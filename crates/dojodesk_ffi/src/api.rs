//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to Dart via FRB.
//! - Hold the one process-wide `Academy` the UI talks to.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Ids cross the boundary as UUID strings; class times as
//!   `YYYY-MM-DD HH:MM` strings.
//! - A poisoned academy lock is reported as a failure, never unwrapped.

use dojodesk_core::validation::format_schedule;
use dojodesk_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    Academy, AcademyConfig, AttendanceSheet, ClassForm, ClassSession, Credentials, FormErrors,
    LoginForm, SaveError, Student, StudentForm,
};
use log::error;
use std::sync::{Mutex, OnceLock};
use uuid::Uuid;

const ADMIN_USERNAME_ENV: &str = "DOJODESK_ADMIN_USERNAME";
const ADMIN_PASSWORD_ENV: &str = "DOJODESK_ADMIN_PASSWORD";
static ACADEMY: OnceLock<Mutex<Academy>> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Inline message bound to one form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldErrorItem {
    pub field: String,
    pub message: String,
}

/// Generic action response envelope for command flows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Affected record id, when the action targets one.
    pub id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
    /// Per-field validation messages; empty unless a form was rejected.
    pub field_errors: Vec<FieldErrorItem>,
}

impl ActionResponse {
    fn success(message: impl Into<String>, id: Option<String>) -> Self {
        Self {
            ok: true,
            id,
            message: message.into(),
            field_errors: Vec::new(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            id: None,
            message: message.into(),
            field_errors: Vec::new(),
        }
    }

    fn invalid_form(errors: &FormErrors) -> Self {
        Self {
            ok: false,
            id: None,
            message: "Please fix the highlighted fields.".to_string(),
            field_errors: errors
                .iter()
                .map(|error| FieldErrorItem {
                    field: error.field.clone(),
                    message: error.message.clone(),
                })
                .collect(),
        }
    }
}

/// Student row for list and form screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentItem {
    pub id: String,
    pub name: String,
    pub email: String,
    pub rank: String,
    pub active: bool,
}

/// Class row for list and form screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassItem {
    pub id: String,
    pub title: String,
    pub scheduled_at: String,
    pub instructor: String,
    pub attendee_count: u32,
}

/// Dashboard counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardView {
    pub student_count: u32,
    pub class_count: u32,
    pub active_student_count: u32,
}

/// One row of the attendance screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceItem {
    pub student_id: String,
    pub name: String,
    pub rank: String,
    pub present: bool,
}

/// Attendance screen payload for one class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceView {
    pub class_id: String,
    pub title: String,
    pub scheduled_at: String,
    pub items: Vec<AttendanceItem>,
}

/// Submits the login form against the configured credential pair.
///
/// # FFI contract
/// - Wrong credentials return one `password` field error.
/// - `id` carries the signed-in username on success.
#[flutter_rust_bridge::frb(sync)]
pub fn auth_sign_in(username: String, password: String) -> ActionResponse {
    let form = LoginForm::new(username, password);
    match with_academy(|academy| academy.login(&form)) {
        Ok(Ok(user)) => ActionResponse::success("Signed in.", Some(user)),
        Ok(Err(errors)) => ActionResponse::invalid_form(&errors),
        Err(err) => ActionResponse::failure(format!("auth_sign_in failed: {err}")),
    }
}

/// Clears the session. Idempotent.
#[flutter_rust_bridge::frb(sync)]
pub fn auth_sign_off() -> ActionResponse {
    match with_academy(|academy| academy.logout()) {
        Ok(()) => ActionResponse::success("Signed off.", None),
        Err(err) => ActionResponse::failure(format!("auth_sign_off failed: {err}")),
    }
}

/// Returns the signed-in username, or `None` when signed out.
#[flutter_rust_bridge::frb(sync)]
pub fn auth_current_user() -> Option<String> {
    with_academy(|academy| academy.session().current_user().map(str::to_string))
        .ok()
        .flatten()
}

/// Lists students in insertion order. Empty on lock failure.
#[flutter_rust_bridge::frb(sync)]
pub fn students_list() -> Vec<StudentItem> {
    with_academy(|academy| {
        academy
            .roster()
            .list_students()
            .iter()
            .map(to_student_item)
            .collect()
    })
    .unwrap_or_default()
}

/// Creates (`id = None`) or edits one student.
#[flutter_rust_bridge::frb(sync)]
pub fn student_save(
    id: Option<String>,
    name: String,
    email: String,
    rank: String,
    active: bool,
) -> ActionResponse {
    let id = match parse_optional_id(id) {
        Ok(id) => id,
        Err(message) => return ActionResponse::failure(message),
    };
    let form = StudentForm {
        name,
        email,
        rank,
        active,
    };
    let result = with_academy(|academy| academy.save_student(id, &form));
    save_response(result, "Student saved.", |student: &Student| student.id)
}

/// Deletes one student and removes it from every class.
#[flutter_rust_bridge::frb(sync)]
pub fn student_delete(id: String) -> ActionResponse {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(message) => return ActionResponse::failure(message),
    };
    match with_academy(|academy| academy.roster_mut().remove_student(id)) {
        Ok(Ok(student)) => ActionResponse::success("Student deleted.", Some(student.id.to_string())),
        Ok(Err(err)) => ActionResponse::failure(err.to_string()),
        Err(err) => ActionResponse::failure(format!("student_delete failed: {err}")),
    }
}

/// Lists classes in insertion order. Empty on lock failure.
#[flutter_rust_bridge::frb(sync)]
pub fn classes_list() -> Vec<ClassItem> {
    with_academy(|academy| {
        academy
            .roster()
            .list_classes()
            .iter()
            .map(to_class_item)
            .collect()
    })
    .unwrap_or_default()
}

/// Schedules (`id = None`) or edits one class.
///
/// `scheduled_at` accepts `YYYY-MM-DD HH:MM` (optionally `T` and seconds).
#[flutter_rust_bridge::frb(sync)]
pub fn class_save(
    id: Option<String>,
    title: String,
    scheduled_at: String,
    instructor: String,
) -> ActionResponse {
    let id = match parse_optional_id(id) {
        Ok(id) => id,
        Err(message) => return ActionResponse::failure(message),
    };
    let form = ClassForm {
        title,
        scheduled_at,
        instructor,
    };
    let result = with_academy(|academy| academy.save_class(id, &form));
    save_response(result, "Class saved.", |class: &ClassSession| class.id)
}

/// Deletes one class.
#[flutter_rust_bridge::frb(sync)]
pub fn class_delete(id: String) -> ActionResponse {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(message) => return ActionResponse::failure(message),
    };
    match with_academy(|academy| academy.roster_mut().remove_class(id)) {
        Ok(Ok(class)) => ActionResponse::success("Class deleted.", Some(class.id.to_string())),
        Ok(Err(err)) => ActionResponse::failure(err.to_string()),
        Err(err) => ActionResponse::failure(format!("class_delete failed: {err}")),
    }
}

/// Returns the attendance screen for one class, or `None` when the id is
/// malformed or unknown.
#[flutter_rust_bridge::frb(sync)]
pub fn attendance_sheet(class_id: String) -> Option<AttendanceView> {
    let class_id = parse_id(&class_id).ok()?;
    with_academy(|academy| academy.attendance_sheet(class_id))
        .ok()
        .flatten()
        .map(to_attendance_view)
}

/// Flips one student's presence for one class.
///
/// # FFI contract
/// - `id` carries the student id on success.
/// - Message states the new presence (`Marked present.` / `Marked absent.`).
#[flutter_rust_bridge::frb(sync)]
pub fn attendance_toggle(class_id: String, student_id: String) -> ActionResponse {
    let (class_id, student_id) = match (parse_id(&class_id), parse_id(&student_id)) {
        (Ok(class_id), Ok(student_id)) => (class_id, student_id),
        (Err(message), _) | (_, Err(message)) => return ActionResponse::failure(message),
    };
    match with_academy(|academy| academy.roster_mut().toggle_attendance(class_id, student_id)) {
        Ok(Ok(true)) => ActionResponse::success("Marked present.", Some(student_id.to_string())),
        Ok(Ok(false)) => ActionResponse::success("Marked absent.", Some(student_id.to_string())),
        Ok(Err(err)) => ActionResponse::failure(err.to_string()),
        Err(err) => ActionResponse::failure(format!("attendance_toggle failed: {err}")),
    }
}

/// Returns dashboard counters, or `None` on lock failure.
#[flutter_rust_bridge::frb(sync)]
pub fn dashboard_summary() -> Option<DashboardView> {
    with_academy(|academy| academy.dashboard())
        .ok()
        .map(|summary| DashboardView {
            student_count: saturating_u32(summary.student_count),
            class_count: saturating_u32(summary.class_count),
            active_student_count: saturating_u32(summary.active_student_count),
        })
}

fn resolve_config() -> AcademyConfig {
    let username = std::env::var(ADMIN_USERNAME_ENV).ok();
    let password = std::env::var(ADMIN_PASSWORD_ENV).ok();
    AcademyConfig {
        credentials: Credentials::with_overrides(username.as_deref(), password.as_deref()),
    }
}

fn with_academy<T>(f: impl FnOnce(&mut Academy) -> T) -> Result<T, String> {
    let academy = ACADEMY.get_or_init(|| Mutex::new(Academy::new(resolve_config())));
    let mut guard = academy.lock().map_err(|_| {
        error!("event=academy_lock module=ffi status=error reason=poisoned");
        "academy state is unavailable after an earlier panic".to_string()
    })?;
    Ok(f(&mut guard))
}

fn save_response<T>(
    result: Result<Result<T, SaveError>, String>,
    message: &str,
    id_of: impl Fn(&T) -> Uuid,
) -> ActionResponse {
    match result {
        Ok(Ok(record)) => ActionResponse::success(message, Some(id_of(&record).to_string())),
        Ok(Err(SaveError::Form(errors))) => ActionResponse::invalid_form(&errors),
        Ok(Err(SaveError::Roster(err))) => ActionResponse::failure(err.to_string()),
        Err(err) => ActionResponse::failure(format!("save failed: {err}")),
    }
}

fn parse_id(raw: &str) -> Result<Uuid, String> {
    Uuid::parse_str(raw.trim()).map_err(|_| format!("invalid id: `{}`", raw.trim()))
}

fn parse_optional_id(raw: Option<String>) -> Result<Option<Uuid>, String> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_id(value).map(Some),
    }
}

fn saturating_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

fn to_student_item(student: &Student) -> StudentItem {
    StudentItem {
        id: student.id.to_string(),
        name: student.name.clone(),
        email: student.email.clone(),
        rank: student.rank.clone(),
        active: student.active,
    }
}

fn to_class_item(class: &ClassSession) -> ClassItem {
    ClassItem {
        id: class.id.to_string(),
        title: class.title.clone(),
        scheduled_at: format_schedule(&class.scheduled_at),
        instructor: class.instructor.clone(),
        attendee_count: saturating_u32(class.attendee_ids.len()),
    }
}

fn to_attendance_view(sheet: AttendanceSheet) -> AttendanceView {
    AttendanceView {
        class_id: sheet.class_id.to_string(),
        title: sheet.title,
        scheduled_at: format_schedule(&sheet.scheduled_at),
        items: sheet
            .rows
            .into_iter()
            .map(|row| AttendanceItem {
                student_id: row.student_id.to_string(),
                name: row.name,
                rank: row.rank,
                present: row.present,
            })
            .collect(),
    }
}
