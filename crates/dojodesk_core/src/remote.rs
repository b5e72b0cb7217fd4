//! Remote academy service seam.
//!
//! # Responsibility
//! - Define the backend contract for login and roster fetches.
//! - Provide an offline implementation returning placeholder data.
//!
//! # Invariants
//! - Stores never call this module; it is an extension point only.
//! - Implementations return errors instead of panicking.

use crate::model::class_session::ClassSession;
use crate::model::student::Student;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RemoteResult<T> = Result<T, RemoteError>;

/// Placeholder token issued by [`OfflineRemote`].
pub const OFFLINE_TOKEN: &str = "offline-token";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
    Unavailable(String),
    Rejected(String),
}

impl Display for RemoteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(details) => write!(f, "remote service unavailable: {details}"),
            Self::Rejected(details) => write!(f, "remote service rejected request: {details}"),
        }
    }
}

impl Error for RemoteError {}

/// Token returned by a remote login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteSession {
    pub token: String,
}

/// Backend contract for a future networked academy service.
pub trait RemoteService {
    fn login(&self, username: &str, password: &str) -> RemoteResult<RemoteSession>;
    fn fetch_students(&self) -> RemoteResult<Vec<Student>>;
    fn fetch_classes(&self) -> RemoteResult<Vec<ClassSession>>;
}

/// No-network implementation: fixed token, empty collections.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineRemote;

impl RemoteService for OfflineRemote {
    fn login(&self, _username: &str, _password: &str) -> RemoteResult<RemoteSession> {
        Ok(RemoteSession {
            token: OFFLINE_TOKEN.to_string(),
        })
    }

    fn fetch_students(&self) -> RemoteResult<Vec<Student>> {
        Ok(Vec::new())
    }

    fn fetch_classes(&self) -> RemoteResult<Vec<ClassSession>> {
        Ok(Vec::new())
    }
}
