//! Academy configuration.
//!
//! # Responsibility
//! - Carry the accepted admin credential pair into the session store.
//! - Provide defaults matching the bundled single-user setup.
//!
//! # Invariants
//! - Blank overrides never replace a default credential.

use std::fmt::{Debug, Formatter};

/// Default admin username.
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
/// Default admin password.
pub const DEFAULT_ADMIN_PASSWORD: &str = "1234";

/// The one credential pair accepted by sign-in.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            username: DEFAULT_ADMIN_USERNAME.to_string(),
            password: DEFAULT_ADMIN_PASSWORD.to_string(),
        }
    }
}

// Keep the password out of debug output and logs.
impl Debug for Credentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Returns defaults with each non-blank override applied.
    pub fn with_overrides(username: Option<&str>, password: Option<&str>) -> Self {
        let mut credentials = Self::default();
        if let Some(value) = username.map(str::trim).filter(|value| !value.is_empty()) {
            credentials.username = value.to_string();
        }
        if let Some(value) = password.filter(|value| !value.trim().is_empty()) {
            credentials.password = value.to_string();
        }
        credentials
    }

    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

/// Root configuration for an [`crate::Academy`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AcademyConfig {
    pub credentials: Credentials,
}

#[cfg(test)]
mod tests {
    use super::Credentials;

    #[test]
    fn default_pair_is_admin_1234() {
        let credentials = Credentials::default();
        assert!(credentials.matches("admin", "1234"));
        assert!(!credentials.matches("admin", "wrong"));
    }

    #[test]
    fn blank_overrides_keep_defaults() {
        let credentials = Credentials::with_overrides(Some("  "), Some(""));
        assert_eq!(credentials, Credentials::default());

        let custom = Credentials::with_overrides(Some(" sensei "), Some("kata"));
        assert!(custom.matches("sensei", "kata"));
    }

    #[test]
    fn debug_output_redacts_password() {
        let rendered = format!("{:?}", Credentials::new("admin", "secret-pass"));
        assert!(!rendered.contains("secret-pass"));
        assert!(rendered.contains("admin"));
    }
}
