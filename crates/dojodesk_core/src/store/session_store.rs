//! Session store.
//!
//! # Responsibility
//! - Hold the single signed-in marker.
//! - Check credentials against the configured pair.
//!
//! # Invariants
//! - signed-out -> signed-in only through a successful `sign_in`.
//! - signed-in -> signed-out only through `sign_off`.
//! - A failed `sign_in` leaves the current session untouched.

use crate::config::Credentials;
use crate::store::listeners::{Listeners, SubscriptionId};
use log::{info, warn};

/// Session change notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    SignedIn { username: String },
    SignedOut,
}

/// Holds at most one authenticated session marker.
#[derive(Default)]
pub struct SessionStore {
    credentials: Credentials,
    username: Option<String>,
    listeners: Listeners<SessionEvent>,
}

impl SessionStore {
    /// Creates a signed-out store accepting the default credential pair.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a signed-out store accepting `credentials`.
    pub fn with_credentials(credentials: Credentials) -> Self {
        Self {
            credentials,
            ..Self::default()
        }
    }

    /// Attempts to sign in. Returns `true` only for the configured pair.
    pub fn sign_in(&mut self, username: &str, password: &str) -> bool {
        if !self.credentials.matches(username, password) {
            warn!("event=sign_in module=session status=error reason=bad_credentials");
            return false;
        }

        self.username = Some(username.to_string());
        info!("event=sign_in module=session status=ok");
        self.listeners.notify(&SessionEvent::SignedIn {
            username: username.to_string(),
        });
        true
    }

    /// Clears the session. Safe to call when already signed out.
    pub fn sign_off(&mut self) {
        if self.username.take().is_none() {
            return;
        }
        info!("event=sign_off module=session status=ok");
        self.listeners.notify(&SessionEvent::SignedOut);
    }

    pub fn current_user(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.username.is_some()
    }

    pub fn subscribe(
        &mut self,
        listener: impl Fn(&SessionEvent) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }
}

#[cfg(test)]
mod tests {
    use super::{SessionEvent, SessionStore};
    use crate::config::Credentials;
    use std::sync::{Arc, Mutex};

    #[test]
    fn sign_in_with_default_pair_sets_user() {
        let mut store = SessionStore::new();
        assert!(store.sign_in("admin", "1234"));
        assert_eq!(store.current_user(), Some("admin"));
        assert!(store.is_signed_in());
    }

    #[test]
    fn failed_sign_in_keeps_previous_session() {
        let mut store = SessionStore::new();
        assert!(!store.sign_in("admin", "wrong"));
        assert_eq!(store.current_user(), None);

        assert!(store.sign_in("admin", "1234"));
        assert!(!store.sign_in("admin", "wrong"));
        assert_eq!(store.current_user(), Some("admin"));
    }

    #[test]
    fn sign_off_is_idempotent() {
        let mut store = SessionStore::new();
        store.sign_in("admin", "1234");
        store.sign_off();
        store.sign_off();
        assert_eq!(store.current_user(), None);
    }

    #[test]
    fn custom_credentials_replace_default_pair() {
        let mut store = SessionStore::with_credentials(Credentials::new("sensei", "kata"));
        assert!(!store.sign_in("admin", "1234"));
        assert!(store.sign_in("sensei", "kata"));
    }

    #[test]
    fn listeners_see_transitions_only() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let mut store = SessionStore::new();
        let sink = Arc::clone(&events);
        store.subscribe(move |event| sink.lock().unwrap().push(event.clone()));

        store.sign_off();
        store.sign_in("admin", "bad");
        store.sign_in("admin", "1234");
        store.sign_off();

        assert_eq!(
            *events.lock().unwrap(),
            vec![
                SessionEvent::SignedIn {
                    username: "admin".to_string()
                },
                SessionEvent::SignedOut,
            ]
        );
    }
}
