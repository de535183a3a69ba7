use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use tracing::info;

use wildwest_types::models::User;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RegisterError {
    #[error("username and password are required")]
    InvalidInput,
    #[error("username already taken")]
    UsernameTaken,
}

/// Registered users, keyed by username. Users are never mutated or
/// deleted once inserted.
#[derive(Default)]
pub struct CredentialStore {
    users: Mutex<HashMap<String, User>>,
}

impl CredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, username: &str, password: &str) -> Result<(), RegisterError> {
        if username.is_empty() || password.is_empty() {
            return Err(RegisterError::InvalidInput);
        }

        let mut users = self.users.lock().unwrap_or_else(PoisonError::into_inner);
        if users.contains_key(username) {
            return Err(RegisterError::UsernameTaken);
        }

        users.insert(
            username.to_string(),
            User {
                username: username.to_string(),
                password: password.to_string(),
            },
        );

        info!("Registered user {}", username);
        Ok(())
    }

    /// Exact, case-sensitive match of both fields. No lockouts.
    pub fn authenticate(&self, username: &str, password: &str) -> Option<User> {
        let users = self.users.lock().unwrap_or_else(PoisonError::into_inner);
        users
            .get(username)
            .filter(|user| user.password == password)
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_then_authenticate() {
        let store = CredentialStore::new();
        store.register("alice", "pw1").unwrap();

        let user = store.authenticate("alice", "pw1").unwrap();
        assert_eq!(user.username, "alice");
    }

    #[test]
    fn duplicate_username_rejected() {
        let store = CredentialStore::new();
        store.register("alice", "pw1").unwrap();

        let err = store.register("alice", "pw2").unwrap_err();
        assert_eq!(err, RegisterError::UsernameTaken);

        // The original registration is untouched
        assert!(store.authenticate("alice", "pw1").is_some());
        assert!(store.authenticate("alice", "pw2").is_none());
    }

    #[test]
    fn empty_fields_rejected() {
        let store = CredentialStore::new();
        assert_eq!(store.register("", "pw").unwrap_err(), RegisterError::InvalidInput);
        assert_eq!(store.register("bob", "").unwrap_err(), RegisterError::InvalidInput);
    }

    #[test]
    fn authenticate_is_case_sensitive() {
        let store = CredentialStore::new();
        store.register("alice", "Secret").unwrap();

        assert!(store.authenticate("alice", "Secret").is_some());
        assert!(store.authenticate("alice", "secret").is_none());
        assert!(store.authenticate("Alice", "Secret").is_none());
    }
}
