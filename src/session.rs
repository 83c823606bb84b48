//! Session state store: the single source of truth for "who is logged in".
//!
//! INVARIANT
//! =========
//! Token and username are both present or both absent. The pairing is
//! enforced by construction: the store never sets, persists, or restores
//! one field without the other.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::storage::Storage;

pub const TOKEN_KEY: &str = "token";
pub const USERNAME_KEY: &str = "username";

/// Current authenticated identity, or empty when logged out.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    identity: Option<Identity>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Identity {
    token: String,
    username: String,
}

impl Session {
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.identity.as_ref().map(|identity| identity.token.as_str())
    }

    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.identity.as_ref().map(|identity| identity.username.as_str())
    }
}

/// Owns the session value and keeps it in sync with durable storage.
///
/// Views and the resource client only read derived values; mutation goes
/// through `set`/`clear`, which take `&mut self` so the borrow checker
/// enforces single-writer access.
pub struct SessionStore {
    session: Session,
    storage: Box<dyn Storage>,
}

impl SessionStore {
    /// Build the store, restoring a persisted session when storage holds
    /// both keys. Anything less reads as logged out.
    #[must_use]
    pub fn new(storage: Box<dyn Storage>) -> Self {
        let session = match (storage.get(TOKEN_KEY), storage.get(USERNAME_KEY)) {
            (Some(token), Some(username)) => Session {
                identity: Some(Identity { token, username }),
            },
            _ => Session::default(),
        };
        Self { session, storage }
    }

    /// Replace the session and synchronously persist both fields.
    pub fn set(&mut self, token: &str, username: &str) {
        self.storage.set(TOKEN_KEY, token);
        self.storage.set(USERNAME_KEY, username);
        self.session = Session {
            identity: Some(Identity {
                token: token.to_owned(),
                username: username.to_owned(),
            }),
        };
    }

    /// Reset to logged out and remove both persisted fields.
    pub fn clear(&mut self) {
        self.storage.remove(TOKEN_KEY);
        self.storage.remove(USERNAME_KEY);
        self.session = Session::default();
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.token().is_some()
    }

    #[must_use]
    pub fn current_username(&self) -> Option<&str> {
        self.session.username()
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.session.token()
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }
}
