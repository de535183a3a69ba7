use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use tracing::debug;

use wildwest_types::models::Session;

/// Sessions live for 24 hours from creation.
pub const SESSION_TTL_SECS: i64 = 24 * 60 * 60;

/// Server-side session table. Expiry is lazy: an expired record is
/// evicted the next time it is looked up, there is no background sweep.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: Mutex<HashMap<String, Session>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session for `username` expiring 24h from now.
    pub fn create(&self, username: &str) -> Session {
        self.create_at(username, Utc::now() + Duration::seconds(SESSION_TTL_SECS))
    }

    fn create_at(&self, username: &str, expires_at: DateTime<Utc>) -> Session {
        let session = Session {
            session_id: generate_token(),
            username: username.to_string(),
            expires_at,
        };

        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(session.session_id.clone(), session.clone());

        debug!("Created session for {}", username);
        session
    }

    /// Returns the session only if present and not yet expired. An
    /// expired record is removed as a side effect.
    pub fn lookup(&self, session_id: &str) -> Option<Session> {
        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);

        let session = sessions.get(session_id)?;
        if session.expires_at <= Utc::now() {
            debug!("Evicting expired session for {}", session.username);
            sessions.remove(session_id);
            return None;
        }

        Some(session.clone())
    }

    /// Remove the session if present. Idempotent.
    pub fn revoke(&self, session_id: &str) {
        let removed = self
            .sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(session_id);

        if let Some(session) = removed {
            debug!("Revoked session for {}", session.username);
        }
    }
}

/// 128 bits from the thread-local CSPRNG, hex-encoded. Tokens must be
/// infeasible to guess or enumerate; all cookie trust rests on them.
fn generate_token() -> String {
    let bytes: [u8; 16] = rand::rng().random();
    hex::encode(bytes)
}
