use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered forum member. Credentials are stored and compared as
/// opaque strings — see the trust-model notes in DESIGN.md.
#[derive(Debug, Clone)]
pub struct User {
    pub username: String,
    pub password: String,
}

/// Server-side session record binding an opaque token to a username
/// and an expiry instant. Sessions are only ever created and deleted.
#[derive(Debug, Clone)]
pub struct Session {
    pub session_id: String,
    pub username: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub author: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Per-request outcome of authentication. Computed fresh on every
/// request by the identity middleware; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    Anonymous,
    Authenticated { username: String },
}

impl Identity {
    pub fn username(&self) -> Option<&str> {
        match self {
            Identity::Anonymous => None,
            Identity::Authenticated { username } => Some(username),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Identity::Authenticated { .. })
    }
}
