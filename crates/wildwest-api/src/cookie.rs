use axum_extra::extract::cookie::Cookie;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as B64;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use wildwest_types::models::Session;

pub const COOKIE_NAME: &str = "wild_cookie";
pub const COOKIE_MAX_AGE_SECS: i64 = 86_400;

/// The client-held authentication claim, reconstructed from the raw
/// cookie value on every request. This is attacker-controlled input:
/// the payload carries no integrity protection, and every field must be
/// cross-checked against the server-side session record before it is
/// believed. All real trust lives in the session token itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CookiePayload {
    pub username: String,
    pub session_id: String,
    pub auth: bool,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("cookie value is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("cookie payload does not match the expected shape: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Serialize a session into the `wild_cookie` wire value:
/// base64 over the JSON payload, so the value stays inside the
/// cookie-octet alphabet regardless of what the username contains.
pub fn encode(session: &Session) -> anyhow::Result<String> {
    let payload = CookiePayload {
        username: session.username.clone(),
        session_id: session.session_id.clone(),
        auth: true,
        expires_at: session.expires_at,
    };

    Ok(B64.encode(serde_json::to_vec(&payload)?))
}

/// Strict decode of an incoming cookie value. Fails closed: bad base64,
/// bad JSON, and missing or mistyped fields are all `DecodeError`.
pub fn decode(value: &str) -> Result<CookiePayload, DecodeError> {
    let bytes = B64.decode(value)?;
    let payload = serde_json::from_slice(&bytes)?;
    Ok(payload)
}

/// Build the Set-Cookie for a fresh login.
pub fn session_cookie(session: &Session) -> anyhow::Result<Cookie<'static>> {
    let cookie = Cookie::build((COOKIE_NAME, encode(session)?))
        .path("/")
        .http_only(true)
        .max_age(time::Duration::seconds(COOKIE_MAX_AGE_SECS))
        .build();

    Ok(cookie)
}

/// A cookie that expires `wild_cookie` immediately on the client.
pub fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build((COOKIE_NAME, "")).path("/").build();
    cookie.make_removal();
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn session() -> Session {
        Session {
            session_id: "f5bd8a139c5e8d7e3c3b0a741c9e2f10".to_string(),
            username: "alice".to_string(),
            expires_at: Utc::now() + Duration::hours(24),
        }
    }

    #[test]
    fn encode_decode_roundtrip() {
        let session = session();
        let value = encode(&session).unwrap();
        let payload = decode(&value).unwrap();

        assert_eq!(payload.username, "alice");
        assert_eq!(payload.session_id, session.session_id);
        assert!(payload.auth);
        assert_eq!(payload.expires_at.timestamp(), session.expires_at.timestamp());
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(matches!(decode("not base64!!"), Err(DecodeError::Base64(_))));
    }

    #[test]
    fn valid_base64_invalid_json_is_rejected() {
        let value = B64.encode(b"howdy partner");
        assert!(matches!(decode(&value), Err(DecodeError::Payload(_))));
    }

    #[test]
    fn missing_field_is_rejected() {
        // No session_id
        let value = B64.encode(br#"{"username":"alice","auth":true,"expires_at":1700000000}"#);
        assert!(decode(&value).is_err());
    }

    #[test]
    fn mistyped_field_is_rejected() {
        let value =
            B64.encode(br#"{"username":"alice","session_id":"x","auth":"yes","expires_at":1700000000}"#);
        assert!(decode(&value).is_err());
    }

    #[test]
    fn unknown_field_is_rejected() {
        let value = B64.encode(
            br#"{"username":"alice","session_id":"x","auth":true,"expires_at":1700000000,"admin":true}"#,
        );
        assert!(decode(&value).is_err());
    }

    #[test]
    fn cookie_attributes() {
        let cookie = session_cookie(&session()).unwrap();
        assert_eq!(cookie.name(), COOKIE_NAME);
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(
            cookie.max_age(),
            Some(time::Duration::seconds(COOKIE_MAX_AGE_SECS))
        );
    }
}
