use std::sync::Arc;

use axum::http::header;
use axum::{Json, extract::State};
use axum_extra::extract::CookieJar;
use tracing::info;

use wildwest_store::{CommentBoard, CredentialStore, SessionRegistry};
use wildwest_types::api::{
    LoginRequest, LoginResponse, LogoutResponse, RegisterRequest, RegisterResponse,
};

use crate::cookie;
use crate::error::ApiError;

pub type AppState = Arc<AppStateInner>;

/// The three stores, owned in one place and injected into handlers as
/// axum state. All state is volatile and lost on restart.
#[derive(Default)]
pub struct AppStateInner {
    pub credentials: CredentialStore,
    pub sessions: SessionRegistry,
    pub comments: CommentBoard,
}

impl AppStateInner {
    pub fn new() -> Self {
        Self::default()
    }
}

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>, ApiError> {
    let username = req.username.unwrap_or_default();
    let password = req.password.unwrap_or_default();

    state.credentials.register(&username, &password)?;

    Ok(Json(RegisterResponse {
        username,
        message: "registration complete".to_string(),
    }))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<([(header::HeaderName, String); 1], Json<LoginResponse>), ApiError> {
    let username = req.username.unwrap_or_default();
    let password = req.password.unwrap_or_default();

    let user = state
        .credentials
        .authenticate(&username, &password)
        .ok_or(ApiError::InvalidCredentials)?;

    let session = state.sessions.create(&user.username);
    let cookie = cookie::session_cookie(&session)?;

    info!("User {} logged in", user.username);

    // Written raw: the jar's Set-Cookie path percent-encodes `/` and `=`,
    // but the value is already cookie-octet-safe base64 and the wire
    // format is plain base64(JSON).
    Ok((
        [(header::SET_COOKIE, cookie.to_string())],
        Json(LoginResponse {
            username: user.username,
            expires_at: session.expires_at,
        }),
    ))
}

/// Best-effort logout: revoke the session if the cookie still decodes,
/// clear the cookie either way. Idempotent with no prior session.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<LogoutResponse>) {
    if let Some(raw) = jar.get(cookie::COOKIE_NAME) {
        if let Ok(payload) = cookie::decode(raw.value()) {
            state.sessions.revoke(&payload.session_id);
        }
    }

    let jar = jar.remove(cookie::removal_cookie());

    (
        jar,
        Json(LogoutResponse {
            message: "logged out".to_string(),
        }),
    )
}
