use axum::extract::{Request, State};
use axum::http::{HeaderValue, header};
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::CookieJar;
use tracing::debug;

use wildwest_types::models::Identity;

use crate::auth::AppState;
use crate::cookie;

/// Per-request identity resolution, layered over every route.
///
/// The cookie is decoded and cross-checked against the session
/// registry; the result is attached to the request as an [`Identity`]
/// extension. Resolution never rejects a request — a missing, broken,
/// or stale cookie downgrades it to anonymous, and an invalid cookie is
/// cleared on whatever response the downstream handler produces.
pub async fn resolve_identity(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    let (identity, clear_cookie) = resolve(&state, &jar);
    req.extensions_mut().insert(identity);

    let mut res = next.run(req).await;
    if clear_cookie {
        if let Ok(value) = HeaderValue::from_str(&cookie::removal_cookie().to_string()) {
            res.headers_mut().append(header::SET_COOKIE, value);
        }
    }
    res
}

/// Returns the resolved identity and whether the cookie must be
/// cleared. A cookie is only believed if it decodes, names a live
/// session, claims `auth`, and claims the same username the session is
/// bound to.
fn resolve(state: &AppState, jar: &CookieJar) -> (Identity, bool) {
    let Some(raw) = jar.get(cookie::COOKIE_NAME) else {
        return (Identity::Anonymous, false);
    };

    let payload = match cookie::decode(raw.value()) {
        Ok(payload) => payload,
        Err(err) => {
            debug!("Clearing undecodable cookie: {}", err);
            return (Identity::Anonymous, true);
        }
    };

    let Some(session) = state.sessions.lookup(&payload.session_id) else {
        debug!("Cookie names an absent or expired session");
        return (Identity::Anonymous, true);
    };

    // The payload's username must match the one bound to the session
    // token server-side; a forged claim naming someone else is rejected.
    if !payload.auth || payload.username != session.username {
        debug!("Cookie claim does not match session record");
        return (Identity::Anonymous, true);
    }

    (
        Identity::Authenticated {
            username: session.username,
        },
        false,
    )
}
