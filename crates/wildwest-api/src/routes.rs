use axum::{
    Router,
    routing::{get, post},
};

use crate::auth::{self, AppState};
use crate::comments;
use crate::middleware::resolve_identity;

/// The full HTTP surface. Identity resolution runs on every route so
/// invalid cookies are cleared no matter which handler answers.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/comments", get(comments::list_comments))
        .route("/comment", post(comments::post_comment))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            resolve_identity,
        ))
        .with_state(state)
}

async fn root() -> &'static str {
    "Wild West Forum is running."
}
