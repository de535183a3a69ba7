use axum::{Extension, Json, extract::State};
use tracing::info;

use wildwest_types::api::PostCommentRequest;
use wildwest_types::models::{Comment, Identity};

use crate::auth::AppState;
use crate::error::ApiError;

/// Full snapshot in insertion order. Reading is unrestricted.
pub async fn list_comments(State(state): State<AppState>) -> Json<Vec<Comment>> {
    Json(state.comments.list())
}

pub async fn post_comment(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(req): Json<PostCommentRequest>,
) -> Result<Json<Comment>, ApiError> {
    let text = req.text.unwrap_or_default();
    let comment = state.comments.post(&identity, &text)?;

    info!("Comment posted by {}", comment.author);
    Ok(Json(comment))
}
