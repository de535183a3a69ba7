use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

use wildwest_store::{PostError, RegisterError};
use wildwest_types::api::ErrorResponse;

/// User-visible failure taxonomy. Cookie and session failures never
/// appear here — the identity middleware recovers them by downgrading
/// the request to anonymous and clearing the cookie.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("username and password are required")]
    InvalidInput,
    #[error("username already taken")]
    UsernameTaken,
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("authentication required")]
    Unauthorized,
    #[error("comment text is required")]
    EmptyText,
    #[error("internal server error")]
    Internal(anyhow::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput | ApiError::UsernameTaken | ApiError::EmptyText => {
                StatusCode::BAD_REQUEST
            }
            ApiError::InvalidCredentials | ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(err) = &self {
            error!("Internal error: {:#}", err);
        }

        let body = Json(ErrorResponse {
            error: self.to_string(),
        });
        (self.status(), body).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err)
    }
}

impl From<RegisterError> for ApiError {
    fn from(err: RegisterError) -> Self {
        match err {
            RegisterError::InvalidInput => ApiError::InvalidInput,
            RegisterError::UsernameTaken => ApiError::UsernameTaken,
        }
    }
}

impl From<PostError> for ApiError {
    fn from(err: PostError) -> Self {
        match err {
            PostError::Unauthorized => ApiError::Unauthorized,
            PostError::EmptyText => ApiError::EmptyText,
        }
    }
}
