use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use std::fmt;

use super::views;
use crate::services::{ArticleError, AuthError};

/// Failures that end a request with an error page. User mistakes that only
/// need a flash message and a redirect never become a `WebError`.
#[derive(Debug)]
pub enum WebError {
    NotFound(String),

    SessionError(String),

    InternalError(String),
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::SessionError(msg) => write!(f, "Session error: {msg}"),
            Self::InternalError(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for WebError {}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            Self::SessionError(msg) => {
                tracing::error!("Session error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
            Self::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        (status, Html(views::error_page(status, &message))).into_response()
    }
}

impl From<anyhow::Error> for WebError {
    fn from(err: anyhow::Error) -> Self {
        Self::InternalError(err.to_string())
    }
}

impl From<tower_sessions::session::Error> for WebError {
    fn from(err: tower_sessions::session::Error) -> Self {
        Self::SessionError(err.to_string())
    }
}

// Credential and validation failures are turned into flashes by the
// handlers. Only genuine failures are expected to reach these conversions.
impl From<AuthError> for WebError {
    fn from(err: AuthError) -> Self {
        Self::InternalError(err.to_string())
    }
}

impl From<ArticleError> for WebError {
    fn from(err: ArticleError) -> Self {
        match err {
            ArticleError::NotFound(_) => Self::NotFound(err.to_string()),
            ArticleError::Invalid(_) | ArticleError::TitleTaken => {
                Self::InternalError(err.to_string())
            }
            ArticleError::Database(msg) => Self::InternalError(msg),
        }
    }
}

impl WebError {
    pub fn not_found(resource: &str, id: impl fmt::Display) -> Self {
        Self::NotFound(format!("{resource} {id} not found"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationError;

    #[test]
    fn test_status_mapping() {
        let not_found = WebError::from(ArticleError::NotFound(3)).into_response();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let invalid = WebError::from(ArticleError::Invalid(ValidationError::Empty {
            field: "title",
        }))
        .into_response();
        assert_eq!(invalid.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let auth = WebError::from(AuthError::Internal("db down".to_string())).into_response();
        assert_eq!(auth.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
