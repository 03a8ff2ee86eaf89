//! Domain service for authentication.
//!
//! Checks the administrator's credentials and resolves the user behind a
//! session. Session storage itself lives in the web layer.

use thiserror::Error;

use crate::db::User;

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Deliberately does not say which credential was wrong.
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Domain service trait for authentication.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Verifies credentials against the administrator row.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] if login fails for any reason
    /// other than an internal failure.
    async fn login(&self, username: &str, password: &str) -> Result<User, AuthError>;

    /// Resolves the user id stored in a session. `None` once the row is gone.
    async fn current_user(&self, user_id: i32) -> Result<Option<User>, AuthError>;

    /// The administrator whose name heads every page, if one exists.
    async fn site_owner(&self) -> Result<Option<User>, AuthError>;
}
