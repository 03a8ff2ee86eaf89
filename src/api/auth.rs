use axum::{
    Form,
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;
use tracing::{info, warn};

use super::flash::{self, Flash};
use super::{AppState, WebError};
use crate::services::AuthError;

/// Session key holding the authenticated user's id.
pub const SESSION_USER_KEY: &str = "user_id";

pub const MSG_LOGIN_SUCCESS: &str = "Login success.";
pub const MSG_BAD_CREDENTIALS: &str = "Invalid username or password.";
pub const MSG_INVALID_INPUT: &str = "Invalid input.";
pub const MSG_LOGIN_REQUIRED: &str = "Please log in first.";
pub const MSG_LOGGED_OUT: &str = "Goodbye.";

#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

// ============================================================================
// Middleware
// ============================================================================

/// Lets the request through only when the session points at an existing
/// user. Anyone else is sent to the home page, where the login form lives.
pub async fn require_login(
    State(state): State<Arc<AppState>>,
    session: Session,
    request: Request,
    next: Next,
) -> Result<Response, WebError> {
    if let Some(user_id) = session.get::<i32>(SESSION_USER_KEY).await?
        && state.auth_service().current_user(user_id).await?.is_some()
    {
        tracing::Span::current().record("user_id", user_id);
        return Ok(next.run(request).await);
    }

    flash::push(&session, Flash::info(MSG_LOGIN_REQUIRED)).await?;
    Ok(Redirect::to("/").into_response())
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /
pub async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Redirect, WebError> {
    if form.username.trim().is_empty() || form.password.trim().is_empty() {
        flash::push(&session, Flash::error(MSG_INVALID_INPUT)).await?;
        return Ok(Redirect::to("/"));
    }

    match state
        .auth_service()
        .login(&form.username, &form.password)
        .await
    {
        Ok(user) => {
            session.cycle_id().await?;
            session.insert(SESSION_USER_KEY, user.id).await?;
            flash::push(&session, Flash::success(MSG_LOGIN_SUCCESS)).await?;

            info!(user_id = user.id, "Login succeeded");
            metrics::counter!("auth_logins_total", "outcome" => "success").increment(1);
        }
        Err(AuthError::InvalidCredentials) => {
            flash::push(&session, Flash::error(MSG_BAD_CREDENTIALS)).await?;

            warn!("Login failed");
            metrics::counter!("auth_logins_total", "outcome" => "failure").increment(1);
        }
        Err(e) => return Err(e.into()),
    }

    Ok(Redirect::to("/"))
}

/// GET /logout
pub async fn logout(session: Session) -> Result<Redirect, WebError> {
    session.remove::<i32>(SESSION_USER_KEY).await?;
    session.cycle_id().await?;
    flash::push(&session, Flash::info(MSG_LOGGED_OUT)).await?;
    Ok(Redirect::to("/"))
}
