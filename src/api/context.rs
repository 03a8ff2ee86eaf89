use tower_sessions::Session;

use super::auth::SESSION_USER_KEY;
use super::flash::{self, Flash};
use super::{AppState, WebError};
use crate::db::User;

/// Values injected into every rendered page.
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    /// The administrator, whose display name heads the page
    pub owner: Option<User>,

    pub current_user: Option<User>,

    pub flashes: Vec<Flash>,
}

impl PageContext {
    /// Resolves the session's user and drains its pending flash messages.
    pub async fn load(state: &AppState, session: &Session) -> Result<Self, WebError> {
        let owner = state.auth_service().site_owner().await?;

        let current_user = match session.get::<i32>(SESSION_USER_KEY).await? {
            Some(user_id) => state.auth_service().current_user(user_id).await?,
            None => None,
        };

        let flashes = flash::take(session).await?;

        Ok(Self {
            owner,
            current_user,
            flashes,
        })
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.current_user.is_some()
    }

    #[must_use]
    pub fn owner_name(&self) -> Option<&str> {
        self.owner.as_ref().map(|u| u.name.as_str())
    }
}
