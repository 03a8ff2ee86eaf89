//! `SeaORM` implementation of the `AuthService` trait.

use crate::db::{Store, User};
use crate::services::auth_service::{AuthError, AuthService};
use async_trait::async_trait;

pub struct SeaOrmAuthService {
    store: Store,
}

impl SeaOrmAuthService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn login(&self, username: &str, password: &str) -> Result<User, AuthError> {
        if username.trim().is_empty() || password.trim().is_empty() {
            return Err(AuthError::InvalidCredentials);
        }

        self.store
            .verify_admin_credentials(username, password)
            .await?
            .ok_or(AuthError::InvalidCredentials)
    }

    async fn current_user(&self, user_id: i32) -> Result<Option<User>, AuthError> {
        Ok(self.store.get_user(user_id).await?)
    }

    async fn site_owner(&self) -> Result<Option<User>, AuthError> {
        Ok(self.store.get_admin().await?)
    }
}
