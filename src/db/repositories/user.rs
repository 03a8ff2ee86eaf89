use anyhow::{Context, Result};
use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use tokio::task;

use crate::config::SecurityConfig;
use crate::entities::users;

/// Primary key of the administrator row. The admin is looked up by this id,
/// never by position in the table.
pub const ADMIN_USER_ID: i32 = 1;

/// Display name given to an admin row created by the `admin` command.
pub const DEFAULT_ADMIN_NAME: &str = "root";

pub const MAX_NAME_CHARS: usize = 4;

pub const MAX_USERNAME_CHARS: usize = 20;

/// Well-formed Argon2id hash that no password matches, using the default
/// cost parameters. Verified when there is no real hash to check against.
const DUMMY_PASSWORD_HASH: &str = "$argon2id$v=19$m=8192,t=3,p=1$cXVpbGxwYWQtbm9zYWx0IQ$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// User data returned from repository (without sensitive password hash)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub username: Option<String>,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            username: model.username,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AdminCredentials<'a> {
    pub username: &'a str,
    pub password: &'a str,
    /// Replaces the display name when set
    pub name: Option<&'a str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminUpsert {
    Created,
    Updated,
}

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<User>> {
        let user = users::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query user by ID")?;

        Ok(user.map(User::from))
    }

    pub async fn get_admin(&self) -> Result<Option<User>> {
        self.get_by_id(ADMIN_USER_ID).await
    }

    /// Returns the admin when both the username and the password match.
    /// A missing admin row, or one without credentials, never matches.
    /// A hash is verified on every path so a wrong username takes as long
    /// as a wrong password.
    /// Note: This uses `spawn_blocking` because Argon2 is CPU-intensive
    /// and would block the async runtime if run directly.
    pub async fn verify_admin_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>> {
        let user = users::Entity::find_by_id(ADMIN_USER_ID)
            .one(&self.conn)
            .await
            .context("Failed to query user for password verification")?;

        let candidate = user.and_then(|user| match (&user.username, &user.password_hash) {
            (Some(stored), Some(hash)) if stored == username => Some((hash.clone(), user)),
            _ => None,
        });

        let password_hash = candidate
            .as_ref()
            .map_or_else(|| DUMMY_PASSWORD_HASH.to_string(), |(hash, _)| hash.clone());

        let password = password.to_string();
        let is_valid = task::spawn_blocking(move || verify_password(&password_hash, &password))
            .await
            .context("Password verification task panicked")??;

        Ok(candidate
            .filter(|_| is_valid)
            .map(|(_, user)| User::from(user)))
    }

    /// Creates the admin row, or updates the existing one. The password is
    /// always re-hashed.
    pub async fn upsert_admin(
        &self,
        credentials: &AdminCredentials<'_>,
        config: &SecurityConfig,
    ) -> Result<AdminUpsert> {
        let password = credentials.password.to_string();
        let config = config.clone();
        let password_hash = task::spawn_blocking(move || hash_password(&password, &config))
            .await
            .context("Password hashing task panicked")??;

        let existing = users::Entity::find_by_id(ADMIN_USER_ID)
            .one(&self.conn)
            .await
            .context("Failed to query admin user")?;

        if let Some(user) = existing {
            let mut active: users::ActiveModel = user.into();
            active.username = Set(Some(credentials.username.to_string()));
            active.password_hash = Set(Some(password_hash));
            if let Some(name) = credentials.name {
                active.name = Set(name.to_string());
            }
            active.update(&self.conn).await?;
            return Ok(AdminUpsert::Updated);
        }

        users::ActiveModel {
            id: Set(ADMIN_USER_ID),
            name: Set(credentials.name.unwrap_or(DEFAULT_ADMIN_NAME).to_string()),
            username: Set(Some(credentials.username.to_string())),
            password_hash: Set(Some(password_hash)),
        }
        .insert(&self.conn)
        .await
        .context("Failed to create admin user")?;

        Ok(AdminUpsert::Created)
    }

    /// Sets the admin's display name, creating a credential-less row if needed.
    pub async fn set_admin_name(&self, name: &str) -> Result<()> {
        let existing = users::Entity::find_by_id(ADMIN_USER_ID)
            .one(&self.conn)
            .await
            .context("Failed to query admin user")?;

        if let Some(user) = existing {
            let mut active: users::ActiveModel = user.into();
            active.name = Set(name.to_string());
            active.update(&self.conn).await?;
        } else {
            users::ActiveModel {
                id: Set(ADMIN_USER_ID),
                name: Set(name.to_string()),
                username: Set(None),
                password_hash: Set(None),
            }
            .insert(&self.conn)
            .await
            .context("Failed to create admin user")?;
        }

        Ok(())
    }
}

/// Hash a password using Argon2id with the configured cost parameters.
pub fn hash_password(password: &str, config: &SecurityConfig) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let params = Params::new(
        config.argon2_memory_cost_kib,
        config.argon2_time_cost,
        config.argon2_parallelism,
        None,
    )
    .map_err(|e| anyhow::anyhow!("Invalid Argon2 params: {e}"))?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {e}"))?;

    Ok(hash.to_string())
}

/// Check `password` against a PHC string. The cost parameters are read from
/// the hash itself.
pub fn verify_password(password_hash: &str, password: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|e| anyhow::anyhow!("Invalid password hash format: {e}"))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
