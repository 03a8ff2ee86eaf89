use anyhow::{Context, Result};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

use crate::config::{GeneralConfig, SecurityConfig};
use crate::models::article::{Article, ArticleEdit, NewArticle};

pub mod migrator;
pub mod repositories;

pub use repositories::article::ArticleUpdate;
pub use repositories::user::{ADMIN_USER_ID, AdminCredentials, AdminUpsert, User};

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn from_config(config: &GeneralConfig) -> Result<Self> {
        Self::with_pool_options(
            &config.database_path,
            config.max_db_connections,
            config.min_db_connections,
        )
        .await
    }

    /// Connects, creating the database file if needed, and applies pending
    /// migrations.
    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        if let Some(path) = sqlite_file_path(db_url) {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                tokio::fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            if !path.exists() {
                std::fs::File::create(&path)
                    .with_context(|| format!("Failed to create {}", path.display()))?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt)
            .await
            .with_context(|| format!("Failed to connect to {db_url}"))?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    /// Rolls back every migration and re-applies them, which drops and
    /// recreates the article and user tables. Tables owned by other
    /// components in the same file (the session store) are left alone.
    pub async fn reset_schema(&self) -> Result<()> {
        warn!("Dropping article and user tables");
        migrator::Migrator::refresh(&self.conn)
            .await
            .context("Failed to recreate schema")?;
        Ok(())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn article_repo(&self) -> repositories::article::ArticleRepository {
        repositories::article::ArticleRepository::new(self.conn.clone())
    }

    // ========== User Repository Methods ==========

    pub async fn get_user(&self, id: i32) -> Result<Option<User>> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn get_admin(&self) -> Result<Option<User>> {
        self.user_repo().get_admin().await
    }

    pub async fn verify_admin_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>> {
        self.user_repo()
            .verify_admin_credentials(username, password)
            .await
    }

    pub async fn upsert_admin(
        &self,
        credentials: &AdminCredentials<'_>,
        config: &SecurityConfig,
    ) -> Result<AdminUpsert> {
        self.user_repo().upsert_admin(credentials, config).await
    }

    pub async fn set_admin_name(&self, name: &str) -> Result<()> {
        self.user_repo().set_admin_name(name).await
    }

    // ========== Article Repository Methods ==========

    pub async fn list_articles(&self) -> Result<Vec<Article>> {
        self.article_repo().list_all().await
    }

    pub async fn get_article(&self, id: i32) -> Result<Option<Article>> {
        self.article_repo().get(id).await
    }

    pub async fn article_count(&self) -> Result<u64> {
        self.article_repo().count().await
    }

    pub async fn insert_article(&self, article: NewArticle) -> Result<Article> {
        self.article_repo().insert(article).await
    }

    pub async fn insert_article_if_absent(&self, article: NewArticle) -> Result<bool> {
        self.article_repo().insert_if_absent(article).await
    }

    pub async fn update_article(&self, id: i32, edit: ArticleEdit) -> Result<ArticleUpdate> {
        self.article_repo().update(id, edit).await
    }

    pub async fn delete_article(&self, id: i32) -> Result<bool> {
        self.article_repo().delete(id).await
    }
}

/// Filesystem path behind a `SQLite` URL, or `None` for in-memory databases.
fn sqlite_file_path(db_url: &str) -> Option<PathBuf> {
    if db_url.contains(":memory:") || db_url.contains("mode=memory") {
        return None;
    }

    let rest = db_url
        .strip_prefix("sqlite://")
        .or_else(|| db_url.strip_prefix("sqlite:"))
        .unwrap_or(db_url);
    let path = rest.split('?').next().unwrap_or(rest);

    if path.is_empty() {
        None
    } else {
        Some(Path::new(path).to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlite_file_path() {
        assert_eq!(
            sqlite_file_path("sqlite:data/quillpad.db"),
            Some(PathBuf::from("data/quillpad.db"))
        );
        assert_eq!(
            sqlite_file_path("sqlite:///var/lib/quillpad.db?mode=rwc"),
            Some(PathBuf::from("/var/lib/quillpad.db"))
        );
        assert_eq!(
            sqlite_file_path("sqlite://data.db"),
            Some(PathBuf::from("data.db"))
        );
        assert_eq!(sqlite_file_path("sqlite::memory:"), None);
        assert_eq!(sqlite_file_path("sqlite:"), None);
    }
}
