//! Domain service for article listing and editing.

use thiserror::Error;

use crate::models::article::{Article, ArticleEdit};
use crate::validation::ValidationError;

#[derive(Debug, Error)]
pub enum ArticleError {
    #[error("Article {0} not found")]
    NotFound(i32),

    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("Title is already used by another article")]
    TitleTaken,

    #[error("Database error: {0}")]
    Database(String),
}

impl From<anyhow::Error> for ArticleError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

#[async_trait::async_trait]
pub trait ArticleService: Send + Sync {
    /// Every article, in storage order. No pagination.
    async fn list(&self) -> Result<Vec<Article>, ArticleError>;

    /// # Errors
    ///
    /// Returns [`ArticleError::NotFound`] if no article has this id.
    async fn get(&self, id: i32) -> Result<Article, ArticleError>;

    /// Validates and applies an edit. Nothing is written when validation fails.
    ///
    /// # Errors
    ///
    /// - [`ArticleError::NotFound`] if no article has this id (checked first)
    /// - [`ArticleError::Invalid`] for empty or over-long fields
    /// - [`ArticleError::TitleTaken`] if the title collides with another article
    async fn update(&self, id: i32, edit: ArticleEdit) -> Result<Article, ArticleError>;

    async fn delete(&self, id: i32) -> Result<(), ArticleError>;
}
