//! `SeaORM` implementation of the `ArticleService` trait.

use async_trait::async_trait;
use tracing::info;

use crate::config::EditorConfig;
use crate::db::{ArticleUpdate, Store};
use crate::models::article::{Article, ArticleEdit};
use crate::services::article_service::{ArticleError, ArticleService};
use crate::validation::require_text;

pub struct SeaOrmArticleService {
    store: Store,
    limits: EditorConfig,
}

impl SeaOrmArticleService {
    #[must_use]
    pub const fn new(store: Store, limits: EditorConfig) -> Self {
        Self { store, limits }
    }

    fn validate(&self, edit: &ArticleEdit) -> Result<(), ArticleError> {
        require_text("title", &edit.title, self.limits.max_title_chars)?;
        require_text("content", &edit.content, self.limits.max_content_chars)?;
        Ok(())
    }
}

#[async_trait]
impl ArticleService for SeaOrmArticleService {
    async fn list(&self) -> Result<Vec<Article>, ArticleError> {
        Ok(self.store.list_articles().await?)
    }

    async fn get(&self, id: i32) -> Result<Article, ArticleError> {
        self.store
            .get_article(id)
            .await?
            .ok_or(ArticleError::NotFound(id))
    }

    async fn update(&self, id: i32, edit: ArticleEdit) -> Result<Article, ArticleError> {
        // 404 wins over validation errors
        self.get(id).await?;
        self.validate(&edit)?;

        match self.store.update_article(id, edit).await? {
            ArticleUpdate::Updated(article) => {
                info!(article_id = id, "Article updated");
                metrics::counter!("articles_mutations_total", "op" => "update").increment(1);
                Ok(article)
            }
            ArticleUpdate::NotFound => Err(ArticleError::NotFound(id)),
            ArticleUpdate::TitleTaken => Err(ArticleError::TitleTaken),
        }
    }

    async fn delete(&self, id: i32) -> Result<(), ArticleError> {
        self.get(id).await?;

        if !self.store.delete_article(id).await? {
            return Err(ArticleError::NotFound(id));
        }

        info!(article_id = id, "Article deleted");
        metrics::counter!("articles_mutations_total", "op" => "delete").increment(1);
        Ok(())
    }
}
