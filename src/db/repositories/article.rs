use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, SqlErr,
};
use tracing::info;

use crate::entities::{articles, prelude::*};
use crate::models::article::{Article, ArticleEdit, NewArticle};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArticleUpdate {
    Updated(Article),
    NotFound,
    /// Another article already carries the requested title
    TitleTaken,
}

/// Repository for article operations
pub struct ArticleRepository {
    conn: DatabaseConnection,
}

impl ArticleRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// All articles in storage order.
    pub async fn list_all(&self) -> Result<Vec<Article>> {
        let rows = Articles::find()
            .order_by_asc(articles::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list articles")?;

        Ok(rows.into_iter().map(Article::from).collect())
    }

    pub async fn get(&self, id: i32) -> Result<Option<Article>> {
        let row = Articles::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query article")?;

        Ok(row.map(Article::from))
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(Articles::find().count(&self.conn).await?)
    }

    pub async fn insert(&self, article: NewArticle) -> Result<Article> {
        let model = articles::ActiveModel {
            title: Set(article.title),
            content: Set(article.content),
            author: Set(article.author),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert article")?;

        info!("Inserted article {}: {}", model.id, model.title);
        Ok(model.into())
    }

    /// Inserts unless an article with the same title exists. Returns whether
    /// a row was written.
    pub async fn insert_if_absent(&self, article: NewArticle) -> Result<bool> {
        let existing = Articles::find()
            .filter(articles::Column::Title.eq(article.title.as_str()))
            .count(&self.conn)
            .await?;

        if existing > 0 {
            return Ok(false);
        }

        self.insert(article).await?;
        Ok(true)
    }

    pub async fn update(&self, id: i32, edit: ArticleEdit) -> Result<ArticleUpdate> {
        let Some(row) = Articles::find_by_id(id).one(&self.conn).await? else {
            return Ok(ArticleUpdate::NotFound);
        };

        let mut active: articles::ActiveModel = row.into();
        active.title = Set(edit.title);
        active.content = Set(edit.content);

        match active.update(&self.conn).await {
            Ok(model) => Ok(ArticleUpdate::Updated(model.into())),
            Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Ok(ArticleUpdate::TitleTaken)
            }
            Err(err) => Err(err).context("Failed to update article"),
        }
    }

    /// Returns false when no article had this id.
    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = Articles::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete article")?;

        Ok(result.rows_affected > 0)
    }
}
