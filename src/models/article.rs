use chrono::{DateTime, Utc};

use crate::entities::articles;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub author: String,
    pub pubdate: DateTime<Utc>,
}

impl From<articles::Model> for Article {
    fn from(model: articles::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            content: model.content,
            author: model.author,
            pubdate: model.pubdate,
        }
    }
}

/// Fields accepted when inserting an article. `pubdate` is stamped on insert.
#[derive(Debug, Clone)]
pub struct NewArticle {
    pub title: String,
    pub content: String,
    pub author: String,
}

impl NewArticle {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            author: author.into(),
        }
    }
}

/// The two fields the edit form may change.
#[derive(Debug, Clone)]
pub struct ArticleEdit {
    pub title: String,
    pub content: String,
}
