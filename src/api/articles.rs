use axum::{
    Form,
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::auth::MSG_INVALID_INPUT;
use super::flash::{self, Flash};
use super::validation::parse_article_id;
use super::{AppState, PageContext, WebError, views};
use crate::models::article::ArticleEdit;
use crate::services::ArticleError;

pub const MSG_ARTICLE_UPDATED: &str = "Article updated.";
pub const MSG_ARTICLE_DELETED: &str = "Article deleted.";
pub const MSG_TITLE_TAKEN: &str = "Title already in use.";

#[derive(Deserialize)]
pub struct ArticleForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

/// GET /
pub async fn index(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Html<String>, WebError> {
    let ctx = PageContext::load(&state, &session).await?;
    let articles = state.article_service().list().await?;
    Ok(Html(views::index(&ctx, &articles)))
}

/// GET /ariticle/edit/{id}
pub async fn edit_form(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Html<String>, WebError> {
    let id = parse_article_id(&id)?;
    let article = state.article_service().get(id).await?;
    let ctx = PageContext::load(&state, &session).await?;
    Ok(Html(views::edit(&ctx, &article)))
}

/// POST /ariticle/edit/{id}
pub async fn update_article(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<String>,
    Form(form): Form<ArticleForm>,
) -> Result<Response, WebError> {
    let id = parse_article_id(&id)?;
    let edit = ArticleEdit {
        title: form.title,
        content: form.content,
    };

    let rejection = match state.article_service().update(id, edit).await {
        Ok(_) => {
            flash::push(&session, Flash::success(MSG_ARTICLE_UPDATED)).await?;
            return Ok(Redirect::to("/").into_response());
        }
        Err(ArticleError::Invalid(reason)) => format!("{MSG_INVALID_INPUT} {reason}."),
        Err(ArticleError::TitleTaken) => MSG_TITLE_TAKEN.to_string(),
        Err(e) => return Err(e.into()),
    };

    flash::push(&session, Flash::error(rejection)).await?;
    Ok(Redirect::to(&views::edit_path(id)).into_response())
}

/// POST /ariticle/delete/{id}
pub async fn delete_article(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Redirect, WebError> {
    let id = parse_article_id(&id)?;
    state.article_service().delete(id).await?;
    flash::push(&session, Flash::success(MSG_ARTICLE_DELETED)).await?;
    Ok(Redirect::to("/"))
}

pub async fn not_found() -> WebError {
    WebError::NotFound("Page not found".to_string())
}
