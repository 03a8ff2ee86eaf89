//! Server-rendered pages. Every user-supplied string goes through
//! `html_escape` before it reaches the markup.

use axum::http::StatusCode;
use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};
use std::fmt::Write;

use super::PageContext;
use crate::models::article::Article;

const SITE_TITLE: &str = "Articles";

#[must_use]
pub fn edit_path(id: i32) -> String {
    format!("/ariticle/edit/{id}")
}

#[must_use]
pub fn delete_path(id: i32) -> String {
    format!("/ariticle/delete/{id}")
}

#[must_use]
pub fn index(ctx: &PageContext, articles: &[Article]) -> String {
    let mut body = String::new();

    if !ctx.is_authenticated() {
        body.push_str(LOGIN_FORM);
    }

    let _ = write!(body, "<p class=\"count\">{} articles</p>", articles.len());
    body.push_str("<ul class=\"articles\">");
    for article in articles {
        let _ = write!(
            body,
            "<li><h2>{title}</h2><p class=\"meta\">{author} · {pubdate}</p><p>{content}</p>",
            title = text(&article.title),
            author = text(&article.author),
            pubdate = article.pubdate.format("%Y-%m-%d %H:%M"),
            content = text(&article.content),
        );
        if ctx.is_authenticated() {
            let _ = write!(
                body,
                "<span class=\"actions\"><a class=\"btn\" href=\"{edit}\">Edit</a>\
                 <form class=\"inline-form\" method=\"post\" action=\"{delete}\">\
                 <input class=\"btn\" type=\"submit\" value=\"Delete\"></form></span>",
                edit = edit_path(article.id),
                delete = delete_path(article.id),
            );
        }
        body.push_str("</li>");
    }
    body.push_str("</ul>");

    layout(Some(ctx), SITE_TITLE, &body)
}

#[must_use]
pub fn edit(ctx: &PageContext, article: &Article) -> String {
    let mut body = String::new();
    let _ = write!(
        body,
        "<h3>Edit article</h3>\
         <form method=\"post\" action=\"{action}\">\
         <label for=\"title\">Title</label>\
         <input type=\"text\" id=\"title\" name=\"title\" autocomplete=\"off\" required value=\"{title}\">\
         <label for=\"content\">Content</label>\
         <textarea id=\"content\" name=\"content\" required>{content}</textarea>\
         <input class=\"btn\" type=\"submit\" value=\"Update\">\
         </form>",
        action = edit_path(article.id),
        title = attr(&article.title),
        content = text(&article.content),
    );

    layout(Some(ctx), &format!("Edit · {}", article.title), &body)
}

#[must_use]
pub fn error_page(status: StatusCode, message: &str) -> String {
    let body = format!(
        "<h2>{code} {reason}</h2><p>{message}</p><p><a href=\"/\">Go back home</a></p>",
        code = status.as_u16(),
        reason = status.canonical_reason().unwrap_or("Error"),
        message = text(message),
    );
    layout(None, status.canonical_reason().unwrap_or("Error"), &body)
}

const LOGIN_FORM: &str = "<form class=\"login\" method=\"post\" action=\"/\">\
     <label for=\"username\">Username</label>\
     <input type=\"text\" id=\"username\" name=\"username\" required>\
     <label for=\"password\">Password</label>\
     <input type=\"password\" id=\"password\" name=\"password\" required>\
     <input class=\"btn\" type=\"submit\" value=\"Log in\">\
     </form>";

fn layout(ctx: Option<&PageContext>, title: &str, body: &str) -> String {
    let mut page = String::with_capacity(body.len() + 512);
    let _ = write!(
        page,
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
         <title>{title}</title>\
         <link rel=\"stylesheet\" href=\"/static/style.css\"></head><body>",
        title = text(title),
    );

    page.push_str("<header><h1>");
    match ctx.and_then(PageContext::owner_name) {
        Some(name) => {
            let _ = write!(page, "{}'s {SITE_TITLE}", text(name));
        }
        None => page.push_str(SITE_TITLE),
    }
    page.push_str("</h1><nav><a href=\"/\">Home</a>");
    if ctx.is_some_and(PageContext::is_authenticated) {
        page.push_str("<a href=\"/logout\">Logout</a>");
    }
    page.push_str("</nav></header>");

    if let Some(ctx) = ctx {
        for flash in &ctx.flashes {
            let _ = write!(
                page,
                "<div class=\"alert {level}\">{message}</div>",
                level = flash.level.as_str(),
                message = text(&flash.message),
            );
        }
    }

    let _ = write!(page, "<main>{body}</main></body></html>");
    page
}
