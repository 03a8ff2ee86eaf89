use super::WebError;

/// Article ids are positive integers; anything else cannot name an article.
pub fn parse_article_id(raw: &str) -> Result<i32, WebError> {
    match raw.parse::<i32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(WebError::not_found("Article", raw)),
    }
}
