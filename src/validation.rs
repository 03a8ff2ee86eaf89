//! Length and emptiness checks shared by the edit form and the CLI.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    #[error("{field} must be {max} characters or less")]
    TooLong { field: &'static str, max: usize },
}

/// Rejects blank values and values longer than `max` characters.
/// Length counts characters, not bytes.
pub fn require_text(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_text() {
        assert!(require_text("title", "hello", 60).is_ok());
        assert_eq!(
            require_text("title", "", 60),
            Err(ValidationError::Empty { field: "title" })
        );
        assert_eq!(
            require_text("title", "   ", 60),
            Err(ValidationError::Empty { field: "title" })
        );
        assert_eq!(
            require_text("content", "hello", 4),
            Err(ValidationError::TooLong {
                field: "content",
                max: 4
            })
        );
    }

    #[test]
    fn test_require_text_counts_characters() {
        // four CJK characters are twelve bytes in UTF-8
        assert!(require_text("content", "你好世界", 4).is_ok());
        assert!(require_text("name", "李黑皮", 4).is_ok());
        assert!(require_text("name", "李黑皮皮皮", 4).is_err());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ValidationError::Empty { field: "title" }.to_string(),
            "title cannot be empty"
        );
        assert_eq!(
            ValidationError::TooLong {
                field: "title",
                max: 60
            }
            .to_string(),
            "title must be 60 characters or less"
        );
    }
}
