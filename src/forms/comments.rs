use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::comment::NewComment;

/// Maximum allowed length for a comment body.
const CONTENT_MAX_LEN: usize = 2000;
const CONTENT_MAX_LEN_VALIDATOR: u64 = CONTENT_MAX_LEN as u64;

pub type CommentFormResult<T> = Result<T, CommentFormError>;

/// Errors that can occur while processing comment payloads.
#[derive(Debug, Error)]
pub enum CommentFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("content cannot be empty")]
    EmptyContent,
}

/// JSON body accepted when creating a comment.
#[derive(Debug, Deserialize, Validate)]
pub struct CommentForm {
    #[validate(length(min = 1, max = CONTENT_MAX_LEN_VALIDATOR))]
    pub content: String,
}

impl CommentForm {
    /// Validates and sanitizes the payload into a domain `NewComment`.
    pub fn into_new_comment(
        self,
        product_id: i32,
        author_id: i32,
    ) -> CommentFormResult<NewComment> {
        self.validate()?;

        let content = self.content.trim().to_string();
        if content.is_empty() {
            return Err(CommentFormError::EmptyContent);
        }

        Ok(NewComment::new(product_id, author_id, content))
    }
}
