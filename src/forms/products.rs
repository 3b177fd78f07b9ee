use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::product::{NewProduct, UpdateProduct};
use crate::forms::sanitize_inline_text;

/// Maximum allowed length for a product title.
const TITLE_MAX_LEN: usize = 200;
const TITLE_MAX_LEN_VALIDATOR: u64 = TITLE_MAX_LEN as u64;

/// Result type returned by the product form helpers.
pub type ProductFormResult<T> = Result<T, ProductFormError>;

/// Errors that can occur while processing product payloads.
#[derive(Debug, Error)]
pub enum ProductFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The provided title is empty after sanitization.
    #[error("title cannot be empty")]
    EmptyTitle,
    /// The provided content is empty after sanitization.
    #[error("content cannot be empty")]
    EmptyContent,
}

/// JSON body accepted when creating a product or replacing one with `PUT`.
#[derive(Debug, Deserialize, Validate)]
pub struct ProductForm {
    #[validate(length(min = 1, max = TITLE_MAX_LEN_VALIDATOR))]
    pub title: String,
    #[validate(length(min = 1))]
    pub content: String,
}

impl ProductForm {
    /// Validates and sanitizes the payload into a domain `NewProduct`.
    pub fn into_new_product(self, author_id: i32) -> ProductFormResult<NewProduct> {
        let (title, content) = self.sanitized()?;
        Ok(NewProduct::new(author_id, title, content))
    }

    /// Validates and sanitizes the payload into a full-replacement patch.
    pub fn into_full_update(self) -> ProductFormResult<UpdateProduct> {
        let (title, content) = self.sanitized()?;
        Ok(UpdateProduct::new().title(title).content(content))
    }

    fn sanitized(self) -> ProductFormResult<(String, String)> {
        self.validate()?;

        let title = sanitize_inline_text(&self.title);
        if title.is_empty() {
            return Err(ProductFormError::EmptyTitle);
        }

        let content = self.content.trim().to_string();
        if content.is_empty() {
            return Err(ProductFormError::EmptyContent);
        }

        Ok((title, content))
    }
}

/// JSON body accepted when partially updating a product with `PATCH`.
#[derive(Debug, Deserialize, Validate)]
pub struct PatchProductForm {
    #[validate(length(min = 1, max = TITLE_MAX_LEN_VALIDATOR))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub content: Option<String>,
}

impl PatchProductForm {
    /// Validates and sanitizes the payload into a partial patch. Absent
    /// fields are left untouched on the record.
    pub fn into_partial_update(self) -> ProductFormResult<UpdateProduct> {
        self.validate()?;

        let mut update = UpdateProduct::new();

        if let Some(raw_title) = self.title.as_ref() {
            let title = sanitize_inline_text(raw_title);
            if title.is_empty() {
                return Err(ProductFormError::EmptyTitle);
            }
            update = update.title(title);
        }

        if let Some(raw_content) = self.content.as_ref() {
            let content = raw_content.trim();
            if content.is_empty() {
                return Err(ProductFormError::EmptyContent);
            }
            update = update.content(content);
        }

        Ok(update)
    }
}
