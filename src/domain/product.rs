use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Domain representation of a product posting.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Product {
    /// Unique identifier of the product.
    pub id: i32,
    /// Identifier of the authoring user.
    pub author_id: i32,
    /// Email of the authoring user, loaded alongside the record.
    pub author_email: String,
    /// Title shown in listings.
    pub title: String,
    /// Body text of the posting.
    pub content: String,
    /// Number of de-duplicated detail reads. Never decreases.
    pub view_count: i32,
    /// Timestamp for when the product record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the product record.
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    /// Identifier of the authoring user.
    pub author_id: i32,
    /// Title shown in listings.
    pub title: String,
    /// Body text of the posting.
    pub content: String,
}

impl NewProduct {
    pub fn new(author_id: i32, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            author_id,
            title: title.into(),
            content: content.into(),
        }
    }
}

/// Patch data applied when updating an existing product.
///
/// `None` fields are left untouched, so the same type serves full and
/// partial updates.
#[derive(Debug, Clone)]
pub struct UpdateProduct {
    /// Optional title update.
    pub title: Option<String>,
    /// Optional content update.
    pub content: Option<String>,
    /// Timestamp captured when the patch was created.
    pub updated_at: NaiveDateTime,
}

impl Default for UpdateProduct {
    fn default() -> Self {
        Self::new()
    }
}

impl UpdateProduct {
    /// Create a new patch object with no changes applied yet.
    pub fn new() -> Self {
        Self {
            title: None,
            content: None,
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }

    /// Update the product title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Update the product content.
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }
}
