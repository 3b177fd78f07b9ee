use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Domain representation of a comment attached to a product.
///
/// `like_count` and `is_liked` are derived from the like join table when the
/// record is loaded; `is_liked` is always `false` for anonymous viewers.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Comment {
    /// Unique identifier of the comment.
    pub id: i32,
    /// Identifier of the parent product. Immutable after creation.
    pub product_id: i32,
    /// Identifier of the authoring user.
    pub author_id: i32,
    /// Email of the authoring user, loaded alongside the record.
    pub author_email: String,
    /// Body text of the comment.
    pub content: String,
    /// Timestamp for when the comment was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the comment.
    pub updated_at: NaiveDateTime,
    /// Number of users currently liking the comment.
    pub like_count: i64,
    /// Whether the viewing user likes the comment.
    pub is_liked: bool,
}

/// Payload required to insert a new comment.
#[derive(Debug, Clone)]
pub struct NewComment {
    /// Identifier of the parent product.
    pub product_id: i32,
    /// Identifier of the authoring user.
    pub author_id: i32,
    /// Body text of the comment.
    pub content: String,
}

impl NewComment {
    pub fn new(product_id: i32, author_id: i32, content: impl Into<String>) -> Self {
        Self {
            product_id,
            author_id,
            content: content.into(),
        }
    }
}

/// Result of flipping a user's membership in a comment's liked-by set.
#[derive(Debug, Clone, Copy)]
pub struct LikeOutcome {
    /// Post-toggle state: `true` when the like was added.
    pub liked: bool,
    /// Post-toggle number of likes on the comment.
    pub like_count: i64,
}

/// Query definition used to list comments for a product.
#[derive(Debug, Clone)]
pub struct CommentListQuery {
    /// Parent product identifier.
    pub product_id: i32,
    /// Viewer used to resolve the `is_liked` flag, if authenticated.
    pub viewer_id: Option<i32>,
}

impl CommentListQuery {
    /// Construct a query that targets all comments belonging to `product_id`.
    pub fn new(product_id: i32) -> Self {
        Self {
            product_id,
            viewer_id: None,
        }
    }

    /// Resolve `is_liked` against the given viewer.
    pub fn viewer(mut self, viewer_id: i32) -> Self {
        self.viewer_id = Some(viewer_id);
        self
    }
}
