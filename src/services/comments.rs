use chrono::NaiveDateTime;
use serde::Serialize;

use crate::auth::AuthenticatedUser;
use crate::domain::comment::{Comment, CommentListQuery};
use crate::forms::comments::CommentForm;
use crate::repository::{CommentReader, CommentWriter, ProductReader};
use crate::services::{ServiceError, ServiceResult};

/// View model for a comment, with the author rendered as their email.
#[derive(Debug, Serialize)]
pub struct CommentView {
    pub id: i32,
    pub product: i32,
    pub author: String,
    pub content: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub like_count: i64,
    pub is_liked: bool,
}

impl From<Comment> for CommentView {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            product: comment.product_id,
            author: comment.author_email,
            content: comment.content,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
            like_count: comment.like_count,
            is_liked: comment.is_liked,
        }
    }
}

/// Result of a like toggle: the post-toggle state plus the updated comment.
#[derive(Debug)]
pub struct LikeToggleData {
    pub liked: bool,
    pub comment: CommentView,
}

/// Returns all comments under a product, oldest first.
pub fn list_comments<R>(
    repo: &R,
    viewer: Option<&AuthenticatedUser>,
    product_id: i32,
) -> ServiceResult<Vec<CommentView>>
where
    R: ProductReader + CommentReader + ?Sized,
{
    ensure_product_exists(repo, product_id)?;

    let mut query = CommentListQuery::new(product_id);
    if let Some(user) = viewer {
        query = query.viewer(user.sub);
    }

    let comments = repo.list_comments(query)?;
    Ok(comments.into_iter().map(Into::into).collect())
}

/// Creates a comment under a product, authored by the requesting user.
pub fn create_comment<R>(
    repo: &R,
    user: &AuthenticatedUser,
    product_id: i32,
    form: CommentForm,
) -> ServiceResult<CommentView>
where
    R: ProductReader + CommentWriter + ?Sized,
{
    ensure_product_exists(repo, product_id)?;

    let payload = form.into_new_comment(product_id, user.sub)?;
    let created = repo.create_comment(&payload)?;
    Ok(created.into())
}

/// Flips the requesting user's like on a comment.
///
/// The comment lookup is scoped to `product_id`, so a comment reached
/// through the wrong product path is treated as missing.
pub fn toggle_like<R>(
    repo: &R,
    user: &AuthenticatedUser,
    product_id: i32,
    comment_id: i32,
) -> ServiceResult<LikeToggleData>
where
    R: ProductReader + CommentReader + CommentWriter + ?Sized,
{
    ensure_product_exists(repo, product_id)?;

    repo.get_comment_by_id(comment_id, product_id, Some(user.sub))?
        .ok_or(ServiceError::NotFound)?;

    let outcome = repo.toggle_comment_like(comment_id, user.sub)?;

    let comment = repo
        .get_comment_by_id(comment_id, product_id, Some(user.sub))?
        .ok_or(ServiceError::NotFound)?;

    Ok(LikeToggleData {
        liked: outcome.liked,
        comment: comment.into(),
    })
}

fn ensure_product_exists<R>(repo: &R, product_id: i32) -> ServiceResult<()>
where
    R: ProductReader + ?Sized,
{
    repo.get_product_by_id(product_id)?
        .ok_or(ServiceError::NotFound)?;
    Ok(())
}
