use crate::db::{DbConnection, DbPool};
use crate::domain::comment::{Comment, CommentListQuery, LikeOutcome, NewComment};
use crate::domain::product::{NewProduct, Product, UpdateProduct};
use crate::domain::user::{NewUser, User};

pub mod comment;
pub mod errors;
pub mod product;
pub mod user;

#[cfg(test)]
pub mod mock;

pub use errors::{RepositoryError, RepositoryResult};

/// Diesel-backed repository implementation that wraps an r2d2 pool.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only operations over user records.
pub trait UserReader {
    fn get_user_by_id(&self, id: i32) -> RepositoryResult<Option<User>>;
    fn get_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;
}

/// Write operations over user records.
pub trait UserWriter {
    fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
}

/// Read-only operations over product records.
pub trait ProductReader {
    fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<Product>>;
    fn list_products(&self) -> RepositoryResult<Vec<Product>>;
}

/// Write operations over product records.
pub trait ProductWriter {
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
    fn update_product(&self, product_id: i32, updates: &UpdateProduct) -> RepositoryResult<Product>;
    fn delete_product(&self, product_id: i32) -> RepositoryResult<()>;
    /// Bump the view counter by one with a single atomic column update.
    fn increment_view_count(&self, product_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over comment records.
pub trait CommentReader {
    /// Fetch a comment scoped to its parent product. A comment that exists
    /// under a different product resolves to `None`.
    fn get_comment_by_id(
        &self,
        comment_id: i32,
        product_id: i32,
        viewer_id: Option<i32>,
    ) -> RepositoryResult<Option<Comment>>;
    fn list_comments(&self, query: CommentListQuery) -> RepositoryResult<Vec<Comment>>;
}

/// Write operations over comment records.
pub trait CommentWriter {
    fn create_comment(&self, new_comment: &NewComment) -> RepositoryResult<Comment>;
    /// Flip membership of `user_id` in the comment's liked-by set.
    fn toggle_comment_like(&self, comment_id: i32, user_id: i32) -> RepositoryResult<LikeOutcome>;
}
