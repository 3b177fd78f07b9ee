use mockall::mock;

use super::{
    CommentReader, CommentWriter, ProductReader, ProductWriter, RepositoryResult, UserReader,
    UserWriter,
};
use crate::domain::{
    comment::{Comment, CommentListQuery, LikeOutcome, NewComment},
    product::{NewProduct, Product, UpdateProduct},
    user::{NewUser, User},
};

mock! {
    pub UserReader {}

    impl UserReader for UserReader {
        fn get_user_by_id(&self, id: i32) -> RepositoryResult<Option<User>>;
        fn get_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;
    }
}

mock! {
    pub UserWriter {}

    impl UserWriter for UserWriter {
        fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
    }
}

mock! {
    pub ProductReader {}

    impl ProductReader for ProductReader {
        fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<Product>>;
        fn list_products(&self) -> RepositoryResult<Vec<Product>>;
    }
}

mock! {
    pub ProductWriter {}

    impl ProductWriter for ProductWriter {
        fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
        fn update_product(&self, product_id: i32, updates: &UpdateProduct) -> RepositoryResult<Product>;
        fn delete_product(&self, product_id: i32) -> RepositoryResult<()>;
        fn increment_view_count(&self, product_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub CommentReader {}

    impl CommentReader for CommentReader {
        fn get_comment_by_id(&self, comment_id: i32, product_id: i32, viewer_id: Option<i32>) -> RepositoryResult<Option<Comment>>;
        fn list_comments(&self, query: CommentListQuery) -> RepositoryResult<Vec<Comment>>;
    }
}

mock! {
    pub CommentWriter {}

    impl CommentWriter for CommentWriter {
        fn create_comment(&self, new_comment: &NewComment) -> RepositoryResult<Comment>;
        fn toggle_comment_like(&self, comment_id: i32, user_id: i32) -> RepositoryResult<LikeOutcome>;
    }
}
