use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::comment::{Comment as DomainComment, NewComment as DomainNewComment};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::comments)]
pub struct Comment {
    pub id: i32,
    pub product_id: i32,
    pub author_id: i32,
    pub content: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::comments)]
pub struct NewComment<'a> {
    pub product_id: i32,
    pub author_id: i32,
    pub content: &'a str,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::comment_likes)]
pub struct NewCommentLike {
    pub comment_id: i32,
    pub user_id: i32,
}

impl Comment {
    /// Assemble the domain comment from the row plus its derived fields.
    pub fn into_domain(self, author_email: String, like_count: i64, is_liked: bool) -> DomainComment {
        DomainComment {
            id: self.id,
            product_id: self.product_id,
            author_id: self.author_id,
            author_email,
            content: self.content,
            created_at: self.created_at,
            updated_at: self.updated_at,
            like_count,
            is_liked,
        }
    }
}

impl<'a> From<&'a DomainNewComment> for NewComment<'a> {
    fn from(value: &'a DomainNewComment) -> Self {
        Self {
            product_id: value.product_id,
            author_id: value.author_id,
            content: value.content.as_str(),
        }
    }
}
