use std::collections::{HashMap, HashSet};

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::{
    domain::comment::{
        Comment as DomainComment, CommentListQuery, LikeOutcome, NewComment as DomainNewComment,
    },
    models::comment::{Comment as DbComment, NewComment as DbNewComment, NewCommentLike},
    repository::{CommentReader, CommentWriter, DieselRepository, RepositoryResult},
};

impl CommentReader for DieselRepository {
    fn get_comment_by_id(
        &self,
        comment_id: i32,
        product_id: i32,
        viewer_id: Option<i32>,
    ) -> RepositoryResult<Option<DomainComment>> {
        use crate::schema::{comment_likes, comments, users};

        let mut conn = self.conn()?;
        let row = comments::table
            .inner_join(users::table)
            .filter(comments::id.eq(comment_id))
            .filter(comments::product_id.eq(product_id))
            .select((DbComment::as_select(), users::email))
            .first::<(DbComment, String)>(&mut conn)
            .optional()?;

        let Some((db_comment, author_email)) = row else {
            return Ok(None);
        };

        let like_count = comment_likes::table
            .filter(comment_likes::comment_id.eq(comment_id))
            .count()
            .get_result::<i64>(&mut conn)?;

        let is_liked = match viewer_id {
            Some(user_id) => diesel::select(diesel::dsl::exists(
                comment_likes::table
                    .filter(comment_likes::comment_id.eq(comment_id))
                    .filter(comment_likes::user_id.eq(user_id)),
            ))
            .get_result::<bool>(&mut conn)?,
            None => false,
        };

        Ok(Some(db_comment.into_domain(author_email, like_count, is_liked)))
    }

    fn list_comments(&self, query: CommentListQuery) -> RepositoryResult<Vec<DomainComment>> {
        use crate::schema::{comments, users};

        let mut conn = self.conn()?;
        let rows = comments::table
            .inner_join(users::table)
            .filter(comments::product_id.eq(query.product_id))
            .order((comments::created_at.asc(), comments::id.asc()))
            .select((DbComment::as_select(), users::email))
            .load::<(DbComment, String)>(&mut conn)?;

        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let comment_ids: Vec<i32> = rows.iter().map(|(comment, _)| comment.id).collect();
        let like_counts = load_like_counts(&mut conn, &comment_ids)?;
        let liked_ids = match query.viewer_id {
            Some(viewer_id) => load_liked_ids(&mut conn, &comment_ids, viewer_id)?,
            None => HashSet::new(),
        };

        let domain_comments = rows
            .into_iter()
            .map(|(comment, author_email)| {
                let like_count = like_counts.get(&comment.id).copied().unwrap_or(0);
                let is_liked = liked_ids.contains(&comment.id);
                comment.into_domain(author_email, like_count, is_liked)
            })
            .collect();

        Ok(domain_comments)
    }
}

impl CommentWriter for DieselRepository {
    fn create_comment(&self, new_comment: &DomainNewComment) -> RepositoryResult<DomainComment> {
        use crate::schema::{comments, users};

        let mut conn = self.conn()?;
        let db_new = DbNewComment::from(new_comment);

        let created = diesel::insert_into(comments::table)
            .values(&db_new)
            .get_result::<DbComment>(&mut conn)?;

        let author_email = users::table
            .filter(users::id.eq(created.author_id))
            .select(users::email)
            .first::<String>(&mut conn)?;

        // A fresh comment has no likes yet.
        Ok(created.into_domain(author_email, 0, false))
    }

    fn toggle_comment_like(&self, comment_id: i32, user_id: i32) -> RepositoryResult<LikeOutcome> {
        use crate::schema::comment_likes;

        let mut conn = self.conn()?;

        let existing = comment_likes::table
            .filter(comment_likes::comment_id.eq(comment_id))
            .filter(comment_likes::user_id.eq(user_id))
            .select(comment_likes::id)
            .first::<i32>(&mut conn)
            .optional()?;

        let liked = match existing {
            Some(like_id) => {
                diesel::delete(comment_likes::table.filter(comment_likes::id.eq(like_id)))
                    .execute(&mut conn)?;
                false
            }
            None => {
                diesel::insert_into(comment_likes::table)
                    .values(&NewCommentLike {
                        comment_id,
                        user_id,
                    })
                    .execute(&mut conn)?;
                true
            }
        };

        let like_count = comment_likes::table
            .filter(comment_likes::comment_id.eq(comment_id))
            .count()
            .get_result::<i64>(&mut conn)?;

        Ok(LikeOutcome { liked, like_count })
    }
}

fn load_like_counts(
    conn: &mut SqliteConnection,
    comment_ids: &[i32],
) -> RepositoryResult<HashMap<i32, i64>> {
    use crate::schema::comment_likes;

    let rows = comment_likes::table
        .filter(comment_likes::comment_id.eq_any(comment_ids))
        .group_by(comment_likes::comment_id)
        .select((comment_likes::comment_id, diesel::dsl::count_star()))
        .load::<(i32, i64)>(conn)?;

    Ok(rows.into_iter().collect())
}

fn load_liked_ids(
    conn: &mut SqliteConnection,
    comment_ids: &[i32],
    viewer_id: i32,
) -> RepositoryResult<HashSet<i32>> {
    use crate::schema::comment_likes;

    let rows = comment_likes::table
        .filter(comment_likes::comment_id.eq_any(comment_ids))
        .filter(comment_likes::user_id.eq(viewer_id))
        .select(comment_likes::comment_id)
        .load::<i32>(conn)?;

    Ok(rows.into_iter().collect())
}
