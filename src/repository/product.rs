use diesel::prelude::*;

use crate::{
    domain::product::{
        NewProduct as DomainNewProduct, Product as DomainProduct,
        UpdateProduct as DomainUpdateProduct,
    },
    models::product::{
        NewProduct as DbNewProduct, Product as DbProduct, UpdateProduct as DbUpdateProduct,
    },
    repository::{
        DieselRepository, ProductReader, ProductWriter, RepositoryError, RepositoryResult,
    },
};

impl ProductReader for DieselRepository {
    fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<DomainProduct>> {
        use crate::schema::{products, users};

        let mut conn = self.conn()?;
        let row = products::table
            .inner_join(users::table)
            .filter(products::id.eq(id))
            .select((DbProduct::as_select(), users::email))
            .first::<(DbProduct, String)>(&mut conn)
            .optional()?;

        Ok(row.map(Into::into))
    }

    fn list_products(&self) -> RepositoryResult<Vec<DomainProduct>> {
        use crate::schema::{products, users};

        let mut conn = self.conn()?;
        let rows = products::table
            .inner_join(users::table)
            .order(products::created_at.desc())
            .select((DbProduct::as_select(), users::email))
            .load::<(DbProduct, String)>(&mut conn)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(&self, new_product: &DomainNewProduct) -> RepositoryResult<DomainProduct> {
        use crate::schema::{products, users};

        let mut conn = self.conn()?;
        let db_new = DbNewProduct::from(new_product);

        let created = diesel::insert_into(products::table)
            .values(&db_new)
            .get_result::<DbProduct>(&mut conn)?;

        let author_email = users::table
            .filter(users::id.eq(created.author_id))
            .select(users::email)
            .first::<String>(&mut conn)?;

        Ok((created, author_email).into())
    }

    fn update_product(
        &self,
        product_id: i32,
        updates: &DomainUpdateProduct,
    ) -> RepositoryResult<DomainProduct> {
        use crate::schema::{products, users};

        let mut conn = self.conn()?;
        let db_updates = DbUpdateProduct::from(updates);

        let updated = diesel::update(products::table.filter(products::id.eq(product_id)))
            .set(&db_updates)
            .get_result::<DbProduct>(&mut conn)?;

        let author_email = users::table
            .filter(users::id.eq(updated.author_id))
            .select(users::email)
            .first::<String>(&mut conn)?;

        Ok((updated, author_email).into())
    }

    fn delete_product(&self, product_id: i32) -> RepositoryResult<()> {
        use crate::schema::{comment_likes, comments, products};

        let mut conn = self.conn()?;

        // Comments have no standalone delete operation; they go with the
        // parent product, likes first.
        conn.transaction::<_, RepositoryError, _>(|conn| {
            let comment_ids = comments::table
                .filter(comments::product_id.eq(product_id))
                .select(comments::id)
                .load::<i32>(conn)?;

            if !comment_ids.is_empty() {
                diesel::delete(
                    comment_likes::table.filter(comment_likes::comment_id.eq_any(&comment_ids)),
                )
                .execute(conn)?;
                diesel::delete(comments::table.filter(comments::id.eq_any(&comment_ids)))
                    .execute(conn)?;
            }

            let deleted = diesel::delete(products::table.filter(products::id.eq(product_id)))
                .execute(conn)?;
            if deleted == 0 {
                return Err(RepositoryError::NotFound);
            }

            Ok(())
        })
    }

    fn increment_view_count(&self, product_id: i32) -> RepositoryResult<()> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let updated = diesel::update(products::table.filter(products::id.eq(product_id)))
            .set(products::view_count.eq(products::view_count + 1))
            .execute(&mut conn)?;
        if updated == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
