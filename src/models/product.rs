use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::product::{
    NewProduct as DomainNewProduct, Product as DomainProduct, UpdateProduct as DomainUpdateProduct,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::products)]
pub struct Product {
    pub id: i32,
    pub author_id: i32,
    pub title: String,
    pub content: String,
    pub view_count: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::products)]
pub struct NewProduct<'a> {
    pub author_id: i32,
    pub title: &'a str,
    pub content: &'a str,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::products)]
pub struct UpdateProduct<'a> {
    pub title: Option<&'a str>,
    pub content: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

impl From<(Product, String)> for DomainProduct {
    fn from((value, author_email): (Product, String)) -> Self {
        Self {
            id: value.id,
            author_id: value.author_id,
            author_email,
            title: value.title,
            content: value.content,
            view_count: value.view_count,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewProduct> for NewProduct<'a> {
    fn from(value: &'a DomainNewProduct) -> Self {
        Self {
            author_id: value.author_id,
            title: value.title.as_str(),
            content: value.content.as_str(),
        }
    }
}

impl<'a> From<&'a DomainUpdateProduct> for UpdateProduct<'a> {
    fn from(value: &'a DomainUpdateProduct) -> Self {
        Self {
            title: value.title.as_deref(),
            content: value.content.as_deref(),
            updated_at: value.updated_at,
        }
    }
}
