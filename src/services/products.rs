use chrono::NaiveDateTime;
use serde::Serialize;

use crate::auth::AuthenticatedUser;
use crate::domain::product::Product;
use crate::forms::products::{PatchProductForm, ProductForm};
use crate::repository::{ProductReader, ProductWriter};
use crate::services::{ServiceError, ServiceResult};
use crate::view_limiter::ViewLimiter;

const FORBIDDEN_EDIT: &str = "You do not have permission to edit this product.";
const FORBIDDEN_DELETE: &str = "You do not have permission to delete this product.";

/// View model for a product in the listing.
#[derive(Debug, Serialize)]
pub struct ProductListItem {
    pub id: i32,
    pub author: i32,
    pub title: String,
    pub created_at: NaiveDateTime,
    pub view_count: i32,
}

impl From<Product> for ProductListItem {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            author: product.author_id,
            title: product.title,
            created_at: product.created_at,
            view_count: product.view_count,
        }
    }
}

/// View model for a single product, with the author rendered as their email.
#[derive(Debug, Serialize)]
pub struct ProductDetail {
    pub id: i32,
    pub author: String,
    pub title: String,
    pub content: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub view_count: i32,
}

impl From<Product> for ProductDetail {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            author: product.author_email,
            title: product.title,
            content: product.content,
            created_at: product.created_at,
            updated_at: product.updated_at,
            view_count: product.view_count,
        }
    }
}

/// Returns all products, newest first.
pub fn list_products<R>(repo: &R) -> ServiceResult<Vec<ProductListItem>>
where
    R: ProductReader + ?Sized,
{
    let products = repo.list_products()?;
    Ok(products.into_iter().map(Into::into).collect())
}

/// Creates a new product authored by the requesting user.
pub fn create_product<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: ProductForm,
) -> ServiceResult<ProductDetail>
where
    R: ProductWriter + ?Sized,
{
    let payload = form.into_new_product(user.sub)?;
    let created = repo.create_product(&payload)?;
    Ok(created.into())
}

/// Loads the product detail, counting the view unless the requester is the
/// author or a live suppression entry exists for their address.
pub fn product_detail<R>(
    repo: &R,
    viewer: Option<&AuthenticatedUser>,
    client_addr: &str,
    limiter: &ViewLimiter,
    product_id: i32,
) -> ServiceResult<ProductDetail>
where
    R: ProductReader + ProductWriter + ?Sized,
{
    let mut product = repo
        .get_product_by_id(product_id)?
        .ok_or(ServiceError::NotFound)?;

    let is_author = viewer.is_some_and(|user| user.sub == product.author_id);
    if !is_author && limiter.set_if_new(client_addr, product.id) {
        repo.increment_view_count(product.id)?;
        product.view_count += 1;
    }

    Ok(product.into())
}

/// Replaces title and content of a product. Author-only.
pub fn replace_product<R>(
    repo: &R,
    user: &AuthenticatedUser,
    product_id: i32,
    form: ProductForm,
) -> ServiceResult<ProductDetail>
where
    R: ProductReader + ProductWriter + ?Sized,
{
    authorize_author(repo, user, product_id, FORBIDDEN_EDIT)?;

    let updates = form.into_full_update()?;
    let updated = repo.update_product(product_id, &updates)?;
    Ok(updated.into())
}

/// Applies a partial update to a product. Author-only.
pub fn patch_product<R>(
    repo: &R,
    user: &AuthenticatedUser,
    product_id: i32,
    form: PatchProductForm,
) -> ServiceResult<ProductDetail>
where
    R: ProductReader + ProductWriter + ?Sized,
{
    authorize_author(repo, user, product_id, FORBIDDEN_EDIT)?;

    let updates = form.into_partial_update()?;
    let updated = repo.update_product(product_id, &updates)?;
    Ok(updated.into())
}

/// Deletes a product together with its comments. Author-only.
pub fn delete_product<R>(
    repo: &R,
    user: &AuthenticatedUser,
    product_id: i32,
) -> ServiceResult<()>
where
    R: ProductReader + ProductWriter + ?Sized,
{
    authorize_author(repo, user, product_id, FORBIDDEN_DELETE)?;

    repo.delete_product(product_id)?;
    Ok(())
}

fn authorize_author<R>(
    repo: &R,
    user: &AuthenticatedUser,
    product_id: i32,
    message: &str,
) -> ServiceResult<()>
where
    R: ProductReader + ?Sized,
{
    let product = repo
        .get_product_by_id(product_id)?
        .ok_or(ServiceError::NotFound)?;

    if product.author_id != user.sub {
        return Err(ServiceError::Forbidden(message.to_string()));
    }

    Ok(())
}
