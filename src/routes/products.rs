use actix_web::{HttpRequest, HttpResponse, Responder, delete, get, patch, post, put, web};

use crate::auth::AuthenticatedUser;
use crate::forms::products::{PatchProductForm, ProductForm};
use crate::repository::DieselRepository;
use crate::routes::{bad_request, forbidden, not_found};
use crate::services::{ServiceError, products};
use crate::view_limiter::ViewLimiter;

#[get("/products")]
pub async fn list_products(repo: web::Data<DieselRepository>) -> impl Responder {
    match products::list_products(repo.get_ref()) {
        Ok(items) => HttpResponse::Ok().json(items),
        Err(err) => {
            log::error!("Failed to list products: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/products")]
pub async fn create_product(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<ProductForm>,
) -> impl Responder {
    match products::create_product(repo.get_ref(), &user, form.into_inner()) {
        Ok(detail) => HttpResponse::Created().json(detail),
        Err(ServiceError::Validation(errors)) => HttpResponse::BadRequest().json(errors),
        Err(ServiceError::Form(message)) => bad_request(&message),
        Err(err) => {
            log::error!("Failed to create product: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/products/{product_id}")]
pub async fn product_detail(
    req: HttpRequest,
    viewer: Option<AuthenticatedUser>,
    repo: web::Data<DieselRepository>,
    limiter: web::Data<ViewLimiter>,
    path: web::Path<i32>,
) -> impl Responder {
    let product_id = path.into_inner();
    let connection_info = req.connection_info();
    let client_addr = connection_info.realip_remote_addr().unwrap_or("unknown");

    match products::product_detail(
        repo.get_ref(),
        viewer.as_ref(),
        client_addr,
        limiter.get_ref(),
        product_id,
    ) {
        Ok(detail) => HttpResponse::Ok().json(detail),
        Err(ServiceError::NotFound) => not_found(),
        Err(err) => {
            log::error!("Failed to load product {product_id}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[put("/products/{product_id}")]
pub async fn replace_product(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    path: web::Path<i32>,
    form: web::Json<ProductForm>,
) -> impl Responder {
    let product_id = path.into_inner();

    match products::replace_product(repo.get_ref(), &user, product_id, form.into_inner()) {
        Ok(detail) => HttpResponse::Ok().json(detail),
        Err(ServiceError::NotFound) => not_found(),
        Err(ServiceError::Forbidden(message)) => forbidden(&message),
        Err(ServiceError::Validation(errors)) => HttpResponse::BadRequest().json(errors),
        Err(ServiceError::Form(message)) => bad_request(&message),
        Err(err) => {
            log::error!("Failed to update product {product_id}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[patch("/products/{product_id}")]
pub async fn patch_product(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    path: web::Path<i32>,
    form: web::Json<PatchProductForm>,
) -> impl Responder {
    let product_id = path.into_inner();

    match products::patch_product(repo.get_ref(), &user, product_id, form.into_inner()) {
        Ok(detail) => HttpResponse::Ok().json(detail),
        Err(ServiceError::NotFound) => not_found(),
        Err(ServiceError::Forbidden(message)) => forbidden(&message),
        Err(ServiceError::Validation(errors)) => HttpResponse::BadRequest().json(errors),
        Err(ServiceError::Form(message)) => bad_request(&message),
        Err(err) => {
            log::error!("Failed to patch product {product_id}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[delete("/products/{product_id}")]
pub async fn delete_product(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    path: web::Path<i32>,
) -> impl Responder {
    let product_id = path.into_inner();

    match products::delete_product(repo.get_ref(), &user, product_id) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(ServiceError::NotFound) => not_found(),
        Err(ServiceError::Forbidden(message)) => forbidden(&message),
        Err(err) => {
            log::error!("Failed to delete product {product_id}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
