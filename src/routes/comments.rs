use actix_web::{HttpResponse, Responder, get, post, web};
use serde_json::json;

use crate::auth::AuthenticatedUser;
use crate::forms::comments::CommentForm;
use crate::repository::DieselRepository;
use crate::routes::{bad_request, not_found};
use crate::services::{ServiceError, comments};

#[get("/products/{product_id}/comments")]
pub async fn list_comments(
    viewer: Option<AuthenticatedUser>,
    repo: web::Data<DieselRepository>,
    path: web::Path<i32>,
) -> impl Responder {
    let product_id = path.into_inner();

    match comments::list_comments(repo.get_ref(), viewer.as_ref(), product_id) {
        Ok(views) => HttpResponse::Ok().json(views),
        Err(ServiceError::NotFound) => not_found(),
        Err(err) => {
            log::error!("Failed to list comments for product {product_id}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/products/{product_id}/comments")]
pub async fn create_comment(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    path: web::Path<i32>,
    form: web::Json<CommentForm>,
) -> impl Responder {
    let product_id = path.into_inner();

    match comments::create_comment(repo.get_ref(), &user, product_id, form.into_inner()) {
        Ok(view) => HttpResponse::Created().json(view),
        Err(ServiceError::NotFound) => not_found(),
        Err(ServiceError::Validation(errors)) => HttpResponse::BadRequest().json(errors),
        Err(ServiceError::Form(message)) => bad_request(&message),
        Err(err) => {
            log::error!("Failed to create comment on product {product_id}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/products/{product_id}/comments/{comment_id}/like")]
pub async fn toggle_comment_like(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    path: web::Path<(i32, i32)>,
) -> impl Responder {
    let (product_id, comment_id) = path.into_inner();

    match comments::toggle_like(repo.get_ref(), &user, product_id, comment_id) {
        Ok(data) => {
            let message = if data.liked {
                "Comment liked."
            } else {
                "Comment like removed."
            };
            HttpResponse::Ok().json(json!({
                "message": message,
                "comment": data.comment,
            }))
        }
        Err(ServiceError::NotFound) => not_found(),
        Err(err) => {
            log::error!("Failed to toggle like on comment {comment_id}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
