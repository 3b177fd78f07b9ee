use actix_web::HttpResponse;
use serde_json::json;

pub mod auth;
pub mod comments;
pub mod products;

pub(crate) fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(json!({ "detail": "Not found." }))
}

pub(crate) fn forbidden(message: &str) -> HttpResponse {
    HttpResponse::Forbidden().json(json!({ "error": message }))
}

pub(crate) fn bad_request(message: &str) -> HttpResponse {
    HttpResponse::BadRequest().json(json!({ "error": message }))
}

pub(crate) fn conflict(message: &str) -> HttpResponse {
    HttpResponse::Conflict().json(json!({ "error": message }))
}
