use actix_web::{HttpResponse, Responder, post, web};
use serde_json::json;

use crate::config::ServerConfig;
use crate::forms::auth::{LoginForm, RegisterForm};
use crate::repository::DieselRepository;
use crate::routes::conflict;
use crate::services::{ServiceError, auth};

#[post("/auth/register")]
pub async fn register(
    repo: web::Data<DieselRepository>,
    form: web::Json<RegisterForm>,
) -> impl Responder {
    match auth::register_user(repo.get_ref(), form.into_inner()) {
        Ok(view) => HttpResponse::Created().json(view),
        Err(ServiceError::Conflict) => conflict("A user with this email already exists."),
        Err(ServiceError::Validation(errors)) => HttpResponse::BadRequest().json(errors),
        Err(err) => {
            log::error!("Failed to register user: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/auth/login")]
pub async fn login(
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
    form: web::Json<LoginForm>,
) -> impl Responder {
    match auth::login_user(repo.get_ref(), &config.secret, form.into_inner()) {
        Ok(token) => HttpResponse::Ok().json(json!({ "token": token })),
        Err(ServiceError::Unauthorized) => {
            HttpResponse::Unauthorized().json(json!({ "detail": "Invalid email or password." }))
        }
        Err(ServiceError::Validation(errors)) => HttpResponse::BadRequest().json(errors),
        Err(err) => {
            log::error!("Failed to log user in: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
