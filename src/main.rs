use std::env;

use actix_web::{App, HttpResponse, HttpServer, error::InternalError, middleware, web};
use dotenvy::dotenv;
use serde_json::json;

use product_board::config::ServerConfig;
use product_board::db::establish_connection_pool;
use product_board::repository::DieselRepository;
use product_board::routes::auth::{login, register};
use product_board::routes::comments::{create_comment, list_comments, toggle_comment_like};
use product_board::routes::products::{
    create_product, delete_product, list_products, patch_product, product_detail, replace_product,
};
use product_board::view_limiter::ViewLimiter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok(); // Load .env file

    let database_url = env::var("DATABASE_URL").unwrap_or("app.db".to_string());
    let port = env::var("PORT").unwrap_or("8080".to_string());
    let port = port.parse::<u16>().unwrap_or(8080);
    let address = env::var("ADDRESS").unwrap_or("127.0.0.1".to_string());

    let secret = match env::var("SECRET_KEY") {
        Ok(secret) => secret,
        Err(_) => {
            log::error!("SECRET_KEY environment variable not set");
            std::process::exit(1);
        }
    };

    let config = ServerConfig { secret };

    let pool = match establish_connection_pool(&database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };
    let repo = DieselRepository::new(pool);
    let limiter = ViewLimiter::default();

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                let body = json!({ "detail": err.to_string() });
                InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
            }))
            .service(register)
            .service(login)
            .service(list_products)
            .service(create_product)
            .service(product_detail)
            .service(replace_product)
            .service(patch_product)
            .service(delete_product)
            .service(list_comments)
            .service(create_comment)
            .service(toggle_comment_like)
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(config.clone()))
            .app_data(web::Data::new(limiter.clone()))
    })
    .bind((address, port))?
    .run()
    .await
}
