use actix_web::{get, web, App, HttpResponse, HttpServer, Responder};
use tracing::info;
use tracing_subscriber::EnvFilter;

pub mod auth;
pub mod cache;
pub mod client;
pub mod db;
pub mod error;
pub mod models;
pub mod secrets;
pub mod suggest;
pub mod validation;

use secrets::SECRETS;

#[macro_export]
macro_rules! error_response {
    ($status_code:expr, $message:expr) => {
        HttpResponse::build(actix_web::http::StatusCode::from_u16($status_code).unwrap())
            .json(serde_json::json!({ "message": $message }))
    };
}

#[get("/")]
async fn index() -> impl Responder {
    HttpResponse::Ok().body("Feed-Ghost API")
}

pub async fn start_server() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let bind_addr = SECRETS
        .get("BIND_ADDR")
        .cloned()
        .unwrap_or_else(|| "127.0.0.1:8080".to_string());

    info!("Binding to {bind_addr}");

    HttpServer::new(|| {
        App::new()
            .service(
                web::scope("/auth")
                    .service(auth::register)
                    .service(auth::login)
                    .service(auth::check_username)
                    .service(auth::session::session)
                    .service(auth::session::sign_out),
            )
            .service(web::scope("/api").service(suggest::suggest_messages))
            .service(index)
    })
    .bind(&bind_addr)?
    .run()
    .await
}
