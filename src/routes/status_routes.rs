// src/routes/status_routes.rs
use crate::config::Config;
use crate::models::{DefaultResponse, VersionResponse};
use actix_web::{get, web, HttpResponse, Responder};

// Welcome message at the root path
#[get("/")]
async fn index() -> impl Responder {
    HttpResponse::Ok().json(DefaultResponse::default())
}

// Health check, the only route that skips API key validation
#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().finish()
}

// Current API version
#[get("/status")]
async fn status(config: web::Data<Config>) -> impl Responder {
    HttpResponse::Ok().json(VersionResponse {
        version: config.app_version.clone(),
    })
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(index).service(health).service(status);
}
