// src/lib.rs
use actix_web::error::JsonPayloadError;
use actix_web::web;

pub mod config;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

#[cfg(test)]
mod tests;

use models::ServiceError;
use routes::{status_routes, viewed_team_routes};

// Routes plus the JSON body error handler; app data is registered by the caller
pub fn configure_app(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default().error_handler(|err, _req| json_payload_error(err).into()),
    )
    .configure(status_routes::init_routes)
    .configure(viewed_team_routes::init_routes);
}

// Well-formed JSON of the wrong shape is a validation failure; anything else is a bad request
fn json_payload_error(err: JsonPayloadError) -> ServiceError {
    match err {
        JsonPayloadError::Deserialize(ref e) if e.is_data() => {
            ServiceError::Validation(err.to_string())
        }
        _ => ServiceError::BadRequest(err.to_string()),
    }
}
