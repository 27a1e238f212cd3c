// ptg-service/src/models/mod.rs
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;

pub mod viewed_teams;
pub use viewed_teams::*;

// Generic response bodies
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DefaultResponse {
    pub message: String,
}

impl Default for DefaultResponse {
    fn default() -> Self {
        Self {
            message: "Welcome to the PTG API".to_string(),
        }
    }
}

impl DefaultResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct VersionResponse {
    pub version: String,
}

// Custom error types
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceError {
    BadRequest(String),
    Validation(String),
    NotFound(String),
    Forbidden,
    Storage(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ServiceError::BadRequest(msg) => write!(f, "{}", msg),
            ServiceError::Validation(msg) => write!(f, "{}", msg),
            ServiceError::NotFound(msg) => write!(f, "{}", msg),
            ServiceError::Forbidden => write!(f, "Unable to validate API key"),
            ServiceError::Storage(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ServiceError {}

impl From<sqlx::Error> for ServiceError {
    fn from(err: sqlx::Error) -> Self {
        ServiceError::Storage(err.to_string())
    }
}

// Every error leaves the service as {"message": "..."}
impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Forbidden => StatusCode::FORBIDDEN,
            ServiceError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "message": self.to_string() }))
    }
}
