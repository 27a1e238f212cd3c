// ptg-service/src/utils/mod.rs
use crate::config::Config;
use crate::models::ServiceError;
use actix_web::{dev::ServiceRequest, web, Error};

pub mod db;
pub mod queries;
pub mod team_storage;
pub mod user_lock;
pub mod viewed_teams_storage;

// Email address checks
pub mod email {
    use lazy_static::lazy_static;
    use regex::Regex;

    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(concat!(
            r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+",
            r"@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?",
            r"(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)+$",
        ))
        .unwrap();
    }

    pub fn is_valid(email: &str) -> bool {
        EMAIL_RE.is_match(email)
    }
}

// Middleware checking the X-API-Key header on every route except /health
pub mod api_key_middleware {
    use super::*;
    use actix_web::body::EitherBody;
    use actix_web::dev::{forward_ready, Service, ServiceResponse, Transform};
    use futures::future::{ok, Ready};
    use log::warn;
    use std::future::Future;
    use std::pin::Pin;

    pub const API_KEY_HEADER: &str = "X-API-Key";
    const UNPROTECTED_PATHS: &[&str] = &["/health"];

    pub struct ApiKeyAuth;

    impl<S, B> Transform<S, ServiceRequest> for ApiKeyAuth
    where
        S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
        S::Future: 'static,
        B: 'static,
    {
        type Response = ServiceResponse<EitherBody<B>>;
        type Error = Error;
        type Transform = ApiKeyAuthMiddleware<S>;
        type InitError = ();
        type Future = Ready<Result<Self::Transform, Self::InitError>>;

        fn new_transform(&self, service: S) -> Self::Future {
            ok(ApiKeyAuthMiddleware { service })
        }
    }

    pub struct ApiKeyAuthMiddleware<S> {
        service: S,
    }

    impl<S, B> Service<ServiceRequest> for ApiKeyAuthMiddleware<S>
    where
        S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
        S::Future: 'static,
        B: 'static,
    {
        type Response = ServiceResponse<EitherBody<B>>;
        type Error = Error;
        type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

        forward_ready!(service);

        fn call(&self, req: ServiceRequest) -> Self::Future {
            if UNPROTECTED_PATHS.contains(&req.path()) || has_valid_key(&req) {
                let fut = self.service.call(req);
                return Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) });
            }

            warn!("🚫 Rejected request without a valid API key: {}", req.path());
            let (request, _) = req.into_parts();
            let response = actix_web::ResponseError::error_response(&ServiceError::Forbidden);
            Box::pin(async move {
                Ok(ServiceResponse::new(request, response).map_into_right_body())
            })
        }
    }

    fn has_valid_key(req: &ServiceRequest) -> bool {
        let expected = match req.app_data::<web::Data<Config>>() {
            Some(config) => config.api_key.clone(),
            None => return false,
        };

        req.headers()
            .get(API_KEY_HEADER)
            .and_then(|value| value.to_str().ok())
            .map_or(false, |key| key == expected)
    }
}
