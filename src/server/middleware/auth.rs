//! Authentication middleware
//!
//! Every non-public route requires a valid bearer token. Verified claims are
//! attached to the request for handlers to read; role gates are enforced
//! per-endpoint in the handlers. Rejections short-circuit with the uniform
//! error envelope.

use crate::server::middleware::helpers::{extract_bearer_token, is_public_route};
use crate::server::AppState;
use crate::utils::error::HmsError;
use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::Method;
use actix_web::{web, HttpMessage, ResponseError};
use futures::future::{ready, Ready};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use tracing::warn;

/// Auth middleware for Actix-web
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

/// Service implementation for auth middleware
pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        // CORS preflight never carries credentials
        if req.method() == Method::OPTIONS || is_public_route(req.path()) {
            return Box::pin(async move {
                service.call(req).await.map(|res| res.map_into_left_body())
            });
        }

        let token = extract_bearer_token(req.headers());
        let state = req.app_data::<web::Data<AppState>>().cloned();

        Box::pin(async move {
            let state = match state {
                Some(state) => state,
                None => {
                    return deny(req, HmsError::internal("Application state not configured"))
                }
            };

            let token = match token {
                Some(token) => token,
                None => return deny(req, HmsError::unauthorized("Missing bearer token")),
            };

            match state.auth.validate_token(&token) {
                Ok(claims) => {
                    req.extensions_mut().insert(claims);
                    service.call(req).await.map(|res| res.map_into_left_body())
                }
                Err(e) => {
                    warn!("Token validation failed: {}", e);
                    deny(req, HmsError::unauthorized("Invalid or expired token"))
                }
            }
        })
    }
}

/// Short-circuit the request with the error envelope
fn deny<B>(
    req: ServiceRequest,
    err: HmsError,
) -> Result<ServiceResponse<EitherBody<B>>, actix_web::Error> {
    let (req, _payload) = req.into_parts();
    let res = err.error_response().map_into_right_body();
    Ok(ServiceResponse::new(req, res))
}
