use actix_web::{
    body::BoxBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::{header::HeaderMap, Method, StatusCode},
    web, Error, HttpMessage,
};
use futures_util::future::{ok, Ready, LocalBoxFuture};
use std::{rc::Rc, task::{Context, Poll}};

use crate::{
    entities::token::Claims,
    errors::AuthError,
    handlers::json_error::json_error,
    repositories::token::TokenServiceRepository,
    AppState,
};

const ADMIN_PREFIX: &str = "/api/v1/admin";

pub struct AuthMiddleware;

impl<S> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AuthMiddlewareService {
            service: Rc::new(service),
        })
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            if is_public_route(req.path(), req.method()) {
                return service.call(req).await;
            }

            let claims = match get_valid_claims(&req) {
                Ok(claims) => claims,
                Err(AuthError::MissingJwtService) => {
                    tracing::error!("AppState missing in middleware");
                    return Ok(req.into_response(
                        json_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
                    ));
                }
                Err(e) => {
                    tracing::warn!(path = %req.path(), "Rejected request: {}", e);
                    return Ok(req.into_response(
                        json_error(StatusCode::UNAUTHORIZED, &e.to_string())
                    ));
                }
            };

            if requires_admin(req.path()) && !claims.admin {
                tracing::warn!(path = %req.path(), user_id = %claims.sub, "Admin access required");
                return Ok(req.into_response(
                    json_error(StatusCode::FORBIDDEN, "Admin access required")
                ));
            }

            req.extensions_mut().insert(claims);
            service.call(req).await
        })
    }
}

/// Routes reachable without a token. Everything else needs a valid bearer token.
pub fn is_public_route(path: &str, method: &Method) -> bool {
    if *method == Method::OPTIONS {
        return true;
    }

    if *method == Method::GET
        && (path.starts_with("/api/v1/scholarships") || path.starts_with("/api/v1/pages/"))
    {
        return true;
    }

    matches!(
        (path, method.as_str()),
        ("/", "GET") |
        ("/api/v1/health", "GET") |
        ("/api/v1/home", "GET") |
        ("/api/v1/contact", "POST") |
        ("/api/v1/auth/login", "POST") |
        ("/api/v1/auth/refresh-token", "POST")
    )
}

fn requires_admin(path: &str) -> bool {
    path == ADMIN_PREFIX || path.starts_with(&format!("{}/", ADMIN_PREFIX))
}

/// Token from an `Authorization: Bearer <token>` header
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get("Authorization")
        .and_then(|header| header.to_str().ok())
        .and_then(|header| {
            let parts: Vec<&str> = header.split_whitespace().collect();
            if parts.len() == 2 && parts[0].eq_ignore_ascii_case("bearer") {
                Some(parts[1].to_string())
            } else {
                None
            }
        })
}

fn get_valid_claims(req: &ServiceRequest) -> Result<Claims, AuthError> {
    let state = req.app_data::<web::Data<AppState>>()
        .ok_or(AuthError::MissingJwtService)?;

    let token = bearer_token(req.headers()).ok_or(AuthError::MissingCredentials)?;
    let decoded = state.auth_handler.token_service.decode_jwt(&token)?;
    Ok(decoded.claims)
}
