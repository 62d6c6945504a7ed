use actix_web::{get, post, web, HttpRequest, HttpResponse, Responder};
use tracing::instrument;

use crate::entities::token::RefreshTokenRequest;
use crate::entities::user::{LoginUser, LogoutRequest};
use crate::errors::{AppError, AuthError};
use crate::middlewares::auth::bearer_token;
use crate::use_cases::extractors::{AdminClaims, AuthClaims};
use crate::AppState;

#[post("/login")]
#[instrument(skip(state, user))]
pub async fn login(
    state: web::Data<AppState>,
    user: web::Json<LoginUser>
) -> Result<impl Responder, AuthError> {
    let auth_response = state.auth_handler.login(user.into_inner()).await?;
    Ok(HttpResponse::Ok().json(auth_response))
}

#[post("/refresh-token")]
#[instrument(skip(state, request))]
pub async fn refresh_token(
    state: web::Data<AppState>,
    request: web::Json<RefreshTokenRequest>,
) -> Result<impl Responder, AuthError> {
    let auth_response = state.auth_handler.refresh_token(&request.refresh_token).await?;
    Ok(HttpResponse::Ok().json(auth_response))
}

#[post("/logout")]
#[instrument(skip(_claims, request, state, body))]
pub async fn logout(
    _claims: AuthClaims,
    request: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<LogoutRequest>
) -> Result<impl Responder, AuthError> {
    let access_token = bearer_token(request.headers())
        .ok_or(AuthError::MissingCredentials)?;

    state.auth_handler.logout(&access_token, &body.refresh_token)?;
    Ok(HttpResponse::Ok().json(serde_json::json!({"message": "Logged out successfully"})))
}

#[get("/me")]
#[instrument(skip(claims, state))]
pub async fn me(
    claims: AuthClaims,
    state: web::Data<AppState>
) -> Result<impl Responder, AppError> {
    let user = state.auth_handler.me(&claims.0).await?;
    Ok(HttpResponse::Ok().json(user))
}

#[get("/dashboard")]
#[instrument(skip(_admin, state))]
pub async fn admin_dashboard(
    _admin: AdminClaims,
    state: web::Data<AppState>
) -> Result<impl Responder, AppError> {
    let stats = state.dashboard_handler.stats().await?;
    Ok(HttpResponse::Ok().json(stats))
}
