use std::sync::Arc;

use validator::Validate;

use crate::entities::token::{AuthResponse, Claims};
use crate::entities::user::{LoginUser, PublicUser, User, UserInsert};
use crate::errors::{AppError, AuthError};
use crate::interfaces::repositories::user::UserRepository;
use crate::auth::password::{hash_password, verify_password};
use crate::domain::password::validate_password_strength;
use crate::repositories::token::TokenServiceRepository;

pub struct AuthHandler<R, T>
where
    R: UserRepository + ?Sized,
    T: TokenServiceRepository,
{
    pub user_repo: Arc<R>,
    pub token_service: T,
}

impl<R, T> AuthHandler<R, T>
where
    R: UserRepository + ?Sized,
    T: TokenServiceRepository,
{
    pub fn new(user_repo: Arc<R>, token_service: T) -> Self {
        AuthHandler {
            user_repo,
            token_service
        }
    }

    /// Creates the admin account if it does not exist yet. The password must
    /// pass the strength check; an existing account is left untouched.
    pub async fn ensure_admin(&self, email: &str, password: &str) -> Result<bool, AppError> {
        if self.user_repo.get_user_by_email(email).await?.is_some() {
            return Ok(false);
        }

        validate_password_strength(password).map_err(|e| {
            let reason = e.message.map(|m| m.to_string()).unwrap_or_default();
            AppError::InvalidInput(format!("Admin password rejected: {}", reason))
        })?;

        let insert = UserInsert {
            email: email.to_string(),
            password_hash: hash_password(password)?,
            is_admin: true,
        };
        self.user_repo.create_user(&insert).await?;

        tracing::info!(email, "Admin account created");
        Ok(true)
    }

    /// Logs in a user by validating credentials and generating JWTs
    pub async fn login(&self, request: LoginUser) -> Result<AuthResponse, AuthError> {
        request.validate()?;

        let user = self.user_repo.get_user_by_email(&request.email)
            .await
            .map_err(|_e| AuthError::WrongCredentials)?
            .ok_or(AuthError::WrongCredentials)?;

        let is_password_valid = verify_password(&request.password, &user.password_hash)
            .map_err(|_| AuthError::WrongCredentials)?;
        if !is_password_valid {
            tracing::warn!("Failed login attempt");
            return Err(AuthError::WrongCredentials);
        }

        let response = self.create_auth_response(&user)?;

        tracing::info!(user_id = user.id, "User logged in successfully");
        Ok(response)
    }

    /// Create auth response
    pub fn create_auth_response(&self, user: &User) -> Result<AuthResponse, AuthError> {
        let access_token = self.token_service.create_jwt(user)
            .map_err(|e| {
                tracing::warn!("Failed to create JWT: {}", e);
                AuthError::TokenCreation
            })?;

        let refresh_token = self.token_service.create_refresh_jwt(user.id)
            .map_err(|e| {
                tracing::warn!("Failed to create refresh JWT: {}", e);
                AuthError::TokenCreation
            })?;
        Ok(AuthResponse::new(access_token, refresh_token))
    }

    /// Exchanges a refresh token for a new token pair. The token is claimed
    /// before any await point, so concurrent redemptions get one pair at most.
    pub async fn refresh_token(&self, token: &str) -> Result<AuthResponse, AuthError> {
        let decoded = self.token_service.decode_refresh_jwt(token)?;
        let user_id = decoded.claims.sub.parse::<i64>()
            .map_err(|_| AuthError::InvalidUserId)?;

        if !self.token_service.revoke(token, decoded.claims.exp) {
            tracing::warn!(user_id, "Refresh token replayed");
            return Err(AuthError::TokenRevoked);
        }

        let user = self.user_repo.get_user_by_id(user_id)
            .await
            .map_err(|_| AuthError::WrongCredentials)?
            .ok_or(AuthError::WrongCredentials)?;

        self.create_auth_response(&user)
    }

    /// Revokes both tokens until they expire
    pub fn logout(&self, access_token: &str, refresh_token: &str) -> Result<(), AuthError> {
        let access = self.token_service.decode_jwt(access_token)?;
        let refresh = self.token_service.decode_refresh_jwt(refresh_token)?;

        if access.claims.sub != refresh.claims.sub {
            return Err(AuthError::InvalidToken);
        }

        self.token_service.revoke(access_token, access.claims.exp);
        self.token_service.revoke(refresh_token, refresh.claims.exp);

        tracing::info!(user_id = %access.claims.sub, "User logged out");
        Ok(())
    }

    /// Profile of the authenticated user
    pub async fn me(&self, claims: &Claims) -> Result<PublicUser, AppError> {
        let user_id = claims.sub.parse::<i64>()
            .map_err(|_| AppError::UnauthorizedAccess)?;

        self.user_repo.get_user_by_id(user_id)
            .await?
            .map(PublicUser::from)
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }
}
