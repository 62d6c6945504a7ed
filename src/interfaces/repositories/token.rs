use jsonwebtoken::TokenData;
use crate::{entities::{token::{Claims, RefreshClaims}, user::User}, errors::AuthError};



pub trait TokenServiceRepository: Send + Sync {
    /// Creates a new JWT for the user
    fn create_jwt(&self, user: &User) -> Result<String, AuthError>;

    /// Creates a new refresh JWT for the user
    fn create_refresh_jwt(&self, user_id: i64) -> Result<String, AuthError>;

    /// Decodes a JWT and returns the claims, rejecting revoked tokens
    fn decode_jwt(&self, token: &str) -> Result<TokenData<Claims>, AuthError>;

    /// Decodes a refresh JWT and returns the claims, rejecting revoked tokens
    fn decode_refresh_jwt(&self, token: &str) -> Result<TokenData<RefreshClaims>, AuthError>;

    /// Revokes a token until its own expiry (unix seconds). Returns `false`
    /// if it was already revoked.
    fn revoke(&self, token: &str, expires_at: usize) -> bool;

    /// Checks if a JWT is revoked
    fn is_revoked(&self, token: &str) -> bool;
}
