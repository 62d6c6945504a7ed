use std::sync::{atomic::{AtomicU64, Ordering}, Arc};

use jsonwebtoken::{encode, Header, decode, Validation, TokenData, Algorithm};
use chrono::{Utc, Duration};
use crate::auth::revocation::RevocationList;
use crate::entities::token::{Claims, RefreshClaims};
use crate::entities::user::User;
use crate::repositories::token::TokenServiceRepository;
use crate::settings::{AppConfig, JwtKeys};
use crate::errors::AuthError;

const JWT_ALGORITHM: Algorithm = Algorithm::HS512;

static TOKEN_SEQ: AtomicU64 = AtomicU64::new(0);

/// Unique per issued token, so two tokens minted in the same second for
/// the same user never collide in the revocation list.
fn next_token_id() -> String {
    let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default();
    let seq = TOKEN_SEQ.fetch_add(1, Ordering::Relaxed);
    format!("{:x}-{:x}", nanos, seq)
}


#[derive(Clone)]
pub struct JwtService {
    keys: JwtKeys,
    access_expiration: Duration,
    refresh_expiration: Duration,
    revoked: Arc<RevocationList>,
}

impl JwtService {
    pub fn new(config: &AppConfig) -> Self {
        JwtService {
            keys: JwtKeys::from(config),
            access_expiration: Duration::minutes(config.jwt_expiration_minutes),
            refresh_expiration: Duration::days(config.refresh_token_exp_days),
            revoked: Arc::new(RevocationList::new()),
        }
    }

    pub fn revocation_list(&self) -> Arc<RevocationList> {
        self.revoked.clone()
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(JWT_ALGORITHM);
        validation.validate_exp = true;
        validation
    }
}

impl TokenServiceRepository for JwtService {
    fn create_jwt(&self, user: &User) -> Result<String, AuthError> {
        let now = Utc::now();
        let exp = (now + self.access_expiration).timestamp() as usize;

        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            admin: user.is_admin,
            exp,
            iat: now.timestamp() as usize,
            jti: next_token_id(),
        };

        encode(&Header::new(JWT_ALGORITHM), &claims, &self.keys.encoding).map_err(AuthError::from)
    }

    fn create_refresh_jwt(&self, user_id: i64) -> Result<String, AuthError> {
        let now = Utc::now();
        let exp = (now + self.refresh_expiration).timestamp() as usize;

        let claims = RefreshClaims {
            sub: user_id.to_string(),
            exp,
            iat: now.timestamp() as usize,
            jti: next_token_id(),
        };

        encode(&Header::new(JWT_ALGORITHM), &claims, &self.keys.refresh_encoding).map_err(AuthError::from)
    }

    fn decode_jwt(&self, token: &str) -> Result<TokenData<Claims>, AuthError> {
        if self.is_revoked(token) {
            return Err(AuthError::TokenRevoked);
        }
        decode::<Claims>(token, &self.keys.decoding, &Self::validation())
            .map_err(AuthError::from)
    }

    fn decode_refresh_jwt(&self, token: &str) -> Result<TokenData<RefreshClaims>, AuthError> {
        if self.is_revoked(token) {
            return Err(AuthError::TokenRevoked);
        }
        decode::<RefreshClaims>(token, &self.keys.refresh_decoding, &Self::validation())
            .map_err(AuthError::from)
    }

    fn revoke(&self, token: &str, expires_at: usize) -> bool {
        self.revoked.revoke(token, expires_at)
    }

    fn is_revoked(&self, token: &str) -> bool {
        self.revoked.contains(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{AppEnvironment, FilterOptions, StoreKind};

    fn config() -> AppConfig {
        AppConfig {
            env: AppEnvironment::Testing,
            name: "Portal".into(),
            port: 0,
            host: "127.0.0.1".into(),
            worker_count: 1,
            store: StoreKind::Memory,
            database_url: String::new(),
            cors_allowed_origins: vec![],
            jwt_secret: "a".repeat(48),
            jwt_expiration_minutes: 15,
            refresh_token_secret: "b".repeat(48),
            refresh_token_exp_days: 1,
            admin_email: "admin@portal.com".into(),
            admin_password: String::new(),
            seed_sample_data: false,
            contact_rate_limit_per_hour: 5,
            trust_x_forwarded_for: false,
            filter_options: FilterOptions::default(),
        }
    }

    fn admin() -> User {
        User {
            id: 7,
            email: "admin@portal.com".into(),
            password_hash: String::new(),
            is_admin: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn access_token_round_trips_claims() {
        let service = JwtService::new(&config());
        let token = service.create_jwt(&admin()).unwrap();
        let claims = service.decode_jwt(&token).unwrap().claims;
        assert_eq!(claims.sub, "7");
        assert!(claims.admin);
    }

    #[test]
    fn refresh_token_is_not_an_access_token() {
        let service = JwtService::new(&config());
        let refresh = service.create_refresh_jwt(7).unwrap();
        assert!(matches!(service.decode_jwt(&refresh), Err(AuthError::InvalidToken)));
        assert!(service.decode_refresh_jwt(&refresh).is_ok());
    }

    #[test]
    fn tokens_minted_together_differ() {
        let service = JwtService::new(&config());
        assert_ne!(service.create_jwt(&admin()).unwrap(), service.create_jwt(&admin()).unwrap());
    }

    #[test]
    fn revoked_tokens_are_rejected() {
        let service = JwtService::new(&config());
        let token = service.create_jwt(&admin()).unwrap();
        let exp = service.decode_jwt(&token).unwrap().claims.exp;

        service.revoke(&token, exp);
        assert!(matches!(service.decode_jwt(&token), Err(AuthError::TokenRevoked)));
    }
}
