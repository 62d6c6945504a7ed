use actix_web::{dev::Payload, FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{ready, Ready};
use crate::{entities::token::Claims, errors::AuthError};

fn claims_of(req: &HttpRequest) -> Option<Claims> {
    req.extensions().get::<Claims>().cloned()
}

/// Claims of any authenticated caller, as placed by `AuthMiddleware`.
/// Returns 401 if the request carried no valid token.
#[derive(Debug)]
pub struct AuthClaims(pub Claims);

impl FromRequest for AuthClaims {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            claims_of(req)
                .map(AuthClaims)
                .ok_or_else(|| AuthError::MissingCredentials.into()),
        )
    }
}

/// Claims of an admin caller.
/// Returns 403 for authenticated non-admins and 401 when unauthenticated.
#[derive(Debug)]
pub struct AdminClaims(pub Claims);

impl FromRequest for AdminClaims {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = match claims_of(req) {
            Some(claims) if claims.admin => Ok(AdminClaims(claims)),
            Some(_) => Err(AuthError::Forbidden("Admin access required".into()).into()),
            None => Err(AuthError::MissingCredentials.into()),
        };
        ready(result)
    }
}
