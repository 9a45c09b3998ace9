use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::error::AppError;
use crate::models::user::UserRole;

/// The authenticated caller for the current request.
///
/// `AuthMiddleware` derives it from a verified bearer token and inserts it
/// into request extensions; handlers receive it through `FromRequest`. It is
/// read-only and lives only for the request's lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthUser {
    pub id: i64,
    pub email: String,
    pub role: UserRole,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

impl FromRequest for AuthUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<AuthUser>().cloned() {
            Some(user) => ready(Ok(user)),
            None => {
                // Reached only when a route forgot its AuthMiddleware wrap;
                // rejecting as unauthorized is the safe default.
                let err = AppError::Unauthorized("authentication required".to_string());
                ready(Err(err.into()))
            }
        }
    }
}
