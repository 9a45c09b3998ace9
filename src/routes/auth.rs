use actix_web::{post, web, HttpResponse, Responder};

use crate::auth::AuthService;
use crate::error::AppError;
use crate::models::user::{SigninRequest, SignupRequest};

/// Register a new account.
///
/// Returns a bearer token for the freshly created user. Field checks (empty
/// email, duplicate email, unknown role) happen inside the service so that
/// the check order is the documented one.
#[post("/signup")]
pub async fn signup(
    auth_service: web::Data<AuthService>,
    body: web::Json<SignupRequest>,
) -> Result<impl Responder, AppError> {
    let response = auth_service.signup(body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// Exchange credentials for a bearer token.
#[post("/signin")]
pub async fn signin(
    auth_service: web::Data<AuthService>,
    body: web::Json<SigninRequest>,
) -> Result<impl Responder, AppError> {
    let response = auth_service.signin(body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}
