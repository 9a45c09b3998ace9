use actix_web::{get, put, web, HttpResponse, Responder};
use serde_json::json;

use crate::auth::AuthUser;
use crate::error::AppError;
use crate::models::user::ChangePasswordRequest;
use crate::services::UserService;

#[get("/{user_id}")]
pub async fn get_user(
    service: web::Data<UserService>,
    user_id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let user = service.get_user(user_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(user))
}

/// Change the caller's own password.
#[put("")]
pub async fn change_password(
    service: web::Data<UserService>,
    auth: AuthUser,
    body: web::Json<ChangePasswordRequest>,
) -> Result<impl Responder, AppError> {
    service.change_password(auth.id, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({"message": "password updated"})))
}
