//! Admin-only handlers. The `/admin` scope is wrapped by `AuthMiddleware`,
//! `RequireAdmin`, and `AdminAccessLog`, so by the time these run the caller
//! is a verified administrator and the access has been logged.

use actix_web::{delete, patch, web, HttpResponse, Responder};
use serde_json::json;

use crate::error::AppError;
use crate::models::user::ChangeRoleRequest;
use crate::services::{CommentService, UserService};

/// Remove any comment by id. Idempotent: deleting a comment that is already
/// gone still succeeds.
#[delete("/comments/{comment_id}")]
pub async fn delete_comment(
    service: web::Data<CommentService>,
    comment_id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    service.delete_comment(comment_id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Change a user's role. Takes effect on tokens issued afterwards.
#[patch("/users/{user_id}")]
pub async fn change_role(
    service: web::Data<UserService>,
    user_id: web::Path<i64>,
    body: web::Json<ChangeRoleRequest>,
) -> Result<impl Responder, AppError> {
    service.change_role(user_id.into_inner(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({"message": "role updated"})))
}
