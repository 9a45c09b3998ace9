use actix_web::{get, post, web, HttpResponse, Responder};
use validator::Validate;

use crate::auth::AuthUser;
use crate::error::AppError;
use crate::models::comment::CommentSaveRequest;
use crate::services::CommentService;

#[post("/{task_id}/comments")]
pub async fn create_comment(
    service: web::Data<CommentService>,
    auth: AuthUser,
    task_id: web::Path<i64>,
    body: web::Json<CommentSaveRequest>,
) -> Result<impl Responder, AppError> {
    body.validate()?;
    let response = service
        .save_comment(&auth, task_id.into_inner(), body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/{task_id}/comments")]
pub async fn list_comments(
    service: web::Data<CommentService>,
    task_id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let comments = service.get_comments(task_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(comments))
}
