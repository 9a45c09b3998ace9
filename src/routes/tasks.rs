use actix_web::{get, post, web, HttpResponse, Responder};
use validator::Validate;

use crate::auth::AuthUser;
use crate::error::AppError;
use crate::models::task::{PageQuery, TaskSaveRequest};
use crate::services::TaskService;

/// Create a task owned by the caller.
///
/// ## Responses:
/// - `200 OK`: the created task, with the owner and today's weather embedded.
/// - `400 Bad Request`: empty title or contents.
/// - `401 Unauthorized`: missing or invalid bearer token.
/// - `500 Internal Server Error`: weather upstream or database failure.
#[post("")]
pub async fn create_task(
    service: web::Data<TaskService>,
    auth: AuthUser,
    body: web::Json<TaskSaveRequest>,
) -> Result<impl Responder, AppError> {
    body.validate()?;
    let response = service.save_task(&auth, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// List tasks, newest modification first.
///
/// ## Query Parameters:
/// - `page` (optional): 1-based page number, clamped to at least 1.
/// - `size` (optional): page size, default 10.
#[get("")]
pub async fn list_tasks(
    service: web::Data<TaskService>,
    query: web::Query<PageQuery>,
) -> Result<impl Responder, AppError> {
    let page = service.get_tasks(query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(page))
}

/// Fetch a single task by id.
#[get("/{task_id}")]
pub async fn get_task(
    service: web::Data<TaskService>,
    task_id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let response = service.get_task(task_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}
