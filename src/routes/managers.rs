use actix_web::{delete, get, post, web, HttpResponse, Responder};

use crate::auth::AuthUser;
use crate::error::AppError;
use crate::models::manager::AssignManagerRequest;
use crate::services::ManagerService;

/// Assign another user as a manager of the task. Only the task's creator may
/// do this, and not for themselves.
#[post("/{task_id}/managers")]
pub async fn assign_manager(
    service: web::Data<ManagerService>,
    auth: AuthUser,
    task_id: web::Path<i64>,
    body: web::Json<AssignManagerRequest>,
) -> Result<impl Responder, AppError> {
    let response = service
        .save_manager(&auth, task_id.into_inner(), body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/{task_id}/managers")]
pub async fn list_managers(
    service: web::Data<ManagerService>,
    task_id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let managers = service.get_managers(task_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(managers))
}

/// Remove a manager assignment. The manager record must belong to the task
/// named in the path.
#[delete("/{task_id}/managers/{manager_id}")]
pub async fn remove_manager(
    service: web::Data<ManagerService>,
    auth: AuthUser,
    path: web::Path<(i64, i64)>,
) -> Result<impl Responder, AppError> {
    let (task_id, manager_id) = path.into_inner();
    service.delete_manager(&auth, task_id, manager_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
