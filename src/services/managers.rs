use std::sync::Arc;

use crate::auth::AuthUser;
use crate::error::AppError;
use crate::models::manager::{AssignManagerRequest, ManagerResponse};
use crate::models::task::Task;
use crate::models::user::UserSummary;
use crate::store::{ManagerStore, TaskStore, UserStore};

/// Assignment and removal of task managers (delegates).
///
/// Every mutation requires the caller to be the task's owner; the rules are
/// deterministic functions of the caller and the looked-up state, so callers
/// retrying a failed request get the same answer.
pub struct ManagerService {
    tasks: Arc<dyn TaskStore>,
    users: Arc<dyn UserStore>,
    managers: Arc<dyn ManagerStore>,
}

impl ManagerService {
    pub fn new(
        tasks: Arc<dyn TaskStore>,
        users: Arc<dyn UserStore>,
        managers: Arc<dyn ManagerStore>,
    ) -> Self {
        Self {
            tasks,
            users,
            managers,
        }
    }

    /// Loads the task and requires the caller to be its owner. A task with
    /// no owner at all (the owning account was deleted) fails the same
    /// check; this is the single site where that state is handled.
    async fn verified_owned_task(&self, auth: &AuthUser, task_id: i64) -> Result<Task, AppError> {
        let task = self
            .tasks
            .find_by_id(task_id)
            .await?
            .ok_or_else(|| AppError::InvalidRequest("task not found".to_string()))?;
        match task.owner_id {
            Some(owner_id) if owner_id == auth.id => Ok(task),
            _ => Err(AppError::InvalidRequest(
                "task creator is missing or does not match the requesting user".to_string(),
            )),
        }
    }

    pub async fn save_manager(
        &self,
        auth: &AuthUser,
        task_id: i64,
        req: AssignManagerRequest,
    ) -> Result<ManagerResponse, AppError> {
        let task = self.verified_owned_task(auth, task_id).await?;

        let target = self
            .users
            .find_by_id(req.manager_user_id)
            .await?
            .ok_or_else(|| {
                AppError::InvalidRequest("user to assign as a manager does not exist".to_string())
            })?;
        if task.owner_id == Some(target.id) {
            return Err(AppError::InvalidRequest(
                "the task creator cannot assign themselves as a manager".to_string(),
            ));
        }

        let manager = self.managers.create(target.id, task.id).await?;
        Ok(ManagerResponse {
            id: manager.id,
            user: UserSummary::from(&target),
        })
    }

    pub async fn delete_manager(
        &self,
        auth: &AuthUser,
        task_id: i64,
        manager_id: i64,
    ) -> Result<(), AppError> {
        let task = self.verified_owned_task(auth, task_id).await?;

        let manager = self
            .managers
            .find_by_id(manager_id)
            .await?
            .ok_or_else(|| AppError::InvalidRequest("manager not found".to_string()))?;
        if manager.task_id != task.id {
            return Err(AppError::InvalidRequest(
                "manager is not assigned to this task".to_string(),
            ));
        }

        self.managers.delete(manager.id).await
    }

    pub async fn get_managers(&self, task_id: i64) -> Result<Vec<ManagerResponse>, AppError> {
        let task = self
            .tasks
            .find_by_id(task_id)
            .await?
            .ok_or_else(|| AppError::InvalidRequest("task not found".to_string()))?;

        let managers = self.managers.list_by_task(task.id).await?;
        let mut out = Vec::with_capacity(managers.len());
        for manager in managers {
            let user = self.users.find_by_id(manager.user_id).await?.ok_or_else(|| {
                AppError::InternalServerError(format!(
                    "manager {} references a missing user",
                    manager.id
                ))
            })?;
            out.push(ManagerResponse {
                id: manager.id,
                user: UserSummary::from(&user),
            });
        }
        Ok(out)
    }
}
