use std::sync::Arc;

use crate::auth::AuthUser;
use crate::error::AppError;
use crate::models::comment::{CommentResponse, CommentSaveRequest};
use crate::models::user::UserSummary;
use crate::store::{CommentStore, ManagerStore, TaskStore, UserStore};

pub struct CommentService {
    tasks: Arc<dyn TaskStore>,
    users: Arc<dyn UserStore>,
    managers: Arc<dyn ManagerStore>,
    comments: Arc<dyn CommentStore>,
}

impl CommentService {
    pub fn new(
        tasks: Arc<dyn TaskStore>,
        users: Arc<dyn UserStore>,
        managers: Arc<dyn ManagerStore>,
        comments: Arc<dyn CommentStore>,
    ) -> Self {
        Self {
            tasks,
            users,
            managers,
            comments,
        }
    }

    /// Adds a comment to a task. Only participants may comment: the task's
    /// owner or a user assigned as one of its managers.
    pub async fn save_comment(
        &self,
        auth: &AuthUser,
        task_id: i64,
        req: CommentSaveRequest,
    ) -> Result<CommentResponse, AppError> {
        let task = self
            .tasks
            .find_by_id(task_id)
            .await?
            .ok_or_else(|| AppError::InvalidRequest("task not found".to_string()))?;

        let is_owner = task.owner_id == Some(auth.id);
        let is_manager = self.managers.exists_for_task(auth.id, task.id).await?;
        if !is_owner && !is_manager {
            return Err(AppError::InvalidRequest(
                "only the task creator or an assigned manager can comment".to_string(),
            ));
        }

        let comment = self.comments.create(task.id, auth.id, &req.contents).await?;
        Ok(CommentResponse {
            id: comment.id,
            contents: comment.contents,
            user: UserSummary {
                id: auth.id,
                email: auth.email.clone(),
            },
        })
    }

    pub async fn get_comments(&self, task_id: i64) -> Result<Vec<CommentResponse>, AppError> {
        let task = self
            .tasks
            .find_by_id(task_id)
            .await?
            .ok_or_else(|| AppError::InvalidRequest("task not found".to_string()))?;

        let comments = self.comments.list_by_task(task.id).await?;
        let mut out = Vec::with_capacity(comments.len());
        for comment in comments {
            let user = self.users.find_by_id(comment.user_id).await?.ok_or_else(|| {
                AppError::InternalServerError(format!(
                    "comment {} references a missing user",
                    comment.id
                ))
            })?;
            out.push(CommentResponse {
                id: comment.id,
                contents: comment.contents,
                user: UserSummary::from(&user),
            });
        }
        Ok(out)
    }

    /// Admin-side removal; deleting an already-deleted comment succeeds.
    pub async fn delete_comment(&self, comment_id: i64) -> Result<(), AppError> {
        self.comments.delete(comment_id).await
    }
}
