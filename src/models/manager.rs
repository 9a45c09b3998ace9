use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::user::UserSummary;

/// Delegate assignment linking a user to a task. Managers are distinct from
/// the task owner and are granted commenting rights on the task.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Manager {
    pub id: i64,
    pub user_id: i64,
    pub task_id: i64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignManagerRequest {
    pub manager_user_id: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ManagerResponse {
    pub id: i64,
    pub user: UserSummary,
}
