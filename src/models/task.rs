use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::user::UserSummary;

/// Task entity as stored in the database. `owner_id` is nullable because the
/// owning account can be deleted out from under the task (ON DELETE SET
/// NULL); workflows that need an owner reject such rows up front.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub contents: String,
    /// Weather description captured at creation time.
    pub weather: String,
    pub owner_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

/// Input structure for creating a task.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TaskSaveRequest {
    /// Must be between 1 and 200 characters.
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    /// Must be between 1 and 1000 characters.
    #[validate(length(min = 1, max = 1000))]
    pub contents: String,
}

/// Task shape returned by the API, with the owner embedded.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub id: i64,
    pub title: String,
    pub contents: String,
    pub weather: String,
    pub user: Option<UserSummary>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl TaskResponse {
    pub fn from_task(task: Task, user: Option<UserSummary>) -> Self {
        Self {
            id: task.id,
            title: task.title,
            contents: task.contents,
            weather: task.weather,
            user,
            created_at: task.created_at,
            modified_at: task.modified_at,
        }
    }
}

/// Query parameters for the paginated task listing. Both are optional;
/// the service clamps `page` to at least 1 and defaults `size` to 10.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
}

/// Page envelope for task listings.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPage {
    pub content: Vec<TaskResponse>,
    pub page: i64,
    pub size: i64,
    pub total_elements: i64,
    pub total_pages: i64,
}
