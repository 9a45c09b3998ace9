//! Storage traits and their Postgres and in-memory implementations.
//!
//! Services depend on the traits only, so the HTTP layer can be exercised in
//! tests against the in-memory stores without a running database.

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::comment::Comment;
use crate::models::manager::Manager;
use crate::models::task::Task;
use crate::models::user::{User, UserRole};

pub mod memory;
pub mod postgres;

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn exists_by_email(&self, email: &str) -> Result<bool, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;
    /// Persists a new user. The email must be unique; stores back this up
    /// with a uniqueness constraint in addition to the signup-time check.
    async fn create(
        &self,
        email: &str,
        password_hash: &str,
        role: UserRole,
    ) -> Result<User, AppError>;
    async fn update_password(&self, id: i64, password_hash: &str) -> Result<(), AppError>;
    async fn update_role(&self, id: i64, role: UserRole) -> Result<(), AppError>;
}

#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn create(
        &self,
        title: &str,
        contents: &str,
        weather: &str,
        owner_id: i64,
    ) -> Result<Task, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Task>, AppError>;
    /// Window of tasks ordered by `modified_at` descending.
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Task>, AppError>;
    async fn count(&self) -> Result<i64, AppError>;
}

#[async_trait]
pub trait ManagerStore: Send + Sync {
    async fn create(&self, user_id: i64, task_id: i64) -> Result<Manager, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Manager>, AppError>;
    async fn list_by_task(&self, task_id: i64) -> Result<Vec<Manager>, AppError>;
    async fn exists_for_task(&self, user_id: i64, task_id: i64) -> Result<bool, AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}

#[async_trait]
pub trait CommentStore: Send + Sync {
    async fn create(&self, task_id: i64, user_id: i64, contents: &str)
        -> Result<Comment, AppError>;
    async fn list_by_task(&self, task_id: i64) -> Result<Vec<Comment>, AppError>;
    /// Deletes by id, succeeding even when no such comment exists.
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}
