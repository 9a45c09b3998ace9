//! sqlx-backed store implementations, one per aggregate.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::error::AppError;
use crate::models::comment::Comment;
use crate::models::manager::Manager;
use crate::models::task::Task;
use crate::models::user::{User, UserRole};
use crate::store::{CommentStore, ManagerStore, TaskStore, UserStore};

/// Row shape for the users table. The role column is plain text, parsed into
/// `UserRole` when the row is lifted into the domain model.
#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    email: String,
    password_hash: String,
    role: String,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> Result<User, AppError> {
        let role = self.role.parse::<UserRole>().map_err(|_| {
            AppError::InternalServerError(format!("unrecognized role '{}' in storage", self.role))
        })?;
        Ok(User {
            id: self.id,
            email: self.email,
            password_hash: self.password_hash,
            role,
            created_at: self.created_at,
        })
    }
}

#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn exists_by_email(&self, email: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, email, password_hash, role, created_at
             FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        row.map(UserRow::into_user).transpose()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, email, password_hash, role, created_at
             FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(UserRow::into_user).transpose()
    }

    async fn create(
        &self,
        email: &str,
        password_hash: &str,
        role: UserRole,
    ) -> Result<User, AppError> {
        let row = sqlx::query_as::<_, UserRow>(
            "INSERT INTO users (email, password_hash, role)
             VALUES ($1, $2, $3)
             RETURNING id, email, password_hash, role, created_at",
        )
        .bind(email)
        .bind(password_hash)
        .bind(role.to_string())
        .fetch_one(&self.pool)
        .await?;
        row.into_user()
    }

    async fn update_password(&self, id: i64, password_hash: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE users SET password_hash = $1 WHERE id = $2")
            .bind(password_hash)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn update_role(&self, id: i64, role: UserRole) -> Result<(), AppError> {
        sqlx::query("UPDATE users SET role = $1 WHERE id = $2")
            .bind(role.to_string())
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[derive(Clone)]
pub struct PgTaskStore {
    pool: PgPool,
}

impl PgTaskStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskStore for PgTaskStore {
    async fn create(
        &self,
        title: &str,
        contents: &str,
        weather: &str,
        owner_id: i64,
    ) -> Result<Task, AppError> {
        let task = sqlx::query_as::<_, Task>(
            "INSERT INTO tasks (title, contents, weather, owner_id)
             VALUES ($1, $2, $3, $4)
             RETURNING id, title, contents, weather, owner_id, created_at, modified_at",
        )
        .bind(title)
        .bind(contents)
        .bind(weather)
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(task)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Task>, AppError> {
        let task = sqlx::query_as::<_, Task>(
            "SELECT id, title, contents, weather, owner_id, created_at, modified_at
             FROM tasks WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(task)
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Task>, AppError> {
        let tasks = sqlx::query_as::<_, Task>(
            "SELECT id, title, contents, weather, owner_id, created_at, modified_at
             FROM tasks
             ORDER BY modified_at DESC, id DESC
             LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(tasks)
    }

    async fn count(&self) -> Result<i64, AppError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM tasks")
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }
}

#[derive(Clone)]
pub struct PgManagerStore {
    pool: PgPool,
}

impl PgManagerStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ManagerStore for PgManagerStore {
    async fn create(&self, user_id: i64, task_id: i64) -> Result<Manager, AppError> {
        let manager = sqlx::query_as::<_, Manager>(
            "INSERT INTO managers (user_id, task_id)
             VALUES ($1, $2)
             RETURNING id, user_id, task_id",
        )
        .bind(user_id)
        .bind(task_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(manager)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Manager>, AppError> {
        let manager = sqlx::query_as::<_, Manager>(
            "SELECT id, user_id, task_id FROM managers WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(manager)
    }

    async fn list_by_task(&self, task_id: i64) -> Result<Vec<Manager>, AppError> {
        let managers = sqlx::query_as::<_, Manager>(
            "SELECT id, user_id, task_id FROM managers WHERE task_id = $1 ORDER BY id",
        )
        .bind(task_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(managers)
    }

    async fn exists_for_task(&self, user_id: i64, task_id: i64) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM managers WHERE user_id = $1 AND task_id = $2)",
        )
        .bind(user_id)
        .bind(task_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        sqlx::query("DELETE FROM managers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[derive(Clone)]
pub struct PgCommentStore {
    pool: PgPool,
}

impl PgCommentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentStore for PgCommentStore {
    async fn create(
        &self,
        task_id: i64,
        user_id: i64,
        contents: &str,
    ) -> Result<Comment, AppError> {
        let comment = sqlx::query_as::<_, Comment>(
            "INSERT INTO comments (contents, user_id, task_id)
             VALUES ($1, $2, $3)
             RETURNING id, contents, user_id, task_id, created_at",
        )
        .bind(contents)
        .bind(user_id)
        .bind(task_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(comment)
    }

    async fn list_by_task(&self, task_id: i64) -> Result<Vec<Comment>, AppError> {
        let comments = sqlx::query_as::<_, Comment>(
            "SELECT id, contents, user_id, task_id, created_at
             FROM comments WHERE task_id = $1 ORDER BY id",
        )
        .bind(task_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(comments)
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
