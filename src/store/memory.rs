//! Mutex-guarded in-memory stores. Tests build the full HTTP app on top of
//! these; they enforce the same constraints as the Postgres schema (unique
//! emails, increasing ids) so behavior matches across backends.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use crate::error::AppError;
use crate::models::comment::Comment;
use crate::models::manager::Manager;
use crate::models::task::Task;
use crate::models::user::{User, UserRole};
use crate::store::{CommentStore, ManagerStore, TaskStore, UserStore};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<Vec<User>>,
    next_id: AtomicI64,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn exists_by_email(&self, email: &str) -> Result<bool, AppError> {
        Ok(lock(&self.users).iter().any(|u| u.email == email))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(lock(&self.users).iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        Ok(lock(&self.users).iter().find(|u| u.id == id).cloned())
    }

    async fn create(
        &self,
        email: &str,
        password_hash: &str,
        role: UserRole,
    ) -> Result<User, AppError> {
        let mut users = lock(&self.users);
        // Same backstop as the UNIQUE constraint in Postgres.
        if users.iter().any(|u| u.email == email) {
            return Err(AppError::DatabaseError(format!(
                "duplicate email: {}",
                email
            )));
        }
        let user = User {
            id: self.next_id.fetch_add(1, Ordering::Relaxed) + 1,
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            role,
            created_at: Utc::now(),
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn update_password(&self, id: i64, password_hash: &str) -> Result<(), AppError> {
        let mut users = lock(&self.users);
        if let Some(user) = users.iter_mut().find(|u| u.id == id) {
            user.password_hash = password_hash.to_string();
        }
        Ok(())
    }

    async fn update_role(&self, id: i64, role: UserRole) -> Result<(), AppError> {
        let mut users = lock(&self.users);
        if let Some(user) = users.iter_mut().find(|u| u.id == id) {
            user.role = role;
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryTaskStore {
    tasks: Mutex<Vec<Task>>,
    next_id: AtomicI64,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a row as-is, bypassing `create`. Lets tests set up states the
    /// API cannot produce directly, such as a task whose owner was deleted.
    pub fn insert(&self, task: Task) {
        let mut tasks = lock(&self.tasks);
        let floor = task.id;
        tasks.push(task);
        // Keep generated ids ahead of seeded ones.
        self.next_id.fetch_max(floor, Ordering::Relaxed);
    }
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    async fn create(
        &self,
        title: &str,
        contents: &str,
        weather: &str,
        owner_id: i64,
    ) -> Result<Task, AppError> {
        let now = Utc::now();
        let task = Task {
            id: self.next_id.fetch_add(1, Ordering::Relaxed) + 1,
            title: title.to_string(),
            contents: contents.to_string(),
            weather: weather.to_string(),
            owner_id: Some(owner_id),
            created_at: now,
            modified_at: now,
        };
        lock(&self.tasks).push(task.clone());
        Ok(task)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Task>, AppError> {
        Ok(lock(&self.tasks).iter().find(|t| t.id == id).cloned())
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Task>, AppError> {
        let mut tasks: Vec<Task> = lock(&self.tasks).clone();
        // Same ordering as the Postgres query, with id as the tiebreaker so
        // rows stamped in the same instant still page deterministically.
        tasks.sort_by(|a, b| b.modified_at.cmp(&a.modified_at).then(b.id.cmp(&a.id)));
        Ok(tasks
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(lock(&self.tasks).len() as i64)
    }
}

#[derive(Default)]
pub struct MemoryManagerStore {
    managers: Mutex<Vec<Manager>>,
    next_id: AtomicI64,
}

impl MemoryManagerStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ManagerStore for MemoryManagerStore {
    async fn create(&self, user_id: i64, task_id: i64) -> Result<Manager, AppError> {
        let manager = Manager {
            id: self.next_id.fetch_add(1, Ordering::Relaxed) + 1,
            user_id,
            task_id,
        };
        lock(&self.managers).push(manager.clone());
        Ok(manager)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Manager>, AppError> {
        Ok(lock(&self.managers).iter().find(|m| m.id == id).cloned())
    }

    async fn list_by_task(&self, task_id: i64) -> Result<Vec<Manager>, AppError> {
        Ok(lock(&self.managers)
            .iter()
            .filter(|m| m.task_id == task_id)
            .cloned()
            .collect())
    }

    async fn exists_for_task(&self, user_id: i64, task_id: i64) -> Result<bool, AppError> {
        Ok(lock(&self.managers)
            .iter()
            .any(|m| m.user_id == user_id && m.task_id == task_id))
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        lock(&self.managers).retain(|m| m.id != id);
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryCommentStore {
    comments: Mutex<Vec<Comment>>,
    next_id: AtomicI64,
}

impl MemoryCommentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CommentStore for MemoryCommentStore {
    async fn create(
        &self,
        task_id: i64,
        user_id: i64,
        contents: &str,
    ) -> Result<Comment, AppError> {
        let comment = Comment {
            id: self.next_id.fetch_add(1, Ordering::Relaxed) + 1,
            contents: contents.to_string(),
            user_id,
            task_id,
            created_at: Utc::now(),
        };
        lock(&self.comments).push(comment.clone());
        Ok(comment)
    }

    async fn list_by_task(&self, task_id: i64) -> Result<Vec<Comment>, AppError> {
        Ok(lock(&self.comments)
            .iter()
            .filter(|c| c.task_id == task_id)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        lock(&self.comments).retain(|c| c.id != id);
        Ok(())
    }
}
