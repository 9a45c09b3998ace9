//! Shared setup for the integration suites: a memory-backed application
//! context wired exactly like `main`, so the full HTTP surface can be
//! exercised without Postgres or the weather upstream.

use std::sync::Arc;

use actix_web::web;
use async_trait::async_trait;

use taskboard::auth::{AuthService, BcryptHasher, PasswordHasher, TokenService};
use taskboard::error::AppError;
use taskboard::routes;
use taskboard::services::{CommentService, ManagerService, TaskService, UserService};
use taskboard::store::memory::{
    MemoryCommentStore, MemoryManagerStore, MemoryTaskStore, MemoryUserStore,
};
use taskboard::store::{CommentStore, ManagerStore, TaskStore, UserStore};
use taskboard::weather::WeatherLookup;

pub const TEST_SECRET: &str = "integration-test-secret";
pub const TEST_WEATHER: &str = "Sunny";

pub struct FixedWeather(pub &'static str);

#[async_trait]
impl WeatherLookup for FixedWeather {
    async fn today(&self) -> Result<String, AppError> {
        Ok(self.0.to_string())
    }
}

pub struct TestCtx {
    pub tokens: Arc<TokenService>,
    auth_service: web::Data<AuthService>,
    task_service: web::Data<TaskService>,
    manager_service: web::Data<ManagerService>,
    comment_service: web::Data<CommentService>,
    user_service: web::Data<UserService>,
}

impl TestCtx {
    pub fn new() -> Self {
        let users: Arc<dyn UserStore> = Arc::new(MemoryUserStore::new());
        let tasks: Arc<dyn TaskStore> = Arc::new(MemoryTaskStore::new());
        let managers: Arc<dyn ManagerStore> = Arc::new(MemoryManagerStore::new());
        let comments: Arc<dyn CommentStore> = Arc::new(MemoryCommentStore::new());

        // Low bcrypt cost keeps the suites fast.
        let hasher: Arc<dyn PasswordHasher> = Arc::new(BcryptHasher::with_cost(4));
        let tokens = Arc::new(TokenService::new(TEST_SECRET, 3600));
        let weather: Arc<dyn WeatherLookup> = Arc::new(FixedWeather(TEST_WEATHER));

        let auth_service = web::Data::new(AuthService::new(
            users.clone(),
            hasher.clone(),
            tokens.clone(),
        ));
        let task_service = web::Data::new(TaskService::new(tasks.clone(), users.clone(), weather));
        let manager_service = web::Data::new(ManagerService::new(
            tasks.clone(),
            users.clone(),
            managers.clone(),
        ));
        let comment_service =
            web::Data::new(CommentService::new(tasks, users.clone(), managers, comments));
        let user_service = web::Data::new(UserService::new(users, hasher));

        Self {
            tokens,
            auth_service,
            task_service,
            manager_service,
            comment_service,
            user_service,
        }
    }

    /// Returns a closure for `App::configure` that registers the services
    /// and the full route tree, mirroring the wiring in `main`.
    pub fn configure(&self) -> impl FnOnce(&mut web::ServiceConfig) {
        let auth_service = self.auth_service.clone();
        let task_service = self.task_service.clone();
        let manager_service = self.manager_service.clone();
        let comment_service = self.comment_service.clone();
        let user_service = self.user_service.clone();
        let tokens = self.tokens.clone();

        move |cfg: &mut web::ServiceConfig| {
            cfg.app_data(auth_service)
                .app_data(task_service)
                .app_data(manager_service)
                .app_data(comment_service)
                .app_data(user_service);
            routes::config(tokens)(cfg);
        }
    }
}

impl Default for TestCtx {
    fn default() -> Self {
        Self::new()
    }
}
