use std::sync::Arc;

use crate::auth::AuthUser;
use crate::error::AppError;
use crate::models::task::{PageQuery, Task, TaskPage, TaskResponse, TaskSaveRequest};
use crate::models::user::UserSummary;
use crate::store::{TaskStore, UserStore};
use crate::weather::WeatherLookup;

pub struct TaskService {
    tasks: Arc<dyn TaskStore>,
    users: Arc<dyn UserStore>,
    weather: Arc<dyn WeatherLookup>,
}

impl TaskService {
    pub fn new(
        tasks: Arc<dyn TaskStore>,
        users: Arc<dyn UserStore>,
        weather: Arc<dyn WeatherLookup>,
    ) -> Self {
        Self {
            tasks,
            users,
            weather,
        }
    }

    /// Persists a task for the caller, stamped with today's weather.
    pub async fn save_task(
        &self,
        auth: &AuthUser,
        req: TaskSaveRequest,
    ) -> Result<TaskResponse, AppError> {
        let weather = self.weather.today().await?;
        let task = self
            .tasks
            .create(&req.title, &req.contents, &weather, auth.id)
            .await?;
        let owner = UserSummary {
            id: auth.id,
            email: auth.email.clone(),
        };
        Ok(TaskResponse::from_task(task, Some(owner)))
    }

    /// Pages through all tasks, newest modification first. `page` is 1-based
    /// and clamped to at least 1; `size` defaults to 10.
    pub async fn get_tasks(&self, query: PageQuery) -> Result<TaskPage, AppError> {
        let page = query.page.unwrap_or(1).max(1);
        let size = query.size.unwrap_or(10).max(1);
        let offset = (page - 1) * size;

        let tasks = self.tasks.list(offset, size).await?;
        let total_elements = self.tasks.count().await?;
        let total_pages = (total_elements + size - 1) / size;

        let mut content = Vec::with_capacity(tasks.len());
        for task in tasks {
            content.push(self.with_owner(task).await?);
        }

        Ok(TaskPage {
            content,
            page,
            size,
            total_elements,
            total_pages,
        })
    }

    pub async fn get_task(&self, task_id: i64) -> Result<TaskResponse, AppError> {
        let task = self
            .tasks
            .find_by_id(task_id)
            .await?
            .ok_or_else(|| AppError::InvalidRequest("task not found".to_string()))?;
        self.with_owner(task).await
    }

    async fn with_owner(&self, task: Task) -> Result<TaskResponse, AppError> {
        let owner = match task.owner_id {
            Some(owner_id) => self
                .users
                .find_by_id(owner_id)
                .await?
                .map(|user| UserSummary::from(&user)),
            None => None,
        };
        Ok(TaskResponse::from_task(task, owner))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::UserRole;
    use crate::store::memory::{MemoryTaskStore, MemoryUserStore};
    use async_trait::async_trait;

    struct FixedWeather(&'static str);

    #[async_trait]
    impl WeatherLookup for FixedWeather {
        async fn today(&self) -> Result<String, AppError> {
            Ok(self.0.to_string())
        }
    }

    async fn service_with_user() -> (TaskService, AuthUser) {
        let users = Arc::new(MemoryUserStore::new());
        let owner = users
            .create("owner@x.com", "hash", UserRole::User)
            .await
            .unwrap();
        let service = TaskService::new(
            Arc::new(MemoryTaskStore::new()),
            users,
            Arc::new(FixedWeather("Partly cloudy")),
        );
        let auth = AuthUser {
            id: owner.id,
            email: owner.email,
            role: owner.role,
        };
        (service, auth)
    }

    fn request(title: &str) -> TaskSaveRequest {
        TaskSaveRequest {
            title: title.to_string(),
            contents: "contents".to_string(),
        }
    }

    #[actix_rt::test]
    async fn test_saved_task_carries_weather_and_owner() {
        let (service, auth) = service_with_user().await;

        let response = service.save_task(&auth, request("first")).await.unwrap();

        assert_eq!(response.weather, "Partly cloudy");
        assert_eq!(
            response.user,
            Some(UserSummary {
                id: auth.id,
                email: auth.email.clone(),
            })
        );

        let fetched = service.get_task(response.id).await.unwrap();
        assert_eq!(fetched.title, "first");
        assert_eq!(fetched.weather, "Partly cloudy");
    }

    #[actix_rt::test]
    async fn test_get_missing_task_is_invalid_request() {
        let (service, _) = service_with_user().await;

        let result = service.get_task(999).await;
        assert!(matches!(result, Err(AppError::InvalidRequest(_))));
    }

    #[actix_rt::test]
    async fn test_pagination_math() {
        let (service, auth) = service_with_user().await;
        for i in 0..7 {
            service
                .save_task(&auth, request(&format!("task {}", i)))
                .await
                .unwrap();
        }

        let first = service
            .get_tasks(PageQuery {
                page: Some(1),
                size: Some(3),
            })
            .await
            .unwrap();
        assert_eq!(first.content.len(), 3);
        assert_eq!(first.total_elements, 7);
        assert_eq!(first.total_pages, 3);

        let last = service
            .get_tasks(PageQuery {
                page: Some(3),
                size: Some(3),
            })
            .await
            .unwrap();
        assert_eq!(last.content.len(), 1);

        // Page numbers below 1 are clamped rather than rejected.
        let clamped = service
            .get_tasks(PageQuery {
                page: Some(0),
                size: Some(3),
            })
            .await
            .unwrap();
        assert_eq!(clamped.page, 1);
        assert_eq!(clamped.content.len(), 3);
    }

    #[actix_rt::test]
    async fn test_empty_listing_has_zero_pages() {
        let (service, _) = service_with_user().await;

        let page = service
            .get_tasks(PageQuery {
                page: None,
                size: None,
            })
            .await
            .unwrap();

        assert_eq!(page.page, 1);
        assert_eq!(page.size, 10);
        assert_eq!(page.total_elements, 0);
        assert_eq!(page.total_pages, 0);
        assert!(page.content.is_empty());
    }
}
