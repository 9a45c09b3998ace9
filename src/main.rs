use std::sync::Arc;

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use sqlx::PgPool;

use taskboard::auth::{AuthService, BcryptHasher, PasswordHasher, TokenService};
use taskboard::config::Config;
use taskboard::routes;
use taskboard::services::{CommentService, ManagerService, TaskService, UserService};
use taskboard::store::postgres::{PgCommentStore, PgManagerStore, PgTaskStore, PgUserStore};
use taskboard::store::{CommentStore, ManagerStore, TaskStore, UserStore};
use taskboard::weather::{WeatherClient, WeatherLookup};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();

    let pool = PgPool::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");
    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    let users: Arc<dyn UserStore> = Arc::new(PgUserStore::new(pool.clone()));
    let tasks: Arc<dyn TaskStore> = Arc::new(PgTaskStore::new(pool.clone()));
    let managers: Arc<dyn ManagerStore> = Arc::new(PgManagerStore::new(pool.clone()));
    let comments: Arc<dyn CommentStore> = Arc::new(PgCommentStore::new(pool));

    let hasher: Arc<dyn PasswordHasher> = Arc::new(BcryptHasher::new());
    let tokens = Arc::new(TokenService::new(&config.jwt_secret, config.token_ttl_secs));
    let weather: Arc<dyn WeatherLookup> = Arc::new(WeatherClient::new(config.weather_url.clone()));

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
    let comment_service = web::Data::new(CommentService::new(tasks, users.clone(), managers, comments));
    let user_service = web::Data::new(UserService::new(users, hasher));

    let addr = config.server_addr();
    log::info!("starting server at http://{}:{}", addr.0, addr.1);

    HttpServer::new(move || {
        App::new()
            .app_data(auth_service.clone())
            .app_data(task_service.clone())
            .app_data(manager_service.clone())
            .app_data(comment_service.clone())
            .app_data(user_service.clone())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .configure(routes::config(tokens.clone()))
    })
    .bind(addr)?
    .run()
    .await
}
