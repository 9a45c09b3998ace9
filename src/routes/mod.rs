pub mod admin;
pub mod auth;
pub mod comments;
pub mod health;
pub mod managers;
pub mod tasks;
pub mod users;

use std::sync::Arc;

use actix_web::web;

use crate::auth::{AdminAccessLog, AuthMiddleware, RequireAdmin, TokenService};

/// Builds the route tree. Scopes that require a caller are wrapped with an
/// `AuthMiddleware` holding the shared token service; `/auth` and `/health`
/// simply are not wrapped.
///
/// actix runs the last-registered wrap first, so the admin scope registers
/// `AdminAccessLog`, then `RequireAdmin`, then `AuthMiddleware`: a request
/// is authenticated, then role-gated, then logged.
pub fn config(tokens: Arc<TokenService>) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        cfg.service(health::health)
            .service(
                web::scope("/auth")
                    .service(auth::signup)
                    .service(auth::signin),
            )
            .service(
                web::scope("/tasks")
                    .wrap(AuthMiddleware::new(tokens.clone()))
                    .service(tasks::create_task)
                    .service(tasks::list_tasks)
                    .service(managers::assign_manager)
                    .service(managers::list_managers)
                    .service(managers::remove_manager)
                    .service(comments::create_comment)
                    .service(comments::list_comments)
                    .service(tasks::get_task),
            )
            .service(
                web::scope("/users")
                    .wrap(AuthMiddleware::new(tokens.clone()))
                    .service(users::get_user)
                    .service(users::change_password),
            )
            .service(
                web::scope("/admin")
                    .wrap(AdminAccessLog)
                    .wrap(RequireAdmin)
                    .wrap(AuthMiddleware::new(tokens))
                    .service(admin::delete_comment)
                    .service(admin::change_role),
            );
    }
}
