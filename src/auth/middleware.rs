use std::sync::Arc;

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use chrono::Utc;
use futures::future::{ready, LocalBoxFuture, Ready};

use crate::auth::extractors::AuthUser;
use crate::auth::token::TokenService;
use crate::error::AppError;

/// Validates the bearer token on every request passing through it and makes
/// the caller available to handlers as [`AuthUser`].
///
/// There is no path skip-list: routes that must stay open (`/auth/*`,
/// `/health`) simply are not wrapped. The routing layer decides, not the
/// middleware.
pub struct AuthMiddleware {
    tokens: Arc<TokenService>,
}

impl AuthMiddleware {
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service,
            tokens: self.tokens.clone(),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
    tokens: Arc<TokenService>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let bearer = req
            .headers()
            .get("Authorization")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "));

        match bearer {
            Some(token) => match self.tokens.verify(token) {
                Ok(claims) => {
                    req.extensions_mut().insert(AuthUser {
                        id: claims.sub,
                        email: claims.email,
                        role: claims.role,
                    });
                    Box::pin(self.service.call(req))
                }
                Err(kind) => {
                    // The failure kind stays in the log; the client gets a
                    // generic 401.
                    log::warn!("rejected bearer token for {}: {}", req.path(), kind);
                    let err = AppError::Unauthorized("invalid or expired token".to_string());
                    Box::pin(async move { Err(err.into()) })
                }
            },
            None => {
                let err = AppError::Unauthorized("missing bearer token".to_string());
                Box::pin(async move { Err(err.into()) })
            }
        }
    }
}

/// Role gate for the admin scope. Must sit inside `AuthMiddleware` so the
/// caller is already resolved.
pub struct RequireAdmin;

impl<S, B> Transform<S, ServiceRequest> for RequireAdmin
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = RequireAdminService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireAdminService { service }))
    }
}

pub struct RequireAdminService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequireAdminService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let is_admin = req.extensions().get::<AuthUser>().map(AuthUser::is_admin);

        match is_admin {
            Some(true) => Box::pin(self.service.call(req)),
            Some(false) => {
                let err = AppError::Forbidden("admin privileges required".to_string());
                Box::pin(async move { Err(err.into()) })
            }
            None => {
                let err = AppError::Unauthorized("authentication required".to_string());
                Box::pin(async move { Err(err.into()) })
            }
        }
    }
}

/// Read-only observer for the admin scope; records who touched which admin
/// URL and when. Never rejects a request.
pub struct AdminAccessLog;

impl<S, B> Transform<S, ServiceRequest> for AdminAccessLog
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AdminAccessLogService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AdminAccessLogService { service }))
    }
}

pub struct AdminAccessLogService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AdminAccessLogService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if let Some(user) = req.extensions().get::<AuthUser>() {
            log::info!(
                "admin access: user id {}, time {}, url {}",
                user.id,
                Utc::now(),
                req.uri()
            );
        }
        Box::pin(self.service.call(req))
    }
}
