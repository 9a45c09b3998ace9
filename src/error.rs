//!
//! # Application Error Handling
//!
//! Defines [`AppError`], the single error type used across services, stores,
//! middleware, and handlers. It implements `actix_web::error::ResponseError`
//! so that handler results convert directly into HTTP responses with JSON
//! bodies, and provides `From` implementations for the error types of the
//! crates we lean on (`sqlx`, `validator`, `bcrypt`, `reqwest`) so that `?`
//! works throughout.

use actix_web::{error::ResponseError, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// All failure modes a request can surface.
///
/// The split between `InvalidRequest`, `AuthFailed`, `Unauthorized`, and
/// `Forbidden` is deliberate: each maps to a distinct HTTP status and the
/// distinction is relied on by callers (e.g. signin reports an unknown email
/// as `InvalidRequest` but a wrong password as `AuthFailed`).
#[derive(Debug)]
pub enum AppError {
    /// Client-correctable input or resource-state error (HTTP 400):
    /// empty/duplicate email, unknown role, missing or mismatched resources,
    /// ownership rule violations.
    InvalidRequest(String),
    /// Declarative validation failure on a request body (HTTP 400).
    ValidationError(String),
    /// Credential mismatch during signin (HTTP 401).
    AuthFailed(String),
    /// Missing, malformed, or unverifiable bearer token (HTTP 401).
    Unauthorized(String),
    /// Authenticated but lacking the required role (HTTP 403).
    Forbidden(String),
    /// Storage-layer failure, wraps `sqlx` errors (HTTP 500).
    DatabaseError(String),
    /// Any other server-side failure: hashing, token signing, upstream
    /// lookups (HTTP 500).
    InternalServerError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::InvalidRequest(msg) => write!(f, "Invalid Request: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
            AppError::AuthFailed(msg) => write!(f, "Authentication Failed: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
        }
    }
}

/// Converts `AppError` variants into HTTP responses with `{"error": msg}`
/// bodies. Database errors are presented as a generic internal server error;
/// the detailed message still reaches the log via `Display`.
impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::InvalidRequest(msg) => HttpResponse::BadRequest().json(json!({
                "error": msg
            })),
            AppError::ValidationError(msg) => HttpResponse::BadRequest().json(json!({
                "error": msg
            })),
            AppError::AuthFailed(msg) => HttpResponse::Unauthorized().json(json!({
                "error": msg
            })),
            AppError::Unauthorized(msg) => HttpResponse::Unauthorized().json(json!({
                "error": msg
            })),
            AppError::Forbidden(msg) => HttpResponse::Forbidden().json(json!({
                "error": msg
            })),
            AppError::DatabaseError(_) => HttpResponse::InternalServerError().json(json!({
                "error": "internal server error"
            })),
            AppError::InternalServerError(msg) => HttpResponse::InternalServerError().json(json!({
                "error": msg
            })),
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        AppError::DatabaseError(error.to_string())
    }
}

/// Validation messages from the `validator` derive are preserved verbatim.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::ValidationError(error.to_string())
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::InternalServerError(format!("password hashing failed: {}", error))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(error: reqwest::Error) -> AppError {
        AppError::InternalServerError(format!("upstream request failed: {}", error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (AppError::InvalidRequest("bad input".into()), 400),
            (AppError::ValidationError("too short".into()), 400),
            (AppError::AuthFailed("invalid credentials".into()), 401),
            (AppError::Unauthorized("missing token".into()), 401),
            (AppError::Forbidden("admin privileges required".into()), 403),
            (AppError::DatabaseError("connection reset".into()), 500),
            (AppError::InternalServerError("boom".into()), 500),
        ];

        for (error, expected) in cases {
            let response = error.error_response();
            assert_eq!(response.status(), expected, "wrong status for {}", error);
        }
    }

    #[test]
    fn test_database_detail_not_exposed() {
        let error = AppError::DatabaseError("password_hash column missing".into());
        let response = error.error_response();
        assert_eq!(response.status(), 500);
        // The Display impl keeps the detail for logs.
        assert!(error.to_string().contains("password_hash column missing"));
    }
}
