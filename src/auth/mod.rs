pub mod extractors;
pub mod middleware;
pub mod password;
pub mod service;
pub mod token;

pub use extractors::AuthUser;
pub use middleware::{AdminAccessLog, AuthMiddleware, RequireAdmin};
pub use password::{BcryptHasher, PasswordHasher};
pub use service::AuthService;
pub use token::{Claims, TokenError, TokenService};
