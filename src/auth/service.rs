use std::sync::Arc;

use crate::auth::password::PasswordHasher;
use crate::auth::token::TokenService;
use crate::error::AppError;
use crate::models::user::{SigninRequest, SignupRequest, TokenResponse, UserRole};
use crate::store::UserStore;

/// Orchestrates signup and signin. All collaborators are injected through
/// the constructor; there is no global registry.
pub struct AuthService {
    users: Arc<dyn UserStore>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<TokenService>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<TokenService>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    /// Registers a new account and returns a bearer token for it.
    ///
    /// The check order matters: the email is validated and checked for
    /// duplicates before the password is hashed, so a doomed request never
    /// pays for the hash.
    pub async fn signup(&self, req: SignupRequest) -> Result<TokenResponse, AppError> {
        if req.email.is_empty() {
            return Err(AppError::InvalidRequest("email is empty".to_string()));
        }
        if self.users.exists_by_email(&req.email).await? {
            return Err(AppError::InvalidRequest("email already exists".to_string()));
        }

        let password_hash = self.hasher.hash(&req.password)?;
        let role: UserRole = req.user_role.parse()?;

        let user = self.users.create(&req.email, &password_hash, role).await?;
        let token = self.tokens.issue(user.id, &user.email, user.role)?;
        Ok(TokenResponse {
            bearer_token: token,
        })
    }

    /// Verifies credentials and returns a fresh bearer token.
    ///
    /// An unknown email and a wrong password are distinct error kinds:
    /// `InvalidRequest` for the former, `AuthFailed` for the latter.
    pub async fn signin(&self, req: SigninRequest) -> Result<TokenResponse, AppError> {
        let user = self
            .users
            .find_by_email(&req.email)
            .await?
            .ok_or_else(|| AppError::InvalidRequest("user not found".to_string()))?;

        if !self.hasher.verify(&req.password, &user.password_hash)? {
            return Err(AppError::AuthFailed("invalid credentials".to_string()));
        }

        let token = self.tokens.issue(user.id, &user.email, user.role)?;
        Ok(TokenResponse {
            bearer_token: token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::password::BcryptHasher;
    use crate::store::memory::MemoryUserStore;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Hasher double that counts invocations; hashing itself is a cheap
    /// reversible tag so signin can still verify.
    struct CountingHasher {
        calls: AtomicUsize,
    }

    impl CountingHasher {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl PasswordHasher for CountingHasher {
        fn hash(&self, plaintext: &str) -> Result<String, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(format!("hashed:{}", plaintext))
        }

        fn verify(&self, plaintext: &str, stored_hash: &str) -> Result<bool, AppError> {
            Ok(stored_hash == format!("hashed:{}", plaintext))
        }
    }

    fn service_with_hasher(hasher: Arc<dyn PasswordHasher>) -> AuthService {
        AuthService::new(
            Arc::new(MemoryUserStore::new()),
            hasher,
            Arc::new(TokenService::new("auth-service-test-secret", 3600)),
        )
    }

    fn signup_request(email: &str, password: &str, role: &str) -> SignupRequest {
        SignupRequest {
            email: email.to_string(),
            password: password.to_string(),
            user_role: role.to_string(),
        }
    }

    fn signin_request(email: &str, password: &str) -> SigninRequest {
        SigninRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[actix_rt::test]
    async fn test_signup_then_signin_roundtrip() {
        let service = service_with_hasher(Arc::new(BcryptHasher::with_cost(4)));
        let tokens = TokenService::new("auth-service-test-secret", 3600);

        let signup = service
            .signup(signup_request("a@x.com", "p1", "USER"))
            .await
            .unwrap();
        assert!(!signup.bearer_token.is_empty());

        let signin = service.signin(signin_request("a@x.com", "p1")).await.unwrap();

        // Both tokens resolve to the same identity.
        let first = tokens.verify(&signup.bearer_token).unwrap();
        let second = tokens.verify(&signin.bearer_token).unwrap();
        assert_eq!(first.email, "a@x.com");
        assert_eq!(second.email, "a@x.com");
        assert_eq!(first.role, UserRole::User);
        assert_eq!(second.role, UserRole::User);
        assert_eq!(first.sub, second.sub);
    }

    #[actix_rt::test]
    async fn test_signup_empty_email_fails_before_hashing() {
        let hasher = Arc::new(CountingHasher::new());
        let service = service_with_hasher(hasher.clone());

        let result = service.signup(signup_request("", "secret", "USER")).await;

        assert!(matches!(result, Err(AppError::InvalidRequest(_))));
        assert_eq!(hasher.calls(), 0);
    }

    #[actix_rt::test]
    async fn test_signup_duplicate_email_fails_before_hashing() {
        let hasher = Arc::new(CountingHasher::new());
        let service = service_with_hasher(hasher.clone());

        service
            .signup(signup_request("a@x.com", "first", "USER"))
            .await
            .unwrap();
        assert_eq!(hasher.calls(), 1);

        let duplicate = service
            .signup(signup_request("a@x.com", "second", "USER"))
            .await;

        assert!(matches!(duplicate, Err(AppError::InvalidRequest(_))));
        // The duplicate attempt never reached the hasher.
        assert_eq!(hasher.calls(), 1);

        // The stored credential is still the first password.
        let original = service.signin(signin_request("a@x.com", "first")).await;
        assert!(original.is_ok());
        let overwritten = service.signin(signin_request("a@x.com", "second")).await;
        assert!(matches!(overwritten, Err(AppError::AuthFailed(_))));
    }

    #[actix_rt::test]
    async fn test_signup_rejects_unknown_role() {
        let service = service_with_hasher(Arc::new(CountingHasher::new()));

        let result = service
            .signup(signup_request("a@x.com", "secret", "SUPERVISOR"))
            .await;

        assert!(matches!(result, Err(AppError::InvalidRequest(_))));

        // Nothing was persisted for the rejected role.
        let signin = service.signin(signin_request("a@x.com", "secret")).await;
        assert!(matches!(signin, Err(AppError::InvalidRequest(_))));
    }

    #[actix_rt::test]
    async fn test_signin_distinguishes_unknown_email_from_bad_password() {
        let service = service_with_hasher(Arc::new(CountingHasher::new()));
        service
            .signup(signup_request("a@x.com", "right", "USER"))
            .await
            .unwrap();

        let unknown = service.signin(signin_request("ghost@x.com", "right")).await;
        assert!(matches!(unknown, Err(AppError::InvalidRequest(_))));

        let wrong = service.signin(signin_request("a@x.com", "wrong")).await;
        assert!(matches!(wrong, Err(AppError::AuthFailed(_))));
    }

    #[actix_rt::test]
    async fn test_signup_token_carries_requested_role() {
        let service = service_with_hasher(Arc::new(CountingHasher::new()));
        let tokens = TokenService::new("auth-service-test-secret", 3600);

        let response = service
            .signup(signup_request("root@x.com", "secret", "admin"))
            .await
            .unwrap();

        let claims = tokens.verify(&response.bearer_token).unwrap();
        assert_eq!(claims.role, UserRole::Admin);
    }
}
