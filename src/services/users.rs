use std::sync::Arc;

use crate::auth::PasswordHasher;
use crate::error::AppError;
use crate::models::user::{ChangePasswordRequest, ChangeRoleRequest, UserRole, UserSummary};
use crate::store::UserStore;

/// Profile lookups plus the two account mutations: password change (self-
/// service) and role change (admin only, enforced at the routing layer).
pub struct UserService {
    users: Arc<dyn UserStore>,
    hasher: Arc<dyn PasswordHasher>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserStore>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { users, hasher }
    }

    pub async fn get_user(&self, user_id: i64) -> Result<UserSummary, AppError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::InvalidRequest("user not found".to_string()))?;
        Ok(UserSummary::from(&user))
    }

    /// Replaces the caller's password. The new password must satisfy the
    /// strength rules, differ from the current one, and the old password
    /// must match.
    pub async fn change_password(
        &self,
        user_id: i64,
        req: ChangePasswordRequest,
    ) -> Result<(), AppError> {
        validate_new_password(&req.new_password)?;

        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::InvalidRequest("user not found".to_string()))?;

        if self.hasher.verify(&req.new_password, &user.password_hash)? {
            return Err(AppError::InvalidRequest(
                "new password must differ from the current password".to_string(),
            ));
        }
        if !self.hasher.verify(&req.old_password, &user.password_hash)? {
            return Err(AppError::InvalidRequest("wrong password".to_string()));
        }

        let new_hash = self.hasher.hash(&req.new_password)?;
        self.users.update_password(user.id, &new_hash).await
    }

    /// Changes a user's role. Already-issued tokens keep their role claim
    /// until they expire; only tokens issued afterwards see the new role.
    pub async fn change_role(&self, user_id: i64, req: ChangeRoleRequest) -> Result<(), AppError> {
        let role: UserRole = req.role.parse()?;
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::InvalidRequest("user not found".to_string()))?;
        self.users.update_role(user.id, role).await
    }
}

fn validate_new_password(password: &str) -> Result<(), AppError> {
    let long_enough = password.chars().count() >= 8;
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_uppercase = password.chars().any(|c| c.is_ascii_uppercase());
    if !(long_enough && has_digit && has_uppercase) {
        return Err(AppError::InvalidRequest(
            "password must be at least 8 characters and contain a digit and an uppercase letter"
                .to_string(),
        ));
    }
    Ok(())
}
