use std::sync::Arc;
use tracing::info;

use crate::domain::models::user::User;
use crate::domain::ports::UserRepository;
use crate::error::AppError;

/// Replacement values for a user update. Every field overwrites the
/// stored one unconditionally; this is not a patch merge. The password
/// is an opaque credential here — callers hash before constructing this.
pub struct UpdateUserParams {
    pub name: String,
    pub email: String,
    pub password: String,
}

pub struct UserService {
    users: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Full-overwrite update. Id and role are never touched. The
    /// not-found message is a client-visible contract and must keep
    /// this exact shape.
    pub async fn update_user(&self, id: i64, params: UpdateUserParams) -> Result<User, AppError> {
        let mut user = self.users.find_by_id(id).await?
            .ok_or_else(|| AppError::NotFound(format!("User not found for id: {}", id)))?;

        user.name = params.name;
        user.email = params.email;
        user.password_hash = params.password;

        let updated = self.users.update(&user).await?;
        info!("User updated: {}", updated.id);
        Ok(updated)
    }
}
