//! Profile service: the authenticated user's own record

use std::sync::Arc;

use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::models::User;
use crate::repositories::UserRepository;

#[derive(Clone)]
pub struct ProfileService {
    users: Arc<dyn UserRepository>,
}

impl ProfileService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Load a user by ID
    ///
    /// # Errors
    /// - `ApiError::NotFound` if the ID no longer resolves
    pub async fn get(&self, user_id: Uuid) -> ApiResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ApiError::not_found("user", user_id.to_string()))
    }

    /// Overwrite the user's status line
    pub async fn update_status(&self, user_id: Uuid, status: &str) -> ApiResult<User> {
        let user = self
            .users
            .update_status(user_id, status)
            .await?
            .ok_or_else(|| ApiError::not_found("user", user_id.to_string()))?;

        tracing::info!(user_id = %user.id, "Status updated");

        Ok(user)
    }
}
