//! User API operations

use crate::cachefly::traits::ApiListResponse;
use crate::cachefly::{CacheFlyClient, Collected, ListOptions};
use crate::config::api;
use crate::error::{CacheFlyError, Result};

use super::models::{User, UserRequest};

impl CacheFlyClient {
    /// Get all users (with pagination)
    pub async fn get_users(&self, options: &ListOptions) -> Result<Collected<User>> {
        let path = format!("/{}", api::USERS);
        self.fetch_all_pages::<User, ApiListResponse<User>>(&path, options, "users")
            .await
    }

    pub async fn get_user(&self, user_id: &str) -> Result<Option<User>> {
        let path = format!("/{}/{}", api::USERS, user_id);
        self.fetch_resource_by_path::<User>(&path, &format!("user '{}'", user_id))
            .await
    }

    /// Get the user that owns the API token
    pub async fn get_current_user(&self) -> Result<User> {
        let path = format!("/{}/me", api::USERS);
        self.fetch_resource_by_path::<User>(&path, "current user")
            .await?
            .ok_or_else(|| CacheFlyError::Api {
                status: 404,
                message: "Current user not found".to_string(),
            })
    }

    pub async fn create_user(&self, request: &UserRequest) -> Result<User> {
        let path = format!("/{}", api::USERS);
        let label = request.username.as_deref().unwrap_or_default();
        self.post_json(&path, request, &format!("create user '{}'", label))
            .await
    }

    pub async fn update_user(&self, user_id: &str, request: &UserRequest) -> Result<User> {
        let path = format!("/{}/{}", api::USERS, user_id);
        self.put_json(&path, request, &format!("update user '{}'", user_id))
            .await
    }

    pub async fn delete_user(&self, user_id: &str) -> Result<bool> {
        let path = format!("/{}/{}", api::USERS, user_id);
        self.delete_by_path(&path, &format!("delete user '{}'", user_id))
            .await
    }
}
