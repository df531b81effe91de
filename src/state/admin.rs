//! Staff-only user and category management.

use super::cell::StateCell;
use crate::api::ApiClient;
use crate::error::{ApiResult, ErrorContext, ResultExt};
use crate::models::{
    Category, CategoryDraft, ListPayload, MessageResponse, ToggleStatusResponse, User,
    UserStatistics,
};

const USERS_PATH: &str = "/api/users/management/";
const CATEGORIES_PATH: &str = "/api/blog/categories/manage/";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdminState {
    pub users: Vec<User>,
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone)]
pub struct AdminModule {
    api: ApiClient,
    state: StateCell<AdminState>,
}

impl AdminModule {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            state: StateCell::default(),
        }
    }

    pub fn users(&self) -> Vec<User> {
        self.state.read(|s| s.users.clone())
    }

    pub fn categories(&self) -> Vec<Category> {
        self.state.read(|s| s.categories.clone())
    }

    pub async fn list_users(&self) -> ApiResult<Vec<User>> {
        let users = self
            .api
            .get_json::<ListPayload<User>>(USERS_PATH)
            .await
            .with_context(|| ErrorContext::new("list_users").with_module("admin"))?
            .into_vec();
        self.state.update(|s| s.users = users.clone());
        Ok(users)
    }

    /// Enable or disable an account; the loaded entry is updated in place.
    pub async fn toggle_user_status(&self, user_id: u64) -> ApiResult<ToggleStatusResponse> {
        let response: ToggleStatusResponse = self
            .api
            .post_empty(&format!("{}{}/toggle-status/", USERS_PATH, user_id))
            .await
            .with_context(|| ErrorContext::new("toggle_user_status").with_module("admin"))?;
        self.state.update(|s| {
            if let Some(user) = s.users.iter_mut().find(|u| u.id == user_id) {
                user.is_active = response.is_active;
            }
        });
        Ok(response)
    }

    /// Reset an account's password to the backend default. Staff cannot reset
    /// their own.
    pub async fn reset_user_password(&self, user_id: u64) -> ApiResult<MessageResponse> {
        let response: MessageResponse = self
            .api
            .post_empty(&format!("{}{}/reset-password/", USERS_PATH, user_id))
            .await
            .with_context(|| ErrorContext::new("reset_user_password").with_module("admin"))?;
        tracing::info!(user_id, "Password reset");
        Ok(response)
    }

    /// Account counts. Returned, not stored.
    pub async fn user_statistics(&self) -> ApiResult<UserStatistics> {
        self.api
            .get_json(&format!("{}statistics/", USERS_PATH))
            .await
            .with_context(|| ErrorContext::new("user_statistics").with_module("admin"))
    }

    pub async fn list_categories(&self) -> ApiResult<Vec<Category>> {
        let categories = self
            .api
            .get_json::<ListPayload<Category>>(CATEGORIES_PATH)
            .await
            .with_context(|| ErrorContext::new("list_categories").with_module("admin"))?
            .into_vec();
        self.state.update(|s| s.categories = categories.clone());
        Ok(categories)
    }

    pub async fn create_category(&self, data: &CategoryDraft) -> ApiResult<Category> {
        let created: Category = self
            .api
            .post_json(CATEGORIES_PATH, data)
            .await
            .with_context(|| ErrorContext::new("create_category").with_module("admin"))?;
        self.state.update(|s| s.categories.push(created.clone()));
        Ok(created)
    }

    pub async fn delete_category(&self, id: u64) -> ApiResult<()> {
        self.api
            .delete(&format!("{}{}/", CATEGORIES_PATH, id))
            .await
            .with_context(|| ErrorContext::new("delete_category").with_module("admin"))?;
        self.state.update(|s| s.categories.retain(|c| c.id != id));
        Ok(())
    }
}
