use super::Collection;
use crate::client::ApiClient;
use crate::errors::{ApiResult, ValidationError};
use crate::models::{User, UserDraft};
use crate::validation::require;

#[derive(Debug, Clone)]
pub struct UsersManager {
    users: Collection<User>,
}

impl UsersManager {
    pub fn new(client: ApiClient) -> Self {
        Self {
            users: Collection::new(client, "users/"),
        }
    }

    pub async fn list(&self) -> ApiResult<Vec<User>> {
        self.users.list().await
    }

    pub async fn get(&self, id: i64) -> ApiResult<User> {
        self.users.get(id).await
    }

    /// New users need an email and a password.
    pub async fn create(&self, draft: &UserDraft) -> ApiResult<User> {
        require("email", &draft.email)?;
        require("password", draft.password.as_deref().unwrap_or_default())?;
        let user = self.users.create(draft).await?;
        tracing::info!(user_id = user.id, "user created");
        Ok(user)
    }

    /// A blank password in `draft` keeps the current one.
    pub async fn update(&self, id: i64, draft: &UserDraft) -> ApiResult<User> {
        require("email", &draft.email)?;
        self.users.update(id, draft).await
    }

    pub async fn delete(&self, user: &User) -> ApiResult<()> {
        if user.is_protected_admin() {
            return Err(ValidationError::ProtectedAccount("deleted").into());
        }
        self.users.delete(user.id).await?;
        tracing::info!(user_id = user.id, "user deleted");
        Ok(())
    }

    /// Flip `is_active`. The administrator account may be re-activated but
    /// never deactivated.
    pub async fn toggle_active(&self, user: &User) -> ApiResult<User> {
        if user.is_active && user.is_protected_admin() {
            return Err(ValidationError::ProtectedAccount("deactivated").into());
        }
        let body = serde_json::json!({ "is_active": !user.is_active });
        self.users.update(user.id, &body).await
    }
}
