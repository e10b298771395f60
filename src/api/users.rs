//! User admin source.

use async_trait::async_trait;

use super::ApiClient;
use crate::errors::AppError;
use crate::models::{UpdateRoleRequest, User, UserRole};
use crate::session::require_admin;
use crate::view::{Collaborator, RowId};

const USERS_PATH: &str = "/api/users";

/// Every account, with role changes and deletion. Administrators only.
#[derive(Clone)]
pub struct UserAdminSource {
    client: ApiClient,
}

impl UserAdminSource {
    pub fn new(client: ApiClient) -> Result<Self, AppError> {
        require_admin(client.session())?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Collaborator<User> for UserAdminSource {
    /// GET /api/users
    async fn list(&self) -> Result<Vec<User>, AppError> {
        self.client.get_json(USERS_PATH).await
    }

    /// PUT /api/users/:id/role
    async fn update_field(&self, id: RowId, value: &UserRole) -> Result<(), AppError> {
        let body = UpdateRoleRequest { role: *value };
        self.client
            .put_json(&format!("{}/{}/role", USERS_PATH, id), &body)
            .await
    }

    /// DELETE /api/users/:id
    async fn remove(&self, id: RowId) -> Result<(), AppError> {
        self.client.delete(&format!("{}/{}", USERS_PATH, id)).await
    }
}
