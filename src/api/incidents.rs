//! Incident sources: the admin table and the signed-in user's own reports.

use async_trait::async_trait;

use super::ApiClient;
use crate::errors::AppError;
use crate::models::{Incident, IncidentStatus, UpdateStatusRequest};
use crate::session::{require_admin, require_token};
use crate::view::{Collaborator, RowId};

const INCIDENTS_PATH: &str = "/api/incidents";
const MY_INCIDENTS_PATH: &str = "/api/incidents/mine";

/// Every incident, with status changes and deletion. Administrators only.
#[derive(Clone)]
pub struct IncidentAdminSource {
    client: ApiClient,
}

impl IncidentAdminSource {
    pub fn new(client: ApiClient) -> Result<Self, AppError> {
        require_admin(client.session())?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Collaborator<Incident> for IncidentAdminSource {
    /// GET /api/incidents
    async fn list(&self) -> Result<Vec<Incident>, AppError> {
        self.client.get_json(INCIDENTS_PATH).await
    }

    /// PUT /api/incidents/:id/status
    async fn update_field(&self, id: RowId, value: &IncidentStatus) -> Result<(), AppError> {
        let body = UpdateStatusRequest { status: *value };
        self.client
            .put_json(&format!("{}/{}/status", INCIDENTS_PATH, id), &body)
            .await
    }

    /// DELETE /api/incidents/:id
    async fn remove(&self, id: RowId) -> Result<(), AppError> {
        self.client
            .delete(&format!("{}/{}", INCIDENTS_PATH, id))
            .await
    }
}

/// Incidents reported by the signed-in user. Status is read-only here.
#[derive(Clone)]
pub struct MyIncidentsSource {
    client: ApiClient,
}

impl MyIncidentsSource {
    pub fn new(client: ApiClient) -> Result<Self, AppError> {
        require_token(client.session())?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Collaborator<Incident> for MyIncidentsSource {
    /// GET /api/incidents/mine
    async fn list(&self) -> Result<Vec<Incident>, AppError> {
        self.client.get_json(MY_INCIDENTS_PATH).await
    }

    /// DELETE /api/incidents/:id
    async fn remove(&self, id: RowId) -> Result<(), AppError> {
        self.client
            .delete(&format!("{}/{}", INCIDENTS_PATH, id))
            .await
    }
}
