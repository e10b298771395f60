//! Incident model matching the backend incident payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of an incident report.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum IncidentStatus {
    Pendiente,
    EnProceso,
    Resuelto,
    Rechazado,
}

impl IncidentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            IncidentStatus::Pendiente => "pendiente",
            IncidentStatus::EnProceso => "en_proceso",
            IncidentStatus::Resuelto => "resuelto",
            IncidentStatus::Rechazado => "rechazado",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace(' ', "_").as_str() {
            "pendiente" => Some(IncidentStatus::Pendiente),
            "en_proceso" => Some(IncidentStatus::EnProceso),
            "resuelto" => Some(IncidentStatus::Resuelto),
            "rechazado" => Some(IncidentStatus::Rechazado),
            _ => None,
        }
    }
}

impl std::fmt::Display for IncidentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An incident placed on the map by a user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    pub status: IncidentStatus,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default)]
    pub reported_by: String,
    #[serde(default)]
    pub likes: i64,
    #[serde(default)]
    pub comment_count: i64,
    pub created_at: DateTime<Utc>,
}

/// Request body for changing an incident's status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: IncidentStatus,
}
