//! Column definitions for incidents and users.

use std::str::FromStr;

use super::row::{RowId, SortKey, TableRow};
use crate::errors::AppError;
use crate::models::{Incident, IncidentStatus, User, UserRole};

/// Columns of the incident tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IncidentField {
    Id,
    Title,
    Description,
    Category,
    Status,
    ReportedBy,
    Address,
    Likes,
    Comments,
    CreatedAt,
}

const INCIDENT_SEARCH: &[IncidentField] = &[
    IncidentField::Title,
    IncidentField::Description,
    IncidentField::Category,
    IncidentField::Status,
    IncidentField::ReportedBy,
    IncidentField::Address,
];

const INCIDENT_COLUMNS: &[IncidentField] = &[
    IncidentField::Id,
    IncidentField::Title,
    IncidentField::Category,
    IncidentField::Status,
    IncidentField::ReportedBy,
    IncidentField::Likes,
    IncidentField::CreatedAt,
];

impl FromStr for IncidentField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "id" => Ok(IncidentField::Id),
            "title" => Ok(IncidentField::Title),
            "description" => Ok(IncidentField::Description),
            "category" => Ok(IncidentField::Category),
            "status" => Ok(IncidentField::Status),
            "reported_by" | "reportedby" | "reporter" => Ok(IncidentField::ReportedBy),
            "address" => Ok(IncidentField::Address),
            "likes" => Ok(IncidentField::Likes),
            "comments" => Ok(IncidentField::Comments),
            "created_at" | "createdat" | "date" => Ok(IncidentField::CreatedAt),
            other => Err(AppError::Validation(format!(
                "Unknown incident field '{}'",
                other
            ))),
        }
    }
}

impl TableRow for Incident {
    type Field = IncidentField;
    type Patch = IncidentStatus;

    fn id(&self) -> RowId {
        self.id
    }

    fn search_fields() -> &'static [IncidentField] {
        INCIDENT_SEARCH
    }

    fn columns() -> &'static [IncidentField] {
        INCIDENT_COLUMNS
    }

    fn label(field: IncidentField) -> &'static str {
        match field {
            IncidentField::Id => "ID",
            IncidentField::Title => "Title",
            IncidentField::Description => "Description",
            IncidentField::Category => "Category",
            IncidentField::Status => "Status",
            IncidentField::ReportedBy => "Reported by",
            IncidentField::Address => "Address",
            IncidentField::Likes => "Likes",
            IncidentField::Comments => "Comments",
            IncidentField::CreatedAt => "Created",
        }
    }

    fn text(&self, field: IncidentField) -> String {
        match field {
            IncidentField::Id => self.id.to_string(),
            IncidentField::Title => self.title.clone(),
            IncidentField::Description => self.description.clone(),
            IncidentField::Category => self.category.clone(),
            IncidentField::Status => self.status.as_str().to_string(),
            IncidentField::ReportedBy => self.reported_by.clone(),
            IncidentField::Address => self.address.clone().unwrap_or_default(),
            IncidentField::Likes => self.likes.to_string(),
            IncidentField::Comments => self.comment_count.to_string(),
            IncidentField::CreatedAt => self.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }

    fn sort_key(&self, field: IncidentField) -> SortKey {
        match field {
            IncidentField::Id => self.id.into(),
            IncidentField::Likes => self.likes.into(),
            IncidentField::Comments => self.comment_count.into(),
            IncidentField::CreatedAt => self.created_at.timestamp_millis().into(),
            IncidentField::Address => self.address.as_deref().into(),
            other => SortKey::Text(self.text(other)),
        }
    }

    fn apply_patch(&mut self, patch: &IncidentStatus) {
        self.status = *patch;
    }
}

/// Columns of the user admin table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserField {
    Id,
    Name,
    Email,
    Role,
    CreatedAt,
}

const USER_SEARCH: &[UserField] = &[UserField::Name, UserField::Email, UserField::Role];

const USER_COLUMNS: &[UserField] = &[
    UserField::Id,
    UserField::Name,
    UserField::Email,
    UserField::Role,
    UserField::CreatedAt,
];

impl FromStr for UserField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "id" => Ok(UserField::Id),
            "name" => Ok(UserField::Name),
            "email" => Ok(UserField::Email),
            "role" => Ok(UserField::Role),
            "created_at" | "createdat" | "date" => Ok(UserField::CreatedAt),
            other => Err(AppError::Validation(format!(
                "Unknown user field '{}'",
                other
            ))),
        }
    }
}

impl TableRow for User {
    type Field = UserField;
    type Patch = UserRole;

    fn id(&self) -> RowId {
        self.id
    }

    fn search_fields() -> &'static [UserField] {
        USER_SEARCH
    }

    fn columns() -> &'static [UserField] {
        USER_COLUMNS
    }

    fn label(field: UserField) -> &'static str {
        match field {
            UserField::Id => "ID",
            UserField::Name => "Name",
            UserField::Email => "Email",
            UserField::Role => "Role",
            UserField::CreatedAt => "Created",
        }
    }

    fn text(&self, field: UserField) -> String {
        match field {
            UserField::Id => self.id.to_string(),
            UserField::Name => self.name.clone(),
            UserField::Email => self.email.clone(),
            UserField::Role => self.role.as_str().to_string(),
            UserField::CreatedAt => self
                .created_at
                .map(|t| t.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        }
    }

    fn sort_key(&self, field: UserField) -> SortKey {
        match field {
            UserField::Id => self.id.into(),
            UserField::CreatedAt => self.created_at.map(|t| t.timestamp_millis()).into(),
            other => SortKey::Text(self.text(other)),
        }
    }

    fn apply_patch(&mut self, patch: &UserRole) {
        self.role = *patch;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn incident(address: Option<&str>) -> Incident {
        Incident {
            id: 3,
            title: "Semáforo apagado".into(),
            description: "Cruce peligroso".into(),
            category: "Tránsito".into(),
            status: IncidentStatus::Pendiente,
            latitude: 0.0,
            longitude: 0.0,
            address: address.map(String::from),
            reported_by: "lucia".into(),
            likes: 4,
            comment_count: 1,
            created_at: Utc.with_ymd_and_hms(2024, 3, 2, 8, 30, 0).unwrap(),
        }
    }

    #[test]
    fn test_incident_matches_any_search_field() {
        let row = incident(Some("Av. Grau 120"));
        assert!(row.matches("grau"));
        assert!(row.matches("pendiente"));
        assert!(row.matches("peligroso"));
        assert!(!row.matches("lima"));
    }

    #[test]
    fn test_incident_likes_is_not_searchable() {
        assert!(!incident(None).matches("4"));
    }

    #[test]
    fn test_missing_address_sorts_as_missing() {
        assert_eq!(
            incident(None).sort_key(IncidentField::Address),
            SortKey::Missing
        );
    }

    #[test]
    fn test_field_parsing() {
        assert_eq!(
            "reported_by".parse::<IncidentField>().unwrap(),
            IncidentField::ReportedBy
        );
        assert_eq!("Role".parse::<UserField>().unwrap(), UserField::Role);
        assert!("color".parse::<UserField>().is_err());
    }

    #[test]
    fn test_patch_changes_only_status() {
        let mut row = incident(None);
        let before = row.clone();
        row.apply_patch(&IncidentStatus::Resuelto);
        assert_eq!(row.status, IncidentStatus::Resuelto);
        assert_eq!(row.title, before.title);
        assert_eq!(row.likes, before.likes);
    }
}
