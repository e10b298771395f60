//! Contract between a data view and the service that reads and mutates its rows.

use async_trait::async_trait;

use super::row::{RowId, TableRow};
use crate::errors::AppError;

/// Backend operations a data view consumes.
#[async_trait]
pub trait Collaborator<T: TableRow>: Send + Sync {
    /// Fetch the full collection, in backend order.
    async fn list(&self) -> Result<Vec<T>, AppError>;

    /// Change the patchable field of one row.
    async fn update_field(&self, id: RowId, _value: &T::Patch) -> Result<(), AppError> {
        Err(AppError::Unsupported(format!(
            "Row {} cannot be updated from this table",
            id
        )))
    }

    async fn remove(&self, id: RowId) -> Result<(), AppError>;
}
