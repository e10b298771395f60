//! Tabular data view.
//!
//! Holds one collection snapshot and derives the visible page from it:
//! snapshot → text filter → sort → page slice. Row actions go through a
//! [`Collaborator`] and are followed by an in-place patch or a full reload,
//! chosen per action type by [`ActionPolicies`].

mod collaborator;
mod columns;
mod menu;
pub mod pipeline;
mod row;
mod state;

pub use collaborator::*;
pub use columns::*;
pub use menu::*;
pub use row::*;
pub use state::*;

use std::sync::Arc;

use crate::errors::AppError;
use crate::notify::{LogNotifier, Notifier};

/// Row-scoped action requested by the user.
#[derive(Debug, Clone, PartialEq)]
pub enum RowAction<P> {
    /// Change the row's patchable field (status, role).
    Update(P),
    Delete,
}

/// What the view does after the backend accepted an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionPolicy {
    /// Apply the change to the local snapshot.
    Patch,
    /// Fetch the whole collection again.
    Reload,
}

/// Follow-up policy per action type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionPolicies {
    pub update: ActionPolicy,
    pub delete: ActionPolicy,
}

impl Default for ActionPolicies {
    fn default() -> Self {
        Self {
            update: ActionPolicy::Patch,
            delete: ActionPolicy::Reload,
        }
    }
}

/// Result of a successful row action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The row was changed in place.
    Patched,
    /// The row was dropped from the local snapshot.
    Removed,
    /// The collection must be fetched again before it reflects the action.
    ReloadRequired,
    /// The collection was fetched again.
    Reloaded,
}

/// Filterable, sortable, paginated view over one collection snapshot.
pub struct DataView<T: TableRow> {
    name: &'static str,
    source: Arc<dyn Collaborator<T>>,
    notifier: Arc<dyn Notifier>,
    policies: ActionPolicies,
    rows: Vec<T>,
    filter: String,
    sort: Option<SortState<T::Field>>,
    page: PageState,
    view: Vec<usize>,
    load_error: Option<AppError>,
    action_error: Option<(RowId, AppError)>,
    menu: RowMenu,
}

impl<T: TableRow> DataView<T> {
    /// Create an empty view; call [`DataView::load`] to fill it.
    pub fn new(name: &'static str, source: Arc<dyn Collaborator<T>>) -> Self {
        Self {
            name,
            source,
            notifier: Arc::new(LogNotifier),
            policies: ActionPolicies::default(),
            rows: Vec::new(),
            filter: String::new(),
            sort: None,
            page: PageState::default(),
            view: Vec::new(),
            load_error: None,
            action_error: None,
            menu: RowMenu::default(),
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page = PageState::new(page_size);
        self
    }

    pub fn with_policies(mut self, policies: ActionPolicies) -> Self {
        self.policies = policies;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    // ==================== LOADING ====================

    /// Fetch the full collection and replace the snapshot.
    ///
    /// Returns the number of rows loaded. On failure the snapshot is kept
    /// and [`DataView::load_error`] is set; there is no retry.
    pub async fn load(&mut self) -> Result<usize, AppError> {
        let result = self.source.list().await;
        self.apply_load(result)
    }

    /// Apply the result of a `list()` call made elsewhere.
    pub fn apply_load(&mut self, result: Result<Vec<T>, AppError>) -> Result<usize, AppError> {
        match result {
            Ok(rows) => {
                tracing::debug!(view = self.name, rows = rows.len(), "Collection loaded");
                self.rows = rows;
                self.load_error = None;
                self.page.reset();
                self.refresh();
                Ok(self.rows.len())
            }
            Err(e) => {
                tracing::error!(view = self.name, "Failed to load collection: {}", e);
                self.load_error = Some(e.clone());
                Err(e)
            }
        }
    }

    /// Replace the snapshot with a pushed update, keeping the current page when it still exists.
    pub fn replace_snapshot(&mut self, rows: Vec<T>) {
        self.rows = rows;
        self.load_error = None;
        self.refresh();
    }

    // ==================== INTERACTION ====================

    /// Set the search text and return to the first page.
    pub fn set_filter_text(&mut self, text: impl Into<String>) {
        self.filter = text.into();
        self.page.reset();
        self.refresh();
    }

    /// Sort by `field`, flipping the direction if it is already the active field.
    pub fn request_sort(&mut self, field: T::Field) {
        self.sort = Some(SortState::toggle(self.sort, field));
        self.refresh();
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page.set_page_size(page_size);
    }

    /// Jump to page `page`, clamped into the valid range.
    pub fn go_to_page(&mut self, page: i64) {
        self.page.go_to(page, self.view.len());
    }

    pub fn menu(&self) -> &RowMenu {
        &self.menu
    }

    pub fn menu_mut(&mut self) -> &mut RowMenu {
        &mut self.menu
    }

    // ==================== ROW ACTIONS ====================

    /// Run `action` on row `id` against the backend and fold the result into the view.
    pub async fn perform_row_action(
        &mut self,
        id: RowId,
        action: RowAction<T::Patch>,
    ) -> Result<ActionOutcome, AppError> {
        self.menu.dismiss();
        let result = match &action {
            RowAction::Update(value) => self.source.update_field(id, value).await,
            RowAction::Delete => self.source.remove(id).await,
        };

        match self.apply_action_result(id, &action, result)? {
            ActionOutcome::ReloadRequired => {
                self.load().await?;
                Ok(ActionOutcome::Reloaded)
            }
            outcome => Ok(outcome),
        }
    }

    /// Fold the backend's answer to a row action into the snapshot.
    ///
    /// On failure the snapshot is left untouched, the error is logged and
    /// reported to the notifier. `ReloadRequired` tells the caller to run
    /// [`DataView::load`].
    pub fn apply_action_result(
        &mut self,
        id: RowId,
        action: &RowAction<T::Patch>,
        result: Result<(), AppError>,
    ) -> Result<ActionOutcome, AppError> {
        if let Err(e) = result {
            tracing::error!(view = self.name, row = id, "Row action failed: {}", e);
            self.notifier.error(&format!("Row {} could not be changed: {}", id, e.message()));
            self.action_error = Some((id, e.clone()));
            return Err(e);
        }
        self.action_error = None;

        let outcome = match action {
            RowAction::Update(value) => {
                self.notifier.success(&format!("Row {} updated", id));
                match self.policies.update {
                    ActionPolicy::Patch => self.patch_row(id, value),
                    ActionPolicy::Reload => ActionOutcome::ReloadRequired,
                }
            }
            RowAction::Delete => {
                self.notifier.success(&format!("Row {} deleted", id));
                match self.policies.delete {
                    ActionPolicy::Patch => self.remove_row(id),
                    ActionPolicy::Reload => ActionOutcome::ReloadRequired,
                }
            }
        };
        Ok(outcome)
    }

    fn patch_row(&mut self, id: RowId, value: &T::Patch) -> ActionOutcome {
        match self.rows.iter_mut().find(|row| row.id() == id) {
            Some(row) => {
                row.apply_patch(value);
                self.refresh();
                ActionOutcome::Patched
            }
            None => {
                tracing::warn!(view = self.name, row = id, "Updated row is not in the snapshot");
                ActionOutcome::ReloadRequired
            }
        }
    }

    fn remove_row(&mut self, id: RowId) -> ActionOutcome {
        match self.rows.iter().position(|row| row.id() == id) {
            Some(pos) => {
                self.rows.remove(pos);
                self.refresh();
                ActionOutcome::Removed
            }
            None => {
                tracing::warn!(view = self.name, row = id, "Deleted row is not in the snapshot");
                ActionOutcome::ReloadRequired
            }
        }
    }

    // ==================== DERIVED VIEW ====================

    fn refresh(&mut self) {
        self.view = pipeline::derive(&self.rows, &self.filter, self.sort.as_ref());
        self.page.clamp(self.view.len());
    }

    /// The full collection snapshot, in backend order.
    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn row(&self, id: RowId) -> Option<&T> {
        self.rows.iter().find(|row| row.id() == id)
    }

    /// Every row passing the filter, in sorted order.
    pub fn filtered_rows(&self) -> Vec<&T> {
        self.view.iter().map(|&idx| &self.rows[idx]).collect()
    }

    /// Rows on the current page.
    pub fn page_rows(&self) -> Vec<&T> {
        pipeline::page_slice(&self.view, &self.page)
            .iter()
            .map(|&idx| &self.rows[idx])
            .collect()
    }

    pub fn filtered_count(&self) -> usize {
        self.view.len()
    }

    pub fn total_pages(&self) -> usize {
        self.page.total_pages(self.view.len())
    }

    pub fn current_page(&self) -> usize {
        self.page.current_page()
    }

    pub fn page_size(&self) -> usize {
        self.page.page_size()
    }

    pub fn filter_text(&self) -> &str {
        &self.filter
    }

    pub fn sort(&self) -> Option<SortState<T::Field>> {
        self.sort
    }

    /// Error of the last failed `load()`; while set the table should not be rendered.
    pub fn load_error(&self) -> Option<&AppError> {
        self.load_error.as_ref()
    }

    pub fn is_blocked(&self) -> bool {
        self.load_error.is_some()
    }

    /// Error of the last failed row action, if the most recent action failed.
    pub fn action_error(&self) -> Option<&(RowId, AppError)> {
        self.action_error.as_ref()
    }
}
