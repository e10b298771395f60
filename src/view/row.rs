//! Row abstraction shared by every tabular view.

use std::cmp::Ordering;
use std::fmt::Debug;

/// Stable identifier of a row within a collection snapshot.
pub type RowId = i64;

/// Typed value used to order rows on one field.
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    Number(f64),
    Text(String),
    Missing,
}

impl SortKey {
    /// Total order over keys. Missing values sort after present ones.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a
                .to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b)),
            (SortKey::Missing, SortKey::Missing) => Ordering::Equal,
            (SortKey::Missing, _) => Ordering::Greater,
            (_, SortKey::Missing) => Ordering::Less,
            (SortKey::Number(_), SortKey::Text(_)) => Ordering::Less,
            (SortKey::Text(_), SortKey::Number(_)) => Ordering::Greater,
        }
    }
}

impl From<&str> for SortKey {
    fn from(value: &str) -> Self {
        SortKey::Text(value.to_string())
    }
}

impl From<i64> for SortKey {
    fn from(value: i64) -> Self {
        SortKey::Number(value as f64)
    }
}

impl<K: Into<SortKey>> From<Option<K>> for SortKey {
    fn from(value: Option<K>) -> Self {
        value.map(Into::into).unwrap_or(SortKey::Missing)
    }
}

/// A record that can be displayed, searched, sorted and patched by a data view.
pub trait TableRow: Clone + Send + Sync + 'static {
    /// Addressable columns of the row.
    type Field: Copy + Eq + Debug + Send + Sync + 'static;
    /// New value carried by an in-place update (status, role, ...).
    type Patch: Clone + Debug + Send + Sync + 'static;

    fn id(&self) -> RowId;

    /// Fields consulted by the free-text filter.
    fn search_fields() -> &'static [Self::Field];

    /// Fields rendered as table columns, in display order.
    fn columns() -> &'static [Self::Field];

    fn label(field: Self::Field) -> &'static str;

    /// Display text of one field.
    fn text(&self, field: Self::Field) -> String;

    fn sort_key(&self, field: Self::Field) -> SortKey;

    /// Apply an update that the backend accepted.
    fn apply_patch(&mut self, patch: &Self::Patch);

    /// Case-insensitive substring test across the search fields.
    ///
    /// `needle` must already be lowercased.
    fn matches(&self, needle: &str) -> bool {
        Self::search_fields()
            .iter()
            .any(|field| self.text(*field).to_lowercase().contains(needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_compare_numerically() {
        assert_eq!(
            SortKey::Number(9.0).compare(&SortKey::Number(10.0)),
            Ordering::Less
        );
    }

    #[test]
    fn test_text_compares_case_insensitively_first() {
        assert_eq!(
            SortKey::from("alba").compare(&SortKey::from("Bruno")),
            Ordering::Less
        );
        assert_ne!(
            SortKey::from("Ana").compare(&SortKey::from("ana")),
            Ordering::Equal
        );
    }

    #[test]
    fn test_missing_sorts_last() {
        let missing = SortKey::from(None::<&str>);
        assert_eq!(missing.compare(&SortKey::from("zeta")), Ordering::Greater);
        assert_eq!(SortKey::Number(1.0).compare(&missing), Ordering::Less);
        assert_eq!(missing.compare(&SortKey::Missing), Ordering::Equal);
    }
}
