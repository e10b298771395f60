//! Derived view pipeline: snapshot → text filter → sort → page slice.
//!
//! Every stage is pure and works on indices into the snapshot, so the
//! snapshot itself is never reordered or mutated.

use super::row::TableRow;
use super::state::{PageState, SortDirection, SortState};

/// Indices of rows containing `text`, ignoring case; empty text passes every row.
pub fn filter_indices<T: TableRow>(rows: &[T], text: &str) -> Vec<usize> {
    let needle = text.to_lowercase();
    if needle.is_empty() {
        return (0..rows.len()).collect();
    }
    rows.iter()
        .enumerate()
        .filter(|(_, row)| row.matches(&needle))
        .map(|(idx, _)| idx)
        .collect()
}

/// Stable sort of `indices` by the active sort; no sort keeps fetch order.
pub fn sort_indices<T: TableRow>(
    rows: &[T],
    indices: &mut [usize],
    sort: Option<&SortState<T::Field>>,
) {
    let Some(sort) = sort else {
        return;
    };
    indices.sort_by(|&a, &b| {
        let ord = rows[a]
            .sort_key(sort.field)
            .compare(&rows[b].sort_key(sort.field));
        match sort.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
}

/// Filter then sort, returning the full (unsliced) ordered view.
pub fn derive<T: TableRow>(
    rows: &[T],
    text: &str,
    sort: Option<&SortState<T::Field>>,
) -> Vec<usize> {
    let mut indices = filter_indices(rows, text);
    sort_indices(rows, &mut indices, sort);
    indices
}

/// The slice of `view` shown on the current page.
pub fn page_slice<'a>(view: &'a [usize], page: &PageState) -> &'a [usize] {
    &view[page.range(view.len())]
}
