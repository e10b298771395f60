//! Sort and page state of a data view.

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Direction of the active sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// The single active (field, direction) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState<F> {
    pub field: F,
    pub direction: SortDirection,
}

impl<F: Copy + Eq> SortState<F> {
    pub fn ascending(field: F) -> Self {
        Self {
            field,
            direction: SortDirection::Ascending,
        }
    }

    /// Next sort state after the user selects `field`.
    ///
    /// Re-selecting the active field flips the direction; a new field starts ascending.
    pub fn toggle(current: Option<Self>, field: F) -> Self {
        match current {
            Some(state) if state.field == field => Self {
                field,
                direction: state.direction.flipped(),
            },
            _ => Self::ascending(field),
        }
    }
}

/// 1-indexed pagination state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    page_size: usize,
    current_page: usize,
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl PageState {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            current_page: 1,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Number of pages for `count` rows; never less than one.
    pub fn total_pages(&self, count: usize) -> usize {
        count.div_ceil(self.page_size).max(1)
    }

    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// Change the page size and return to the first page. Zero is coerced to one.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.current_page = 1;
    }

    /// Move to page `page`, clamped into `[1, total_pages(count)]`.
    pub fn go_to(&mut self, page: i64, count: usize) {
        let last = self.total_pages(count) as i64;
        self.current_page = page.clamp(1, last) as usize;
    }

    /// Pull the current page back into range after the row count shrank.
    pub fn clamp(&mut self, count: usize) {
        let last = self.total_pages(count);
        if self.current_page > last {
            self.current_page = last;
        }
    }

    /// Index range of the current page within a list of `count` rows.
    pub fn range(&self, count: usize) -> std::ops::Range<usize> {
        let start = ((self.current_page - 1) * self.page_size).min(count);
        let end = (start + self.page_size).min(count);
        start..end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Col {
        A,
        B,
    }

    #[test]
    fn test_sort_toggle_sequence() {
        let first = SortState::toggle(None, Col::A);
        assert_eq!(first.direction, SortDirection::Ascending);

        let second = SortState::toggle(Some(first), Col::A);
        assert_eq!(second.direction, SortDirection::Descending);

        let third = SortState::toggle(Some(second), Col::A);
        assert_eq!(third.direction, SortDirection::Ascending);

        let other = SortState::toggle(Some(second), Col::B);
        assert_eq!(other, SortState::ascending(Col::B));
    }

    #[test]
    fn test_total_pages() {
        let page = PageState::new(10);
        assert_eq!(page.total_pages(0), 1);
        assert_eq!(page.total_pages(10), 1);
        assert_eq!(page.total_pages(12), 2);
    }

    #[test]
    fn test_go_to_clamps_both_ends() {
        let mut page = PageState::new(10);
        page.go_to(-5, 35);
        assert_eq!(page.current_page(), 1);
        page.go_to(1, 35);
        assert_eq!(page.current_page(), 1);
        page.go_to(10_000, 35);
        assert_eq!(page.current_page(), 4);
        page.go_to(10_000, 0);
        assert_eq!(page.current_page(), 1);
    }

    #[test]
    fn test_clamp_only_moves_down() {
        let mut page = PageState::new(5);
        page.go_to(3, 15);
        page.clamp(100);
        assert_eq!(page.current_page(), 3);
        page.clamp(6);
        assert_eq!(page.current_page(), 2);
    }

    #[test]
    fn test_zero_page_size_is_coerced() {
        let mut page = PageState::new(0);
        assert_eq!(page.page_size(), 1);
        page.set_page_size(0);
        assert_eq!(page.page_size(), 1);
    }

    #[test]
    fn test_range_of_last_partial_page() {
        let mut page = PageState::new(10);
        page.go_to(2, 12);
        assert_eq!(page.range(12), 10..12);
    }
}
