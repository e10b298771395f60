//! Row action menu state: at most one row's menu is open at a time.

use super::row::RowId;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowMenu {
    open: Option<RowId>,
}

impl RowMenu {
    /// Open the menu of `id`, or close it if it is already open.
    pub fn toggle(&mut self, id: RowId) {
        self.open = if self.open == Some(id) { None } else { Some(id) };
    }

    /// Close whatever menu is open (outside click, escape, completed action).
    pub fn dismiss(&mut self) {
        self.open = None;
    }

    pub fn is_open(&self, id: RowId) -> bool {
        self.open == Some(id)
    }

    pub fn open_row(&self) -> Option<RowId> {
        self.open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_switches_between_rows() {
        let mut menu = RowMenu::default();
        menu.toggle(4);
        assert!(menu.is_open(4));
        menu.toggle(9);
        assert!(menu.is_open(9));
        assert!(!menu.is_open(4));
        menu.toggle(9);
        assert_eq!(menu.open_row(), None);
    }

    #[test]
    fn test_dismiss() {
        let mut menu = RowMenu::default();
        menu.toggle(1);
        menu.dismiss();
        assert_eq!(menu.open_row(), None);
    }
}
