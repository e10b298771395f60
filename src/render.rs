//! Plain-text rendering of a data view page.

use std::fmt::Write as _;

use crate::view::{DataView, SortDirection, TableRow};

/// Longest cell text before truncation.
const MAX_CELL_WIDTH: usize = 40;

fn truncate(text: &str) -> String {
    if text.chars().count() <= MAX_CELL_WIDTH {
        return text.to_string();
    }
    let mut out: String = text.chars().take(MAX_CELL_WIDTH - 1).collect();
    out.push('…');
    out
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
}

fn line(values: &[String], widths: &[usize]) -> String {
    values
        .iter()
        .zip(widths)
        .map(|(v, w)| pad(v, *w))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

/// Render the current page of `view`, or its load error when the view is blocked.
pub fn render_page<T: TableRow>(view: &DataView<T>) -> String {
    if let Some(err) = view.load_error() {
        return format!("Could not load {}: {}\n", view.name(), err.message());
    }

    let columns = T::columns();
    let sort = view.sort();
    let headers: Vec<String> = columns
        .iter()
        .map(|&field| {
            let label = T::label(field);
            match sort {
                Some(s) if s.field == field => match s.direction {
                    SortDirection::Ascending => format!("{} ▲", label),
                    SortDirection::Descending => format!("{} ▼", label),
                },
                _ => label.to_string(),
            }
        })
        .collect();

    let cells: Vec<Vec<String>> = view
        .page_rows()
        .iter()
        .map(|row| columns.iter().map(|&f| truncate(&row.text(f))).collect())
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            cells
                .iter()
                .map(|r| r[i].chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    let _ = writeln!(out, "{}", line(&headers, &widths));
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let _ = writeln!(out, "{}", line(&rule, &widths));
    if cells.is_empty() {
        let _ = writeln!(out, "(no rows)");
    }
    for row in &cells {
        let _ = writeln!(out, "{}", line(row, &widths));
    }

    let _ = write!(
        out,
        "Page {}/{} · {} of {} rows",
        view.current_page(),
        view.total_pages(),
        view.filtered_count(),
        view.rows().len()
    );
    if !view.filter_text().is_empty() {
        let _ = write!(out, " · search \"{}\"", view.filter_text());
    }
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_long_cells() {
        let long = "x".repeat(60);
        let cut = truncate(&long);
        assert_eq!(cut.chars().count(), MAX_CELL_WIDTH);
        assert!(cut.ends_with('…'));
        assert_eq!(truncate("corto"), "corto");
    }

    #[test]
    fn test_pad_counts_chars_not_bytes() {
        assert_eq!(pad("vía", 5), "vía  ");
    }
}
