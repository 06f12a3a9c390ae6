//! Render-ready snapshot of the table area.
//!
//! [`build_view`] is the pure part of table rendering: it slices the current
//! page and derives headers and cell text. The `render` module only turns
//! the resulting [`TableView`] into markup.

use crate::console::Pagination;
use crate::types::{cell_text, ResultSet};
use serde::Serialize;

pub const EMPTY_MESSAGE: &str = "Query returned no rows";

/// What the table area currently shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TableView {
    /// Nothing executed yet, or results cleared
    Blank,
    /// Query succeeded with zero rows
    Empty { message: String },
    /// One page of rows
    Table(PageView),
    /// Inline error panel from a failed execution
    Error(ErrorPanel),
}

impl TableView {
    /// Navigation controls are shown only for multi-page tables.
    pub fn pagination_visible(&self) -> bool {
        matches!(self, Self::Table(page) if page.page_count > 1)
    }
}

/// One page of a result set, as display strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageView {
    /// Column names, from the first row of this page
    pub headers: Vec<String>,

    /// Cell text, one inner vec per row, aligned with `headers`
    pub rows: Vec<Vec<String>>,

    /// Rows in the whole result set
    pub total_rows: usize,

    /// Current page (1-based)
    pub page: usize,

    pub page_count: usize,

    /// 1-based index of this page's first row within the result set
    pub first_row: usize,
}

impl PageView {
    pub fn page_info(&self) -> String {
        format!("Page {} of {}", self.page, self.page_count)
    }
}

/// Error shown in place of the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorPanel {
    pub message: String,
}

/// Build the view for the current page of `rows`.
pub fn build_view(rows: &ResultSet, pagination: &Pagination) -> TableView {
    if rows.is_empty() {
        return TableView::Empty {
            message: EMPTY_MESSAGE.to_string(),
        };
    }

    let total_rows = rows.len();
    let bounds = pagination.bounds(total_rows);
    let page_rows = &rows.rows()[bounds.clone()];

    let headers: Vec<String> = page_rows
        .first()
        .map(|row| row.keys().cloned().collect())
        .unwrap_or_default();

    let cells = page_rows
        .iter()
        .map(|row| headers.iter().map(|h| cell_text(row.get(h))).collect())
        .collect();

    TableView::Table(PageView {
        headers,
        rows: cells,
        total_rows,
        page: pagination.page(),
        page_count: pagination.page_count(total_rows),
        first_row: bounds.start + 1,
    })
}
