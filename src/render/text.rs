//! Plain-text rendering of the table area for the terminal.

use crate::console::{PageView, TableView};

/// Maximum column width before truncation
const MAX_COLUMN_WIDTH: usize = 32;

/// Truncate a string to max width with ellipsis
fn truncate_value(value: &str, max_width: usize) -> String {
    if value.chars().count() <= max_width {
        value.to_string()
    } else {
        let take = max_width.saturating_sub(3);
        format!("{}...", value.chars().take(take).collect::<String>())
    }
}

/// Single-line cell text: newlines and tabs become spaces.
fn flatten(value: &str) -> String {
    value.replace(['\n', '\r', '\t'], " ")
}

/// Render the table area as aligned text.
pub fn render_table(view: &TableView) -> String {
    match view {
        TableView::Blank => String::new(),
        TableView::Empty { message } => format!("{}\n", message),
        TableView::Error(panel) => format!("✗ SQL execution error: {}\n", panel.message),
        TableView::Table(page) => render_page(page),
    }
}

fn render_page(page: &PageView) -> String {
    let headers: Vec<String> = page
        .headers
        .iter()
        .map(|h| truncate_value(&flatten(h), MAX_COLUMN_WIDTH))
        .collect();
    let rows: Vec<Vec<String>> = page
        .rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|c| truncate_value(&flatten(c), MAX_COLUMN_WIDTH))
                .collect()
        })
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let line = |cells: &[String]| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{:<width$}", c, width = *w))
            .collect();
        format!("| {} |", padded.join(" | "))
    };
    let separator = format!(
        "+{}+",
        widths
            .iter()
            .map(|w| "-".repeat(w + 2))
            .collect::<Vec<_>>()
            .join("+")
    );

    let mut out = String::new();
    out.push_str(&separator);
    out.push('\n');
    out.push_str(&line(&headers));
    out.push('\n');
    out.push_str(&separator);
    out.push('\n');
    for row in &rows {
        out.push_str(&line(row));
        out.push('\n');
    }
    out.push_str(&separator);
    out.push('\n');

    let last_row = page.first_row + page.rows.len() - 1;
    out.push_str(&format!(
        "Rows {}-{} of {}",
        page.first_row, last_row, page.total_rows
    ));
    if page.page_count > 1 {
        out.push_str(&format!(" | {}", page.page_info()));
    }
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::{build_view, ErrorPanel, Pagination};
    use crate::types::ResultSet;
    use serde_json::json;

    #[test]
    fn test_aligned_columns() {
        let rows = ResultSet::from_json(json!([
            {"id": 1, "name": "alice"},
            {"id": 22, "name": "bo"}
        ]))
        .unwrap();
        let out = render_table(&build_view(&rows, &Pagination::new(10)));
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "+----+-------+");
        assert_eq!(lines[1], "| id | name  |");
        assert_eq!(lines[3], "| 1  | alice |");
        assert_eq!(lines[4], "| 22 | bo    |");
        assert_eq!(lines[6], "Rows 1-2 of 2");
    }

    #[test]
    fn test_page_footer() {
        let rows: Vec<_> = (1..=25).map(|i| json!({"n": i})).collect();
        let rows = ResultSet::from_json(json!(rows)).unwrap();
        let mut pagination = Pagination::new(10);
        pagination.go_to(3, 25);

        let out = render_table(&build_view(&rows, &pagination));
        assert!(out.ends_with("Rows 21-25 of 25 | Page 3 of 3\n"));
    }

    #[test]
    fn test_truncation() {
        let long = "x".repeat(40);
        assert_eq!(truncate_value(&long, 32).chars().count(), 32);
        assert!(truncate_value(&long, 32).ends_with("..."));
        assert_eq!(truncate_value("short", 32), "short");
    }

    #[test]
    fn test_non_table_views() {
        assert_eq!(render_table(&TableView::Blank), "");
        let out = render_table(&TableView::Error(ErrorPanel {
            message: "bad sql".to_string(),
        }));
        assert_eq!(out, "✗ SQL execution error: bad sql\n");
    }
}
