//! HTML rendering of the table area and the console page.

use crate::console::{PageView, StatusLine, TableView};
use std::fmt::Write;

/// Escape text for HTML element content and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the data container followed by the pagination bar.
///
/// The pagination bar is always emitted so the page layout is stable; it is
/// `display: none` unless the table has more than one page.
pub fn render_table(view: &TableView) -> String {
    let mut html = String::new();
    html.push_str("<div id=\"data-container\">\n");

    match view {
        TableView::Blank => {}
        TableView::Empty { message } => {
            let _ = writeln!(html, "<p class=\"empty\">{}</p>", escape(message));
        }
        TableView::Table(page) => write_table(&mut html, page),
        TableView::Error(panel) => {
            let _ = writeln!(
                html,
                "<div class=\"error\"><strong>✗ SQL execution error:</strong> {}</div>",
                escape(&panel.message)
            );
        }
    }

    html.push_str("</div>\n");
    write_pagination(&mut html, view);
    html
}

fn write_table(html: &mut String, page: &PageView) {
    let _ = writeln!(
        html,
        "<div class=\"summary\"><strong>Query result:</strong> {} rows</div>",
        page.total_rows
    );
    html.push_str("<table class=\"data-table\">\n<thead>\n<tr>");
    for header in &page.headers {
        let _ = write!(html, "<th>{}</th>", escape(header));
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");
    for row in &page.rows {
        html.push_str("<tr>");
        for cell in row {
            let _ = write!(html, "<td>{}</td>", escape(cell));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n</table>\n");
}

fn write_pagination(html: &mut String, view: &TableView) {
    let display = if view.pagination_visible() { "flex" } else { "none" };
    let _ = writeln!(html, "<div id=\"pagination\" style=\"display: {}\">", display);

    if let TableView::Table(page) = view {
        let prev = if page.page <= 1 { " disabled" } else { "" };
        let next = if page.page >= page.page_count { " disabled" } else { "" };
        let _ = writeln!(html, "<button data-step=\"-1\"{}>Previous</button>", prev);
        let _ = writeln!(html, "<span id=\"page-info\">{}</span>", page.page_info());
        let _ = writeln!(html, "<button data-step=\"1\"{}>Next</button>", next);
    }

    html.push_str("</div>\n");
}

/// Standalone HTML document with the status line, SQL editor and table area.
pub fn render_document(status: &StatusLine, sql: &str, view: &TableView) -> String {
    let mut html = String::from(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>DataInsight Console</title>\n\
         <style>\n\
         .data-table { border-collapse: collapse; }\n\
         .data-table th, .data-table td { border: 1px solid #dee2e6; padding: 4px 8px; }\n\
         .data-table tbody tr:nth-child(even) { background: #f8f9fa; }\n\
         .error { color: #dc3545; }\n\
         .empty { color: #6c757d; text-align: center; }\n\
         </style>\n</head>\n<body>\n",
    );

    let _ = writeln!(
        html,
        "<div id=\"status\" style=\"color: {}\">{}</div>",
        status.level.css_color(),
        escape(&status.message)
    );
    let _ = writeln!(
        html,
        "<textarea id=\"sql-editor\" readonly>{}</textarea>",
        escape(sql)
    );
    html.push_str(&render_table(view));
    html.push_str("</body>\n</html>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::{build_view, ErrorPanel, Pagination, EMPTY_MESSAGE};
    use crate::types::ResultSet;
    use serde_json::json;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<script>alert("x" & 'y')</script>"#),
            "&lt;script&gt;alert(&quot;x&quot; &amp; &#39;y&#39;)&lt;/script&gt;"
        );
    }

    #[test]
    fn test_empty_state() {
        let html = render_table(&build_view(&ResultSet::new(), &Pagination::new(10)));
        assert!(html.contains(EMPTY_MESSAGE));
        assert!(!html.contains("<table"));
        assert!(html.contains("id=\"pagination\" style=\"display: none\""));
    }

    #[test]
    fn test_table_cells_escaped() {
        let rows = ResultSet::from_json(json!([{"name": "<b>bold</b>", "qty": 0}])).unwrap();
        let html = render_table(&build_view(&rows, &Pagination::new(10)));

        assert!(html.contains("<th>name</th><th>qty</th>"));
        assert!(html.contains("<td>&lt;b&gt;bold&lt;/b&gt;</td><td>0</td>"));
        assert!(html.contains("1 rows"));
        assert!(html.contains("display: none"));
    }

    #[test]
    fn test_multi_page_shows_controls() {
        let rows: Vec<_> = (0..25).map(|i| json!({"n": i})).collect();
        let rows = ResultSet::from_json(json!(rows)).unwrap();
        let html = render_table(&build_view(&rows, &Pagination::new(10)));

        assert!(html.contains("display: flex"));
        assert!(html.contains("<span id=\"page-info\">Page 1 of 3</span>"));
        assert!(html.contains("<button data-step=\"-1\" disabled>Previous</button>"));
        assert!(html.contains("<button data-step=\"1\">Next</button>"));
    }

    #[test]
    fn test_error_panel_hides_pagination() {
        let html = render_table(&TableView::Error(ErrorPanel {
            message: "no such table: x".to_string(),
        }));
        assert!(html.contains("class=\"error\""));
        assert!(html.contains("no such table: x"));
        assert!(html.contains("display: none"));
    }

    #[test]
    fn test_document_status_colour() {
        let doc = render_document(&StatusLine::error("boom"), "SELECT 1", &TableView::Blank);
        assert!(doc.contains("color: #dc3545\">boom</div>"));
        assert!(doc.contains(">SELECT 1</textarea>"));
    }
}
