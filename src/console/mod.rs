//! Query console view-model.
//!
//! `QueryConsole` owns everything the page shows: the natural-language
//! input, the SQL editor buffer, the result set with its pagination cursor,
//! the table area, the status line and the loading flag. Every operation
//! updates the status line; network operations toggle `loading` around the
//! backend call.
//!
//! Operations take `&mut self`, so one console runs one operation at a time
//! and a later response can never overwrite an earlier one out of order.
//!
//! # Example
//!
//! ```no_run
//! # use datainsight_console::{client::HttpBackend, config::ConsoleConfig, console::QueryConsole};
//! # async fn example() -> datainsight_console::types::Result<()> {
//! let config = ConsoleConfig::load()?;
//! let page_size = config.page_size;
//! let mut console = QueryConsole::new(HttpBackend::new(config)?, page_size);
//!
//! console.set_input("How many orders shipped last week?");
//! console.generate_sql().await?;
//! console.execute_sql().await?;
//! println!("{}", console.render_text());
//! # Ok(())
//! # }
//! ```

pub mod command;
pub mod pagination;
pub mod status;
pub mod view;

pub use command::{ClearTarget, ConsoleCommand};
pub use pagination::Pagination;
pub use status::{LoadingFlag, StatusLevel, StatusLine};
pub use view::{build_view, ErrorPanel, PageView, TableView, EMPTY_MESSAGE};

use crate::client::SqlBackend;
use crate::render;
use crate::types::{ConsoleError, RequestError, ResultSet, SchemaCatalog};
use std::io::Write;

/// Result of a console operation. The error is also reflected in the status line.
pub type Outcome = std::result::Result<(), ConsoleError>;

const GENERATE_FAILED: &str = "Request failed";
const EXECUTE_FAILED: &str = "SQL execution failed";
const SCHEMA_FAILED: &str = "Schema request failed";

/// Which content the table area holds.
#[derive(Debug, Clone, PartialEq)]
enum TableArea {
    Blank,
    Results,
    Error(ErrorPanel),
}

/// Single-page query console over an [`SqlBackend`].
pub struct QueryConsole<B> {
    backend: B,
    input: String,
    editor: String,
    results: ResultSet,
    pagination: Pagination,
    area: TableArea,
    status: StatusLine,
    loading: LoadingFlag,
    schema: Option<SchemaCatalog>,
}

impl<B: SqlBackend> QueryConsole<B> {
    pub fn new(backend: B, page_size: usize) -> Self {
        Self {
            backend,
            input: String::new(),
            editor: String::new(),
            results: ResultSet::new(),
            pagination: Pagination::new(page_size),
            area: TableArea::Blank,
            status: StatusLine::default(),
            loading: LoadingFlag::default(),
            schema: None,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Current SQL editor content.
    pub fn sql(&self) -> &str {
        &self.editor
    }

    pub fn results(&self) -> &ResultSet {
        &self.results
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn status(&self) -> &StatusLine {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_set()
    }

    /// Handle that keeps reporting the loading state while a request runs.
    pub fn loading_flag(&self) -> LoadingFlag {
        self.loading.clone()
    }

    pub fn schema(&self) -> Option<&SchemaCatalog> {
        self.schema.as_ref()
    }

    /// Number of pages in the table area; 0 unless it shows results.
    pub fn page_count(&self) -> usize {
        match self.area {
            TableArea::Results => self.pagination.page_count(self.results.len()),
            _ => 0,
        }
    }

    /// Replace the natural-language input (user typing).
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Replace the SQL editor content (user edits).
    pub fn set_sql(&mut self, sql: impl Into<String>) {
        self.editor = sql.into();
    }

    /// Put an example question into the input.
    pub fn fill_example(&mut self, text: impl Into<String>) {
        self.input = text.into();
        self.status = StatusLine::info("Example question filled");
    }

    /// Empty the input and drop the current result set.
    pub fn clear_input(&mut self) {
        self.input.clear();
        self.results = ResultSet::new();
        self.pagination.reset();
        self.area = TableArea::Blank;
        self.status = StatusLine::info("Input cleared");
    }

    /// Empty the SQL editor.
    pub fn clear_sql(&mut self) {
        self.editor.clear();
        self.status = StatusLine::info("SQL cleared");
    }

    /// Empty the editor and the table area.
    pub fn clear_results(&mut self) {
        self.editor.clear();
        self.results = ResultSet::new();
        self.pagination.reset();
        self.area = TableArea::Blank;
        self.status = StatusLine::info("Results cleared");
    }

    /// Write the editor content to `sink` (the CLI passes stdout).
    pub fn copy_sql<W: Write>(&mut self, sink: &mut W) -> Outcome {
        if self.editor.trim().is_empty() {
            self.status = StatusLine::error("SQL is empty, nothing to copy");
            return Err(ConsoleError::validation("SQL is empty"));
        }

        let written = writeln!(sink, "{}", self.editor).and_then(|_| sink.flush());
        match written {
            Ok(()) => {
                self.status = StatusLine::success("SQL copied");
                Ok(())
            }
            Err(e) => {
                self.status = StatusLine::error(format!("Copy failed: {}", e));
                Err(e.into())
            }
        }
    }

    /// Send the trimmed input to `/nl2sql` and put the answer in the editor.
    pub async fn generate_sql(&mut self) -> Outcome {
        let question = self.input.trim().to_string();
        if question.is_empty() {
            self.status = StatusLine::error("Please enter a question");
            return Err(ConsoleError::validation("question is empty"));
        }

        tracing::info!(question = %question, "Generating SQL");
        self.loading.set(true);
        self.status = StatusLine::info("Generating SQL...");

        let result = self.backend.generate_sql(&question).await;
        self.loading.set(false);

        match result {
            Ok(generated) => {
                tracing::debug!(sql = %generated.sql, "SQL generated");
                self.editor = generated.sql;
                self.status = StatusLine::success("SQL generated");
                Ok(())
            }
            Err(e) => {
                self.status = StatusLine::error(format!(
                    "Generation failed: {}",
                    e.user_message(GENERATE_FAILED)
                ));
                Err(e.into())
            }
        }
    }

    /// Set the input and generate in one step.
    pub async fn ask(&mut self, question: impl Into<String>) -> Outcome {
        self.set_input(question);
        self.generate_sql().await
    }

    /// Send the trimmed editor content to `/query` and show the rows.
    ///
    /// On success the result set is replaced and the cursor goes back to
    /// page 1. On failure the table area shows an error panel instead.
    pub async fn execute_sql(&mut self) -> Outcome {
        let sql = self.editor.trim().to_string();
        if sql.is_empty() {
            self.status = StatusLine::error("Please enter a SQL statement");
            return Err(ConsoleError::validation("SQL is empty"));
        }

        tracing::info!(sql = %sql, "Executing SQL");
        self.loading.set(true);
        self.status = StatusLine::info("Executing SQL...");

        let result = self.backend.execute_sql(&sql).await;
        self.loading.set(false);

        match result {
            Ok(rows) => {
                tracing::info!(rows = rows.len(), "SQL executed");
                self.results = rows;
                self.pagination.reset();
                self.area = TableArea::Results;
                self.status = StatusLine::success("SQL executed");
                Ok(())
            }
            Err(e) => {
                self.fail_execution(&e);
                Err(e.into())
            }
        }
    }

    fn fail_execution(&mut self, err: &RequestError) {
        let message = err.user_message(EXECUTE_FAILED);
        self.area = TableArea::Error(ErrorPanel {
            message: message.clone(),
        });
        self.status = StatusLine::error(format!("Execution failed: {}", message));
    }

    /// Move the cursor by `delta` pages.
    ///
    /// Returns `false` without touching any state when the target page is
    /// out of range or no table is shown.
    pub fn change_page(&mut self, delta: isize) -> bool {
        if self.area != TableArea::Results {
            return false;
        }
        let moved = self.pagination.step(delta, self.results.len());
        if moved {
            tracing::debug!(page = self.pagination.page(), "Page changed");
        }
        moved
    }

    /// Jump to an absolute page. Same bounds rule as [`change_page`](Self::change_page).
    pub fn go_to_page(&mut self, page: usize) -> bool {
        if self.area != TableArea::Results {
            return false;
        }
        self.pagination.go_to(page, self.results.len())
    }

    /// Fetch the table catalogue from `/schema`.
    pub async fn load_schema(&mut self) -> Outcome {
        self.loading.set(true);
        self.status = StatusLine::info("Loading schema...");

        let result = self.backend.fetch_schema().await;
        self.loading.set(false);

        match result {
            Ok(catalog) => {
                self.status = StatusLine::success(format!(
                    "Loaded schema for {} tables",
                    catalog.tables.len()
                ));
                self.schema = Some(catalog);
                Ok(())
            }
            Err(e) => {
                self.status = StatusLine::error(format!(
                    "Schema request failed: {}",
                    e.user_message(SCHEMA_FAILED)
                ));
                Err(e.into())
            }
        }
    }

    /// Ask the backend for its banner via `GET /`.
    pub async fn health(&mut self) -> crate::types::Result<String> {
        self.loading.set(true);
        let result = self.backend.health().await;
        self.loading.set(false);

        match result {
            Ok(health) => {
                self.status = StatusLine::success(format!("Backend up: {}", health.message));
                Ok(health.message)
            }
            Err(e) => {
                self.status = StatusLine::error(format!(
                    "Backend unreachable: {}",
                    e.user_message(GENERATE_FAILED)
                ));
                Err(e.into())
            }
        }
    }

    /// Snapshot of the table area for rendering.
    pub fn view(&self) -> TableView {
        match &self.area {
            TableArea::Blank => TableView::Blank,
            TableArea::Results => build_view(&self.results, &self.pagination),
            TableArea::Error(panel) => TableView::Error(panel.clone()),
        }
    }

    /// Table area as HTML.
    pub fn render_html(&self) -> String {
        render::html::render_table(&self.view())
    }

    /// Full page (status line and table area) as an HTML document.
    pub fn render_page(&self) -> String {
        render::html::render_document(&self.status, &self.editor, &self.view())
    }

    /// Table area as aligned terminal text.
    pub fn render_text(&self) -> String {
        render::text::render_table(&self.view())
    }
}
