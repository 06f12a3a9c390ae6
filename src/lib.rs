//! DataInsight query console - Rust client library
//!
//! Client for a natural-language-to-SQL service:
//! - `POST /nl2sql` turns a question into SQL
//! - `POST /query` executes SQL and returns rows
//! - Results are held in a view-model and rendered as a paginated table
//!   (HTML or terminal text)
//!
//! Can be used as:
//! - Library (embed `QueryConsole` with any `SqlBackend`)
//! - CLI (`insight` binary)

pub mod types;
pub mod config;
pub mod client;
pub mod console;
pub mod render;
pub mod telemetry;

pub use client::{HttpBackend, SqlBackend};
pub use config::ConsoleConfig;
pub use console::{QueryConsole, StatusLevel, StatusLine, TableView};
pub use types::{ConsoleError, RequestError, Result, ResultSet};
