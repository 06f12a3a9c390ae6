//! Core data types for the query console.
//!
//! Defines the types shared across the crate:
//! - `Row` / `ResultSet`: rows returned by SQL execution
//! - `GeneratedSql`, `SchemaCatalog`: backend payloads
//! - `ConsoleError` / `RequestError`: error types for all operations
//! - `Result`: Convenient result type alias

pub mod error;
pub mod row;

pub use error::{ConsoleError, RequestError, Result};
pub use row::{
    cell_text, ColumnInfo, GeneratedSql, HealthStatus, ResultSet, Row, SchemaCatalog, TableSchema,
};
