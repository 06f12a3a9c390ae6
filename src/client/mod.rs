//! Backend access for the query console.
//!
//! `SqlBackend` is the seam between the console view-model and the
//! natural-language-to-SQL service. `HttpBackend` is the production
//! implementation; tests substitute scripted backends.

pub mod http;

pub use http::HttpBackend;

use crate::types::{GeneratedSql, HealthStatus, RequestError, ResultSet, SchemaCatalog};
use async_trait::async_trait;

/// Result of one backend call, tagged with the failure kind.
pub type RequestResult<T> = std::result::Result<T, RequestError>;

/// Remote operations the console depends on.
///
/// Implementations perform exactly one request per call. No retries, no
/// caching: a failure is terminal for that call.
#[async_trait]
pub trait SqlBackend: Send + Sync {
    /// `POST /nl2sql` with `{"text": ...}`.
    async fn generate_sql(&self, text: &str) -> RequestResult<GeneratedSql>;

    /// `POST /query` with `{"sql": ...}`.
    async fn execute_sql(&self, sql: &str) -> RequestResult<ResultSet>;

    /// `GET /schema`.
    async fn fetch_schema(&self) -> RequestResult<SchemaCatalog>;

    /// `GET /`.
    async fn health(&self) -> RequestResult<HealthStatus>;
}
