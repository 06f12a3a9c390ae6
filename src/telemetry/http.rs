//! Backend request instrumentation.

use tracing::{field, span, Level, Span};

/// Backend endpoints (maps to `console.operation`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendOperation {
    /// `POST /nl2sql`
    GenerateSql,
    /// `POST /query`
    Query,
    /// `GET /schema`
    Schema,
    /// `GET /`
    Health,
}

impl BackendOperation {
    /// Get operation name as string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GenerateSql => "nl2sql",
            Self::Query => "query",
            Self::Schema => "schema",
            Self::Health => "health",
        }
    }

    /// HTTP method used for this endpoint.
    pub fn method(&self) -> &'static str {
        match self {
            Self::GenerateSql | Self::Query => "POST",
            Self::Schema | Self::Health => "GET",
        }
    }

    /// Path relative to the base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Self::GenerateSql => "/nl2sql",
            Self::Query => "/query",
            Self::Schema => "/schema",
            Self::Health => "/",
        }
    }
}

/// Create an HTTP client span for one backend call.
///
/// Status code and outcome are declared empty and filled in by
/// [`record_status`] and [`record_outcome`].
pub fn request_span(operation: BackendOperation, url: &str) -> Span {
    span!(
        Level::INFO,
        "http.client",
        otel.name = %format!("{} {}", operation.method(), operation.as_str()),
        otel.kind = "client",
        http.request.method = operation.method(),
        url.full = url,
        console.operation = operation.as_str(),
        http.response.status_code = field::Empty,
        console.outcome = field::Empty,
    )
}

/// Record the response status on a request span.
pub fn record_status(span: &Span, status: u16) {
    span.record("http.response.status_code", status);
}

/// Record `"ok"` or `"error"` on a request span.
pub fn record_outcome(span: &Span, ok: bool) {
    span.record("console.outcome", if ok { "ok" } else { "error" });
}
