//! Tracing setup and HTTP client instrumentation.
//!
//! Follows OpenTelemetry semantic conventions for HTTP client spans:
//! - https://opentelemetry.io/docs/specs/semconv/http/http-spans/
//!
//! **Span naming**: `{http.request.method} {console.operation}`
//! - Example: `POST nl2sql`, `POST query`, `GET schema`
//!
//! **Attributes**:
//! - `http.request.method`, `url.full`
//! - `console.operation`: which backend endpoint is called
//! - `http.response.status_code`: recorded once the response arrives
//!
//! # Example
//!
//! ```rust,ignore
//! use datainsight_console::telemetry::{request_span, BackendOperation};
//!
//! let span = request_span(BackendOperation::Query, "http://localhost:8000/query");
//! let response = send().instrument(span.clone()).await?;
//! record_status(&span, response.status().as_u16());
//! ```

pub mod http;

pub use http::{record_outcome, record_status, request_span, BackendOperation};

use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber.
///
/// `RUST_LOG` wins when set; otherwise the crate logs at `info`, or `debug`
/// with `verbose`. Safe to call more than once (later calls are ignored).
pub fn init_tracing(verbose: bool) {
    let default_directive = if verbose {
        "datainsight_console=debug,insight=debug,warn"
    } else {
        "datainsight_console=info,insight=info,warn"
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
