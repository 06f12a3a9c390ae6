//! Error types for console operations.
//!
//! Uses `thiserror` for ergonomic error definitions with automatic `From` implementations.

use thiserror::Error;

/// Failure of a single backend call.
///
/// Every `SqlBackend` method returns this as its error tag, so callers can
/// tell a transport failure apart from a server-side rejection.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RequestError {
    /// Connection refused, DNS failure, timeout
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response, with the server's `detail` when one was sent
    #[error("HTTP {status}: {}", detail.as_deref().unwrap_or("no detail"))]
    Status { status: u16, detail: Option<String> },

    /// Body could not be decoded as the expected JSON
    #[error("Invalid response body: {0}")]
    Decode(String),

    /// Body decoded but has the wrong shape (e.g. object where rows were expected)
    #[error("Unexpected response shape: {0}")]
    Shape(String),
}

impl RequestError {
    /// Text shown to the user for this failure.
    ///
    /// A server-provided `detail` always wins. Non-2xx responses without a
    /// detail fall back to `generic`; transport and decoding failures report
    /// their own message.
    pub fn user_message(&self, generic: &str) -> String {
        match self {
            Self::Status {
                detail: Some(detail),
                ..
            } if !detail.is_empty() => detail.clone(),
            Self::Status { .. } => generic.to_string(),
            Self::Network(msg) | Self::Decode(msg) | Self::Shape(msg) if !msg.is_empty() => {
                msg.clone()
            }
            _ => generic.to_string(),
        }
    }

    /// HTTP status code, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for RequestError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// Error type for all console operations.
#[derive(Error, Debug)]
pub enum ConsoleError {
    /// Empty question or SQL text
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Backend call failed
    #[error(transparent)]
    Request(#[from] RequestError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConsoleError {
    /// Create a validation error with context.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a configuration error with context.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether this is the empty-input failure kind.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Result type alias for console operations.
pub type Result<T> = std::result::Result<T, ConsoleError>;
