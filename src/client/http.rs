//! HTTP backend client (reqwest).

use crate::client::{RequestResult, SqlBackend};
use crate::config::ConsoleConfig;
use crate::telemetry::{record_outcome, record_status, request_span, BackendOperation};
use crate::types::{
    ConsoleError, GeneratedSql, HealthStatus, RequestError, Result, ResultSet, SchemaCatalog,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value as JsonValue;
use tracing::Instrument;

/// `/nl2sql` request body.
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    text: &'a str,
}

/// `/query` request body.
#[derive(Debug, Serialize)]
struct QueryRequest<'a> {
    sql: &'a str,
}

/// Backend reached over HTTP at a configured base URL.
pub struct HttpBackend {
    config: ConsoleConfig,
    client: Client,
}

impl HttpBackend {
    /// Create a client for the configured backend.
    ///
    /// # Errors
    ///
    /// Returns `ConsoleError::Config` if the configuration is invalid or the
    /// HTTP client cannot be built.
    pub fn new(config: ConsoleConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ConsoleError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Use a preconfigured `reqwest::Client` (proxy, TLS or timeout settings).
    pub fn with_client(config: ConsoleConfig, client: Client) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    /// Send one request and return the decoded JSON body.
    async fn send<B: Serialize + Sync + ?Sized>(
        &self,
        operation: BackendOperation,
        body: Option<&B>,
    ) -> RequestResult<JsonValue> {
        let url = self.config.endpoint(operation.path());
        let span = request_span(operation, &url);

        let result = self
            .round_trip(operation, &url, body)
            .instrument(span.clone())
            .await;
        record_outcome(&span, result.is_ok());
        result
    }

    async fn round_trip<B: Serialize + Sync + ?Sized>(
        &self,
        operation: BackendOperation,
        url: &str,
        body: Option<&B>,
    ) -> RequestResult<JsonValue> {
        let request = match body {
            Some(body) => self.client.post(url).json(body),
            None => self.client.get(url),
        };

        let response = request
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Backend unreachable");
                RequestError::Network(format!("{} request failed: {}", operation.as_str(), e))
            })?;

        let status = response.status().as_u16();
        record_status(&tracing::Span::current(), status);

        let text = response.text().await?;

        let result = classify_response(status, &text);
        match &result {
            Ok(_) => tracing::debug!(status, bytes = text.len(), "Backend request completed"),
            Err(e) => tracing::warn!(status, error = %e, "Backend request failed"),
        }
        result
    }
}

/// Turn a status code and raw body into the decoded body or a tagged error.
///
/// Non-2xx responses carry the `detail` field when the body is a JSON
/// object that has one. A non-string `detail` (e.g. a list of validation
/// errors) is kept as its JSON text.
pub fn classify_response(status: u16, body: &str) -> RequestResult<JsonValue> {
    if (200..300).contains(&status) {
        return serde_json::from_str(body)
            .map_err(|e| RequestError::Decode(format!("Failed to parse response: {}", e)));
    }

    let detail = serde_json::from_str::<JsonValue>(body)
        .ok()
        .and_then(|v| match v.get("detail") {
            Some(JsonValue::String(s)) => Some(s.clone()),
            Some(JsonValue::Null) | None => None,
            Some(other) => Some(other.to_string()),
        });

    Err(RequestError::Status { status, detail })
}

#[async_trait]
impl SqlBackend for HttpBackend {
    async fn generate_sql(&self, text: &str) -> RequestResult<GeneratedSql> {
        let body = self
            .send(BackendOperation::GenerateSql, Some(&GenerateRequest { text }))
            .await?;
        serde_json::from_value(body)
            .map_err(|e| RequestError::Decode(format!("Invalid nl2sql response: {}", e)))
    }

    async fn execute_sql(&self, sql: &str) -> RequestResult<ResultSet> {
        let body = self
            .send(BackendOperation::Query, Some(&QueryRequest { sql }))
            .await?;
        ResultSet::from_json(body)
    }

    async fn fetch_schema(&self) -> RequestResult<SchemaCatalog> {
        let body = self.send::<()>(BackendOperation::Schema, None).await?;
        SchemaCatalog::from_json(body)
    }

    async fn health(&self) -> RequestResult<HealthStatus> {
        let body = self.send::<()>(BackendOperation::Health, None).await?;
        serde_json::from_value(body)
            .map_err(|e| RequestError::Decode(format!("Invalid health response: {}", e)))
    }
}
