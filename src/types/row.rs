//! Row and payload types exchanged with the backend.

use crate::types::RequestError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value as JsonValue};

/// One result row: column name to value, in the order the server sent them.
pub type Row = Map<String, JsonValue>;

/// Ordered rows returned by SQL execution.
///
/// Replaced wholesale on every successful execution; never merged.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResultSet {
    rows: Vec<Row>,
}

impl ResultSet {
    /// Empty result set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a `/query` response body.
    ///
    /// # Errors
    ///
    /// Returns `RequestError::Shape` if the body is not a JSON array, or if
    /// any element is not an object.
    pub fn from_json(body: JsonValue) -> std::result::Result<Self, RequestError> {
        let items = match body {
            JsonValue::Array(items) => items,
            other => {
                return Err(RequestError::Shape(format!(
                    "expected an array of rows, got {}",
                    json_kind(&other)
                )))
            }
        };

        let rows = items
            .into_iter()
            .enumerate()
            .map(|(i, item)| match item {
                JsonValue::Object(row) => Ok(row),
                other => Err(RequestError::Shape(format!(
                    "row {} is {}, expected an object",
                    i + 1,
                    json_kind(&other)
                ))),
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self { rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }
}

impl From<Vec<Row>> for ResultSet {
    fn from(rows: Vec<Row>) -> Self {
        Self { rows }
    }
}

/// Display text for one cell.
///
/// Missing cells and `null` are blank; strings are shown unquoted; every
/// other value uses its JSON text (`0`, `false`, `[1,2]`).
pub fn cell_text(value: Option<&JsonValue>) -> String {
    match value {
        None | Some(JsonValue::Null) => String::new(),
        Some(JsonValue::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}

/// `/nl2sql` success payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedSql {
    /// SQL to place in the editor
    pub sql: String,

    /// Unparsed model output (debugging aid, may be absent)
    #[serde(default)]
    pub raw_output: Option<String>,
}

/// `GET /` payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub message: String,
}

/// Column descriptor from `GET /schema` (`PRAGMA table_info` layout).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnInfo {
    #[serde(default)]
    pub cid: i64,

    pub name: String,

    #[serde(rename = "type", default)]
    pub data_type: String,

    #[serde(default, deserialize_with = "flag")]
    pub notnull: bool,

    #[serde(default)]
    pub dflt_value: Option<JsonValue>,

    #[serde(default, deserialize_with = "flag")]
    pub pk: bool,
}

/// Backends report flags either as booleans or as 0/1 integers.
fn flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match JsonValue::deserialize(deserializer)? {
        JsonValue::Bool(b) => b,
        JsonValue::Number(n) => n.as_i64().map(|n| n != 0).unwrap_or(false),
        _ => false,
    })
}

/// One table and its columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableSchema {
    pub name: String,
    pub columns: Vec<ColumnInfo>,
}

/// Table catalogue from `GET /schema`, in server order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SchemaCatalog {
    pub tables: Vec<TableSchema>,
}

impl SchemaCatalog {
    /// Parse `{"schema": {"table": [column, ...], ...}}`.
    pub fn from_json(body: JsonValue) -> std::result::Result<Self, RequestError> {
        let schema = match body {
            JsonValue::Object(mut obj) => obj.remove("schema"),
            _ => None,
        };

        let Some(JsonValue::Object(tables)) = schema else {
            return Err(RequestError::Shape(
                "expected {\"schema\": {...}} object".to_string(),
            ));
        };

        let tables = tables
            .into_iter()
            .map(|(name, columns)| {
                let columns: Vec<ColumnInfo> = serde_json::from_value(columns).map_err(|e| {
                    RequestError::Decode(format!("columns of table '{}': {}", name, e))
                })?;
                Ok(TableSchema { name, columns })
            })
            .collect::<std::result::Result<Vec<_>, RequestError>>()?;

        Ok(Self { tables })
    }

    pub fn table(&self, name: &str) -> Option<&TableSchema> {
        self.tables.iter().find(|t| t.name == name)
    }
}
