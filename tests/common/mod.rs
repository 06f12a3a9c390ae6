//! Shared test helpers: a scripted backend and a one-shot HTTP stub.

#![allow(dead_code)]

use async_trait::async_trait;
use datainsight_console::client::{RequestResult, SqlBackend};
use datainsight_console::console::LoadingFlag;
use datainsight_console::types::{GeneratedSql, HealthStatus, RequestError, ResultSet, SchemaCatalog};
use serde_json::{json, Value as JsonValue};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Backend that replays queued answers and counts calls.
#[derive(Default)]
pub struct ScriptedBackend {
    generate: Mutex<VecDeque<RequestResult<GeneratedSql>>>,
    execute: Mutex<VecDeque<RequestResult<ResultSet>>>,
    pub generate_calls: AtomicUsize,
    pub execute_calls: AtomicUsize,
    pub last_text: Mutex<Option<String>>,
    pub last_sql: Mutex<Option<String>>,
    watched: Mutex<Option<LoadingFlag>>,
    /// Loading state observed at the start of each generate/execute call.
    pub loading_seen: Mutex<Vec<bool>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_generate(self, answer: RequestResult<GeneratedSql>) -> Self {
        self.generate.lock().unwrap().push_back(answer);
        self
    }

    pub fn on_execute(self, answer: RequestResult<ResultSet>) -> Self {
        self.execute.lock().unwrap().push_back(answer);
        self
    }

    /// Record `flag` on every generate/execute call.
    pub fn watch_loading(&self, flag: LoadingFlag) {
        *self.watched.lock().unwrap() = Some(flag);
    }

    fn observe_loading(&self) {
        if let Some(flag) = self.watched.lock().unwrap().as_ref() {
            self.loading_seen.lock().unwrap().push(flag.is_set());
        }
    }

    pub fn calls(&self) -> usize {
        self.generate_calls.load(Ordering::SeqCst) + self.execute_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SqlBackend for ScriptedBackend {
    async fn generate_sql(&self, text: &str) -> RequestResult<GeneratedSql> {
        self.generate_calls.fetch_add(1, Ordering::SeqCst);
        self.observe_loading();
        *self.last_text.lock().unwrap() = Some(text.to_string());
        self.generate
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected generate_sql call")
    }

    async fn execute_sql(&self, sql: &str) -> RequestResult<ResultSet> {
        self.execute_calls.fetch_add(1, Ordering::SeqCst);
        self.observe_loading();
        *self.last_sql.lock().unwrap() = Some(sql.to_string());
        self.execute
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected execute_sql call")
    }

    async fn fetch_schema(&self) -> RequestResult<SchemaCatalog> {
        SchemaCatalog::from_json(json!({"schema": {"users": [{"name": "id", "type": "INTEGER"}]}}))
    }

    async fn health(&self) -> RequestResult<HealthStatus> {
        Ok(HealthStatus {
            message: "DataInsight AI backend is running!".to_string(),
        })
    }
}

pub fn generated(sql: &str) -> RequestResult<GeneratedSql> {
    Ok(GeneratedSql {
        sql: sql.to_string(),
        raw_output: None,
    })
}

pub fn detail(status: u16, detail: &str) -> RequestError {
    RequestError::Status {
        status,
        detail: Some(detail.to_string()),
    }
}

/// `n` rows `{"id": i, "name": "user-i"}`, i starting at 1.
pub fn user_rows(n: usize) -> ResultSet {
    let rows: Vec<JsonValue> = (1..=n)
        .map(|i| json!({"id": i, "name": format!("user-{}", i)}))
        .collect();
    ResultSet::from_json(JsonValue::Array(rows)).unwrap()
}

/// One recorded request: method, path and body.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub body: String,
}

/// Serve the canned `(status, body)` responses in order, one connection each.
///
/// Returns the base URL and a handle yielding the recorded requests.
pub async fn stub_server(responses: Vec<(u16, String)>) -> (String, JoinHandle<Vec<Recorded>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let mut recorded = Vec::new();
        for (status, body) in responses {
            let (mut stream, _) = listener.accept().await.unwrap();

            let mut buf = Vec::new();
            let mut chunk = [0u8; 4096];
            let header_end = loop {
                let n = stream.read(&mut chunk).await.unwrap();
                assert!(n > 0, "client closed before sending headers");
                buf.extend_from_slice(&chunk[..n]);
                if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                    break pos + 4;
                }
            };

            let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
            let content_length = head
                .lines()
                .find_map(|l| {
                    let (name, value) = l.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);

            while buf.len() < header_end + content_length {
                let n = stream.read(&mut chunk).await.unwrap();
                assert!(n > 0, "client closed before sending body");
                buf.extend_from_slice(&chunk[..n]);
            }

            let mut request_line = head.lines().next().unwrap_or_default().split_whitespace();
            recorded.push(Recorded {
                method: request_line.next().unwrap_or_default().to_string(),
                path: request_line.next().unwrap_or_default().to_string(),
                body: String::from_utf8_lossy(&buf[header_end..header_end + content_length])
                    .to_string(),
            });

            let response = format!(
                "HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.unwrap();
        }
        recorded
    });

    (base_url, handle)
}
