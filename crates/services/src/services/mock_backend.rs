//! In-process stand-in for the backend API, used by tests.
//!
//! Responses are registered per method and path (query string included).
//! Every request that reaches the server is recorded in arrival order.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    Router,
    body::{Body, Bytes},
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use tokio::{net::TcpListener, task::JoinHandle};

/// Path prefix the mock serves under, mirroring the real deployment
const API_PREFIX: &str = "/api";

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    /// Path relative to the API prefix, with the query string
    pub path: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or(Value::Null)
    }
}

#[derive(Debug, Clone)]
pub struct MockResponse {
    status: u16,
    content_type: Option<String>,
    body: Vec<u8>,
}

impl MockResponse {
    pub fn json(status: u16, value: Value) -> Self {
        Self::raw(status, Some("application/json"), value.to_string().into_bytes())
    }

    pub fn text(status: u16, text: &str) -> Self {
        Self::raw(status, Some("text/plain; charset=utf-8"), text.as_bytes().to_vec())
    }

    pub fn no_content() -> Self {
        Self::raw(204, None, Vec::new())
    }

    pub fn raw(status: u16, content_type: Option<&str>, body: Vec<u8>) -> Self {
        Self {
            status,
            content_type: content_type.map(str::to_string),
            body,
        }
    }

    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = status;
        if let Some(content_type) = self.content_type {
            if let Ok(value) = content_type.parse() {
                response.headers_mut().insert(CONTENT_TYPE, value);
            }
        }
        response
    }
}

#[derive(Default)]
struct MockState {
    routes: HashMap<(String, String), MockResponse>,
    requests: Vec<RecordedRequest>,
}

type SharedState = Arc<Mutex<MockState>>;

pub struct MockBackend {
    base_url: String,
    state: SharedState,
    server: JoinHandle<()>,
}

impl MockBackend {
    /// Bind an ephemeral local port and start serving
    pub async fn start() -> Self {
        let state = SharedState::default();
        let app = Router::new()
            .fallback(handle)
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock backend");
        let addr = listener.local_addr().expect("mock backend address");
        let server = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            base_url: format!("http://{}{}", addr, API_PREFIX),
            state,
            server,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Answer every `method path` request with `response` from now on
    pub fn on(&self, method: &str, path: &str, response: MockResponse) {
        self.lock()
            .routes
            .insert((method.to_ascii_uppercase(), path.to_string()), response);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    /// Recorded requests matching `method`, in arrival order
    pub fn requests_for(&self, method: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method.eq_ignore_ascii_case(method))
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.server.abort();
    }
}

async fn handle(
    State(state): State<SharedState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let full_path = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());
    let path = full_path
        .strip_prefix(API_PREFIX)
        .unwrap_or(&full_path)
        .to_string();

    let mut state = state.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    state.requests.push(RecordedRequest {
        method: method.to_string(),
        path: path.clone(),
        headers,
        body,
    });

    match state.routes.get(&(method.to_string(), path.clone())) {
        Some(response) => response.clone().into_response(),
        None => (
            StatusCode::NOT_FOUND,
            axum::Json(json!({
                "detail": {
                    "code": "NOT_FOUND",
                    "message": format!("no mock registered for {} {}", method, path)
                }
            })),
        )
            .into_response(),
    }
}
