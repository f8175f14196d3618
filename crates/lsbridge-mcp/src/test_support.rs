//! Test doubles: a recording axum backend and in-process `Backend` fakes.

use crate::backend::{Backend, BackendPayload, BackendRequest};
use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{Method, StatusCode, Uri};
use lsbridge_core::error::BackendError;
use serde_json::Value;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
pub(crate) struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub body: Option<Value>,
}

impl RecordedRequest {
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.query
            .as_deref()
            .map(|q| {
                url::form_urlencoded::parse(q.as_bytes())
                    .into_owned()
                    .collect()
            })
            .unwrap_or_default()
    }
}

type Responder = dyn Fn(&RecordedRequest) -> (u16, String) + Send + Sync;

struct MockState {
    requests: Mutex<Vec<RecordedRequest>>,
    responder: Box<Responder>,
}

/// An HTTP backend bound to an ephemeral local port that records every request.
pub(crate) struct MockBackend {
    pub base_url: String,
    state: Arc<MockState>,
    server: tokio::task::JoinHandle<()>,
}

impl MockBackend {
    pub async fn start(
        responder: impl Fn(&RecordedRequest) -> (u16, String) + Send + Sync + 'static,
    ) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("mock backend bind failed");
        let addr = listener.local_addr().unwrap();
        let state = Arc::new(MockState {
            requests: Mutex::new(Vec::new()),
            responder: Box::new(responder),
        });
        let app = Router::new()
            .fallback(record_request)
            .with_state(Arc::clone(&state));
        let server = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        Self {
            base_url: format!("http://{addr}"),
            state,
            server,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.server.abort();
    }
}

async fn record_request(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> (StatusCode, String) {
    let recorded = RecordedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        body: serde_json::from_slice(&body).ok(),
    };
    let (status, text) = (state.responder)(&recorded);
    state.requests.lock().unwrap().push(recorded);
    (
        StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        text,
    )
}

/// In-process backend that records requests and answers with a fixed result.
#[derive(Clone)]
pub(crate) struct RecordingBackend {
    calls: Arc<Mutex<Vec<BackendRequest>>>,
    reply: Result<BackendPayload, BackendError>,
}

impl RecordingBackend {
    pub fn replying(reply: Result<BackendPayload, BackendError>) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            reply,
        }
    }

    pub fn calls(&self) -> Vec<BackendRequest> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for RecordingBackend {
    fn default() -> Self {
        Self::replying(Ok(BackendPayload::Json(serde_json::json!({"ok": true}))))
    }
}

impl Backend for RecordingBackend {
    async fn invoke(&self, request: BackendRequest) -> Result<BackendPayload, BackendError> {
        self.calls.lock().unwrap().push(request);
        self.reply.clone()
    }
}

/// Backend whose every call panics.
pub(crate) struct PanickingBackend;

impl Backend for PanickingBackend {
    async fn invoke(&self, _request: BackendRequest) -> Result<BackendPayload, BackendError> {
        panic!("backend exploded");
    }
}
