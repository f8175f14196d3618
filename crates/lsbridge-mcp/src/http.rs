//! HTTP transport for the MCP server.
//!
//! Provides a JSON-RPC over HTTP endpoint that reuses the same dispatch as
//! the stdio transport. Routes:
//! - `GET /health` returns liveness and the configured backend
//! - `POST /` handles one JSON-RPC message

use crate::backend::{Backend, HttpBackend};
use crate::protocol::{JsonRpcRequest, JsonRpcResponse};
use crate::server::{Dispatcher, handle_request};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use lsbridge_core::config::Config;
use lsbridge_core::constants;
use lsbridge_core::error::{McpError, ProtocolErrorCode};
use serde_json::json;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

/// Shared state for the HTTP transport.
pub struct HttpState<B: Backend = HttpBackend> {
    pub dispatcher: Arc<Dispatcher<B>>,
    pub server_start: Instant,
}

impl<B: Backend> HttpState<B> {
    pub fn new(dispatcher: Arc<Dispatcher<B>>) -> Self {
        Self {
            dispatcher,
            server_start: Instant::now(),
        }
    }
}

pub fn router<B: Backend + 'static>(state: Arc<HttpState<B>>) -> Router {
    Router::new()
        .route("/health", get(health_handler::<B>))
        .route("/", post(jsonrpc_handler::<B>))
        .with_state(state)
}

/// Start the HTTP transport server on the given bind address and port.
pub async fn run_http_server(
    config: Arc<Config>,
    bind_addr: &str,
    port: u16,
) -> Result<(), McpError> {
    let dispatcher = Arc::new(Dispatcher::from_config(config)?);
    let state = Arc::new(HttpState::new(dispatcher));
    let app = router(state);

    let addr = format!("{}:{}", bind_addr, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("MCP HTTP server listening on {}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

/// GET /health
async fn health_handler<B: Backend + 'static>(
    State(state): State<Arc<HttpState<B>>>,
) -> impl IntoResponse {
    let config = state.dispatcher.config();
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_seconds": state.server_start.elapsed().as_secs(),
        "backend": {
            "base_url": config.backend.base_url,
            "api_prefix": config.backend.api_prefix,
        },
        "tools": state.dispatcher.list_tools().len(),
    }))
}

/// POST /
async fn jsonrpc_handler<B: Backend + 'static>(
    State(state): State<Arc<HttpState<B>>>,
    body: Bytes,
) -> axum::response::Response {
    let request: JsonRpcRequest = match serde_json::from_slice(&body) {
        Ok(req) => req,
        Err(e) => {
            let body = json!({
                "error": {
                    "code": ProtocolErrorCode::InvalidInput.as_str(),
                    "message": format!("Invalid JSON request body: {}", e),
                }
            });
            return (StatusCode::BAD_REQUEST, Json(body)).into_response();
        }
    };
    let id = request.id.clone();

    let result = tokio::spawn({
        let dispatcher = Arc::clone(&state.dispatcher);
        async move { handle_request(&dispatcher, &request).await }
    })
    .await;

    match result {
        Ok(Some(response)) => Json(response).into_response(),
        Ok(None) => StatusCode::ACCEPTED.into_response(),
        Err(e) => {
            error!("request task failed: {}", e);
            let resp = JsonRpcResponse::error(
                id,
                constants::JSONRPC_INTERNAL_ERROR,
                format!("Internal error: {}", e),
            );
            Json(resp).into_response()
        }
    }
}
