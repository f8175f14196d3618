use crate::backend::Backend;
use crate::protocol::{CallResult, JsonRpcRequest, JsonRpcResponse};
use lsbridge_core::config::Config;
use lsbridge_core::constants;
use lsbridge_core::error::McpError;
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::Mutex;
use tokio::task::JoinSet;
use tracing::{error, info};

pub use self::tool_calls::Dispatcher;

mod tool_calls;

/// Run the MCP server over stdin/stdout until stdin closes.
pub async fn run_server(config: Arc<Config>) -> Result<(), McpError> {
    let dispatcher = Arc::new(Dispatcher::from_config(config)?);
    info!(
        backend = %dispatcher.config().backend.base_url,
        tools = dispatcher.list_tools().len(),
        "MCP server started"
    );
    serve_lines(dispatcher, tokio::io::stdin(), tokio::io::stdout()).await?;
    info!("stdin closed, MCP server stopping");
    Ok(())
}

/// Read newline-delimited JSON-RPC from `reader` and answer on `writer`.
///
/// Each request runs on its own task, so responses can come back out of
/// order; callers correlate them by `id`. Returns once the input is exhausted
/// and every in-flight request has been answered.
pub async fn serve_lines<B, R, W>(
    dispatcher: Arc<Dispatcher<B>>,
    reader: R,
    writer: W,
) -> Result<(), McpError>
where
    B: Backend + 'static,
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let writer = Arc::new(Mutex::new(writer));
    let mut reader = BufReader::new(reader);
    let mut in_flight = JoinSet::new();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        let line = buf.trim_ascii();
        if line.is_empty() {
            continue;
        }

        // Raw bytes: a line that is not UTF-8 is a parse error, not end of input.
        let request: JsonRpcRequest = match serde_json::from_slice(line) {
            Ok(r) => r,
            Err(e) => {
                let resp = JsonRpcResponse::error(
                    None,
                    constants::JSONRPC_PARSE_ERROR,
                    format!("Parse error: {}", e),
                );
                write_response(&writer, &resp).await?;
                continue;
            }
        };

        let dispatcher = Arc::clone(&dispatcher);
        let writer = Arc::clone(&writer);
        in_flight.spawn(async move {
            if let Some(resp) = handle_request(&dispatcher, &request).await
                && let Err(e) = write_response(&writer, &resp).await
            {
                error!("failed to write response: {}", e);
            }
        });

        // Reap finished tasks so the set does not grow with the session.
        while let Some(joined) = in_flight.try_join_next() {
            if let Err(e) = joined {
                error!("request task failed: {}", e);
            }
        }
    }

    while let Some(joined) = in_flight.join_next().await {
        if let Err(e) = joined {
            error!("request task failed: {}", e);
        }
    }
    Ok(())
}

/// Write a JSON-RPC response to the shared writer.
async fn write_response<W: AsyncWrite + Unpin>(
    writer: &Mutex<W>,
    response: &JsonRpcResponse,
) -> Result<(), McpError> {
    let mut serialized =
        serde_json::to_string(response).map_err(|e| McpError::Internal(e.to_string()))?;
    serialized.push('\n');
    let mut w = writer.lock().await;
    w.write_all(serialized.as_bytes()).await?;
    w.flush().await?;
    Ok(())
}

/// Answer one JSON-RPC message. Notifications get `None`.
pub async fn handle_request<B: Backend>(
    dispatcher: &Dispatcher<B>,
    request: &JsonRpcRequest,
) -> Option<JsonRpcResponse> {
    if request.is_notification() {
        return None;
    }
    let id = request.id.clone();
    let response = match request.method.as_str() {
        "initialize" => JsonRpcResponse::success(
            id,
            json!({
                "protocolVersion": constants::MCP_PROTOCOL_VERSION,
                "capabilities": {
                    "tools": {}
                },
                "serverInfo": {
                    "name": constants::SERVER_NAME,
                    "version": env!("CARGO_PKG_VERSION")
                }
            }),
        ),
        "ping" => JsonRpcResponse::success(id, json!({})),
        "tools/list" => {
            JsonRpcResponse::success(id, json!({ "tools": dispatcher.list_tools() }))
        }
        "tools/call" => {
            let tool_name = request
                .params
                .get("name")
                .and_then(|v| v.as_str())
                .unwrap_or("");
            let arguments = request
                .params
                .get("arguments")
                .cloned()
                .unwrap_or(json!({}));
            let result: CallResult = dispatcher.call_tool(tool_name, &arguments).await;
            JsonRpcResponse::success(id, result.to_value())
        }
        _ => {
            let err = McpError::MethodNotFound {
                method: request.method.clone(),
            };
            JsonRpcResponse::error(id, constants::JSONRPC_METHOD_NOT_FOUND, err.to_string())
        }
    };
    Some(response)
}
