use super::*;
use crate::backend::{Backend, HttpBackend};
use crate::format::{format_failure, format_success};
use crate::tools::{ToolDefinition, ToolRegistry};
use crate::validate::validate_call;
use futures::FutureExt;
use lsbridge_core::error::{McpError, ToolError};
use lsbridge_core::types::ToolKind;
use std::panic::AssertUnwindSafe;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Routes `tools/call` requests through validate -> backend -> format.
///
/// The registry and configuration are fixed at construction; concurrent
/// calls share them read-only.
pub struct Dispatcher<B: Backend = HttpBackend> {
    config: Arc<Config>,
    registry: ToolRegistry,
    backend: B,
}

impl Dispatcher<HttpBackend> {
    pub fn from_config(config: Arc<Config>) -> Result<Self, McpError> {
        let backend = HttpBackend::new(Arc::clone(&config))?;
        Ok(Self::new(config, ToolRegistry::builtin(), backend))
    }
}

impl<B: Backend> Dispatcher<B> {
    pub fn new(config: Arc<Config>, registry: ToolRegistry, backend: B) -> Self {
        Self {
            config,
            registry,
            backend,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Descriptors in registration order.
    pub fn list_tools(&self) -> &[ToolDefinition] {
        self.registry.tools()
    }

    /// Execute one tool call. Never fails: every problem, including a panic
    /// inside the backend, comes back as a single error block.
    pub async fn call_tool(&self, name: &str, arguments: &Value) -> CallResult {
        let started = Instant::now();
        let outcome = AssertUnwindSafe(self.run_tool(name, arguments))
            .catch_unwind()
            .await
            .unwrap_or_else(|panic| Err(ToolError::Internal(panic_message(panic.as_ref()))));

        let elapsed_ms = started.elapsed().as_millis() as u64;
        let content = match outcome {
            Ok(payload) => {
                info!(tool = name, elapsed_ms, "tool call succeeded");
                format_success(&payload)
            }
            Err(e) => {
                if let ToolError::Internal(_) = e {
                    error!(tool = name, elapsed_ms, "tool call crashed: {}", e);
                } else {
                    warn!(
                        tool = name,
                        elapsed_ms,
                        code = %e.code(),
                        "tool call failed: {}",
                        e
                    );
                }
                format_failure(&e)
            }
        };
        CallResult::new(content)
    }

    async fn run_tool(
        &self,
        name: &str,
        arguments: &Value,
    ) -> Result<crate::backend::BackendPayload, ToolError> {
        let kind = ToolKind::from_name(name).ok_or_else(|| ToolError::not_found(name))?;
        let definition = self
            .registry
            .get(kind)
            .ok_or_else(|| ToolError::not_configured(name))?;
        let endpoint = self
            .config
            .endpoint_path(kind)
            .ok_or_else(|| ToolError::not_configured(name))?;

        let call = validate_call(definition, kind, arguments)?;
        let request = call.backend_request(endpoint);
        debug!(tool = name, endpoint, "dispatching to backend");
        self.backend.invoke(request).await.map_err(ToolError::from)
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "tool handler panicked".to_string()
    }
}
