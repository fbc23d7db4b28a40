//! MCP request dispatch and the serving loop.

use crate::error::McpError;
use crate::protocol::{
    CallToolParams, CallToolResult, Content, InitializeParams, InitializeResult, JSONRPC_VERSION,
    JsonRpcError, JsonRpcRequest, JsonRpcResponse, ListToolsResult, tool_from_definition,
};
use crate::transport::{MessageTransport, StdioTransport};
use fusion_core::ServerInfo;
use fusion_tools::ToolRegistry;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinSet;

/// An MCP server exposing the tools of a [`ToolRegistry`].
///
/// The registry and server metadata are fixed at construction and shared
/// read-only by every request handler.
#[derive(Debug)]
pub struct McpServer {
    registry: Arc<ToolRegistry>,
    info: ServerInfo,
}

impl McpServer {
    /// Creates a server over the given tools.
    #[must_use]
    pub fn new(registry: ToolRegistry, info: ServerInfo) -> Self {
        Self {
            registry: Arc::new(registry),
            info,
        }
    }

    /// Returns the server metadata.
    #[must_use]
    pub fn info(&self) -> &ServerInfo {
        &self.info
    }

    /// Returns the tool registry.
    #[must_use]
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Handles one inbound line.
    ///
    /// Returns the response to send, or `None` for notifications.
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let message: Value = match serde_json::from_str(line) {
            Ok(message) => message,
            Err(err) => {
                tracing::warn!(error = %err, "received malformed JSON");
                return Some(JsonRpcResponse::failure(
                    Value::Null,
                    JsonRpcError::parse_error(err.to_string()),
                ));
            }
        };
        self.handle_message(message).await
    }

    /// Handles one decoded JSON-RPC message.
    pub async fn handle_message(&self, message: Value) -> Option<JsonRpcResponse> {
        let id = message.get("id").cloned().unwrap_or(Value::Null);

        let request = match serde_json::from_value::<JsonRpcRequest>(message) {
            Ok(request) if request.jsonrpc == JSONRPC_VERSION => request,
            Ok(request) => {
                return Some(JsonRpcResponse::failure(
                    id,
                    JsonRpcError::invalid_request(format!(
                        "unsupported jsonrpc version '{}'",
                        request.jsonrpc
                    )),
                ));
            }
            Err(err) => {
                tracing::warn!(error = %err, "received invalid JSON-RPC request");
                return Some(JsonRpcResponse::failure(
                    id,
                    JsonRpcError::invalid_request(err.to_string()),
                ));
            }
        };

        if request.is_notification() {
            self.handle_notification(&request.method);
            return None;
        }
        let id = request.id.unwrap_or_default();

        tracing::debug!(method = %request.method, id = %id, "handling request");

        let outcome = match request.method.as_str() {
            "initialize" => self.initialize(request.params),
            "ping" => Ok(Value::Object(serde_json::Map::new())),
            "tools/list" => self.list_tools(),
            "tools/call" => self.call_tool(request.params).await,
            other => Err(JsonRpcError::method_not_found(other)),
        };

        Some(match outcome {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => JsonRpcResponse::failure(id, error),
        })
    }

    fn handle_notification(&self, method: &str) {
        match method {
            "notifications/initialized" => {
                tracing::info!(server = %self.info.name, "client finished initialization");
            }
            other => tracing::debug!(method = other, "ignoring notification"),
        }
    }

    fn initialize(&self, params: Option<Value>) -> Result<Value, JsonRpcError> {
        let params: InitializeParams = match params {
            Some(params) => serde_json::from_value(params)
                .map_err(|err| JsonRpcError::invalid_params(err.to_string()))?,
            None => InitializeParams::default(),
        };

        let result = InitializeResult::new(&self.info, params.protocol_version);
        tracing::info!(
            protocol_version = %result.protocol_version,
            "initialize handshake"
        );
        to_result(&result)
    }

    fn list_tools(&self) -> Result<Value, JsonRpcError> {
        let tools = self
            .registry
            .definitions()
            .into_iter()
            .map(tool_from_definition)
            .collect();
        to_result(&ListToolsResult { tools })
    }

    async fn call_tool(&self, params: Option<Value>) -> Result<Value, JsonRpcError> {
        let params: CallToolParams = serde_json::from_value(params.unwrap_or(Value::Null))
            .map_err(|err| JsonRpcError::invalid_params(err.to_string()))?;

        if !self.registry.has(&params.name) {
            return Err(JsonRpcError::invalid_params(format!(
                "Unknown tool: {}",
                params.name
            )));
        }

        let arguments = params.arguments.unwrap_or(Value::Null);
        let result = match self.registry.execute(&params.name, &arguments).await {
            Ok(Value::String(text)) => CallToolResult::success(vec![Content::text(text)]),
            Ok(other) => CallToolResult::success(vec![Content::text(
                serde_json::to_string_pretty(&other).unwrap_or_else(|_| other.to_string()),
            )]),
            Err(err) => {
                tracing::warn!(tool = %params.name, error = %err, "tool call failed");
                CallToolResult::error(vec![Content::text(err.to_string())])
            }
        };
        to_result(&result)
    }

    /// Serves requests from `transport` until it reaches end of input.
    ///
    /// Each request is handled on its own task; responses go through a single
    /// writer task so frames never interleave. Requests still in flight at end
    /// of input are allowed to finish and their responses are written before
    /// this returns.
    pub async fn serve<T: MessageTransport>(
        self: Arc<Self>,
        transport: Arc<T>,
    ) -> Result<(), McpError> {
        let (tx, mut rx) = mpsc::unbounded_channel::<String>();

        let writer_transport = Arc::clone(&transport);
        let writer = tokio::spawn(async move {
            while let Some(frame) = rx.recv().await {
                writer_transport.send(frame).await?;
            }
            Ok::<(), McpError>(())
        });

        let mut in_flight = JoinSet::new();
        let read_result = loop {
            if writer.is_finished() {
                break Ok(());
            }
            let line = match transport.receive().await {
                Ok(Some(line)) => line,
                Ok(None) => break Ok(()),
                Err(err) => break Err(err),
            };
            if line.trim().is_empty() {
                continue;
            }

            let server = Arc::clone(&self);
            let tx = tx.clone();
            in_flight.spawn(async move {
                let Some(response) = server.handle_line(&line).await else {
                    return;
                };
                match serde_json::to_string(&response) {
                    Ok(frame) => {
                        if tx.send(frame).is_err() {
                            tracing::debug!("writer closed before response could be sent");
                        }
                    }
                    Err(err) => tracing::error!(error = %err, "failed to encode response"),
                }
            });

            while let Some(joined) = in_flight.try_join_next() {
                log_join_failure(joined);
            }
        };

        while let Some(joined) = in_flight.join_next().await {
            log_join_failure(joined);
        }
        drop(tx);

        let write_result = writer
            .await
            .map_err(|err| McpError::WriterStopped(err.to_string()))?;

        read_result?;
        write_result?;
        tracing::info!("input closed; server stopped");
        Ok(())
    }

    /// Serves requests over the process's stdin and stdout.
    pub async fn serve_stdio(self) -> Result<(), McpError> {
        Arc::new(self)
            .serve(Arc::new(StdioTransport::stdio()))
            .await
    }
}

fn to_result<T: serde::Serialize>(value: &T) -> Result<Value, JsonRpcError> {
    serde_json::to_value(value).map_err(|err| {
        JsonRpcError::new(JsonRpcError::INTERNAL_ERROR, format!("failed to encode result: {err}"))
    })
}

fn log_join_failure(joined: Result<(), tokio::task::JoinError>) {
    if let Err(err) = joined {
        tracing::error!(error = %err, "request handler task failed");
    }
}
