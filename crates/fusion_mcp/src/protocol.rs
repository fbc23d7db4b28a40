//! JSON-RPC 2.0 envelopes and the MCP payloads this server speaks.
//!
//! Tool listings and call results use the `rmcp` model types. The envelopes
//! and the `initialize` exchange are modelled here so the dispatch loop can
//! answer malformed input with the exact JSON-RPC error it calls for.

use fusion_core::ServerInfo;
use fusion_tools::ToolDefinition;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

pub use rmcp::model::{CallToolResult, Content, Tool};

/// Protocol revision offered when the client does not ask for one.
pub const LATEST_PROTOCOL_VERSION: &str = "2025-06-18";

/// JSON-RPC version tag carried on every message.
pub const JSONRPC_VERSION: &str = "2.0";

// ─────────────────────────────────────────────────────────────────────────────
// JSON-RPC Envelopes
// ─────────────────────────────────────────────────────────────────────────────

/// An inbound request or notification.
///
/// `id` is absent for notifications, which never get a response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct JsonRpcRequest {
    /// Protocol tag; must be `"2.0"`.
    pub jsonrpc: String,
    /// Request id, echoed on the response.
    #[serde(default)]
    pub id: Option<Value>,
    /// Method name.
    pub method: String,
    /// Method parameters.
    #[serde(default)]
    pub params: Option<Value>,
}

impl JsonRpcRequest {
    /// Returns `true` for messages that expect no response.
    #[must_use]
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

/// An outbound response carrying either a result or an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    /// Always `"2.0"`.
    pub jsonrpc: String,
    /// Id of the request being answered; `null` when it could not be read.
    pub id: Value,
    /// Successful result.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Failure description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    /// Creates a success response.
    #[must_use]
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Creates an error response.
    #[must_use]
    pub fn failure(id: Value, error: JsonRpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }
}

/// A JSON-RPC error object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcError {
    /// Error code.
    pub code: i64,
    /// Short description.
    pub message: String,
    /// Extra detail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcError {
    /// Invalid JSON was received.
    pub const PARSE_ERROR: i64 = -32700;
    /// The JSON is not a valid request object.
    pub const INVALID_REQUEST: i64 = -32600;
    /// The method does not exist.
    pub const METHOD_NOT_FOUND: i64 = -32601;
    /// Invalid method parameters, including an unknown tool name.
    pub const INVALID_PARAMS: i64 = -32602;
    /// Internal server error.
    pub const INTERNAL_ERROR: i64 = -32603;

    /// Creates an error with the given code and message.
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    /// Creates a [`PARSE_ERROR`](Self::PARSE_ERROR).
    pub fn parse_error(detail: impl Into<String>) -> Self {
        Self::new(Self::PARSE_ERROR, "Parse error").with_data(Value::String(detail.into()))
    }

    /// Creates an [`INVALID_REQUEST`](Self::INVALID_REQUEST).
    pub fn invalid_request(detail: impl Into<String>) -> Self {
        Self::new(Self::INVALID_REQUEST, "Invalid Request").with_data(Value::String(detail.into()))
    }

    /// Creates a [`METHOD_NOT_FOUND`](Self::METHOD_NOT_FOUND).
    pub fn method_not_found(method: &str) -> Self {
        Self::new(Self::METHOD_NOT_FOUND, format!("Method not found: {method}"))
    }

    /// Creates an [`INVALID_PARAMS`](Self::INVALID_PARAMS).
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(Self::INVALID_PARAMS, message)
    }

    /// Attaches extra detail.
    #[must_use]
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// MCP Payloads
// ─────────────────────────────────────────────────────────────────────────────

/// Parameters of `initialize`. Only the requested version is read.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeParams {
    /// Protocol revision the client speaks.
    #[serde(default)]
    pub protocol_version: Option<String>,
}

/// Result of `initialize`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeResult {
    /// Negotiated protocol revision.
    pub protocol_version: String,
    /// What this server offers.
    pub capabilities: ServerCapabilities,
    /// Server identity.
    pub server_info: Implementation,
    /// Usage hints for the client.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

impl InitializeResult {
    /// Builds the handshake reply, echoing the client's version when given.
    #[must_use]
    pub fn new(info: &ServerInfo, requested_version: Option<String>) -> Self {
        Self {
            protocol_version: requested_version
                .filter(|version| !version.is_empty())
                .unwrap_or_else(|| LATEST_PROTOCOL_VERSION.to_string()),
            capabilities: ServerCapabilities::default(),
            server_info: Implementation {
                name: info.name.clone(),
                title: info.title.clone(),
                version: info.version.clone(),
            },
            instructions: info.instructions.clone(),
        }
    }
}

/// Server capability flags.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ServerCapabilities {
    /// Tool support.
    pub tools: ToolsCapability,
}

/// Tool capability flags.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolsCapability {
    /// Whether the server announces tool list changes. Always `false`.
    pub list_changed: bool,
}

/// Name and version of a protocol participant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Implementation {
    /// Machine-readable name.
    pub name: String,
    /// Display title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Version string.
    pub version: String,
}

/// Converts a registered tool's definition into its `tools/list` entry.
///
/// A definition whose parameters are not a JSON object is listed with an
/// empty schema.
#[must_use]
pub fn tool_from_definition(definition: ToolDefinition) -> Tool {
    let schema = match definition.parameters {
        Value::Object(schema) => schema,
        _ => Map::new(),
    };
    Tool::new(definition.name, definition.description, Arc::new(schema))
}

/// Result of `tools/list`.
#[derive(Debug, Clone, Serialize)]
pub struct ListToolsResult {
    /// Every registered tool, in registration order.
    pub tools: Vec<Tool>,
}

/// Parameters of `tools/call`.
#[derive(Debug, Clone, Deserialize)]
pub struct CallToolParams {
    /// Tool to invoke.
    pub name: String,
    /// Arguments object.
    #[serde(default)]
    pub arguments: Option<Value>,
}
