//! The core [`Tool`] trait for executable tools.

use crate::error::ToolError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;

/// Definition of a tool exposed to the hosting agent runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Name of the tool (e.g., `yelp_agent`).
    pub name: String,
    /// Human-readable description of what the tool does.
    pub description: String,
    /// JSON Schema defining the tool's parameters.
    ///
    /// This should be an object schema with properties defining each parameter.
    /// Example:
    /// ```json
    /// {
    ///   "type": "object",
    ///   "properties": {
    ///     "natural_language_query": {"type": "string"},
    ///     "chat_id": {"type": "string"}
    ///   },
    ///   "required": ["natural_language_query"]
    /// }
    /// ```
    pub parameters: Value,
}

impl ToolDefinition {
    /// Creates a new tool definition.
    pub fn new(name: impl Into<String>, description: impl Into<String>, parameters: Value) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
        }
    }
}

/// A tool that can be invoked through the tool-calling protocol.
///
/// Tools expose a [`ToolDefinition`] (name, description, JSON schema) for the
/// caller, and an async [`execute`](Tool::execute) method that runs with the
/// tool's captured environment.
pub trait Tool: Send + Sync + 'static {
    /// Returns the caller-facing tool definition with JSON schema.
    fn definition(&self) -> ToolDefinition;

    /// Executes the tool with JSON arguments.
    fn execute(
        &self,
        args: Value,
    ) -> Pin<Box<dyn Future<Output = Result<Value, ToolError>> + Send + '_>>;
}
