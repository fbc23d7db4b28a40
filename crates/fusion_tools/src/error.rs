//! Error types for tool execution.

use thiserror::Error;

/// Errors that can occur during tool lookup or execution.
#[derive(Debug, Error)]
pub enum ToolError {
    /// No tool with the requested name is registered.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Error during parameter deserialization or parsing.
    #[error("Parameter error: {0}")]
    ParameterError(String),
}

impl ToolError {
    /// Creates an [`UnknownTool`](Self::UnknownTool).
    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::UnknownTool(name.into())
    }

    /// Creates a [`ParameterError`](Self::ParameterError).
    pub fn parameter_error(msg: impl Into<String>) -> Self {
        Self::ParameterError(msg.into())
    }
}
