//! Tool framework for the Fusion MCP server.
//!
//! This crate provides the infrastructure for defining, registering, and
//! executing tools that a hosting agent runtime can call. Tools are async
//! callables that describe themselves with a JSON schema and receive their
//! arguments as a JSON object.
//!
//! # Quick Start
//!
//! ```
//! use std::future::Future;
//! use std::pin::Pin;
//! use fusion_tools::{FunctionCall, Tool, ToolDefinition, ToolError, ToolRegistry};
//!
//! struct Echo;
//!
//! impl Tool for Echo {
//!     fn definition(&self) -> ToolDefinition {
//!         ToolDefinition::new("echo", "Echo the input back.", serde_json::json!({
//!             "type": "object",
//!             "properties": { "text": { "type": "string" } },
//!             "required": ["text"]
//!         }))
//!     }
//!
//!     fn execute(
//!         &self,
//!         args: serde_json::Value,
//!     ) -> Pin<Box<dyn Future<Output = Result<serde_json::Value, ToolError>> + Send + '_>> {
//!         Box::pin(async move {
//!             let call = FunctionCall::from_value("echo", args)?;
//!             let text: String = call.get_param("text")?;
//!             Ok(serde_json::Value::String(text))
//!         })
//!     }
//! }
//!
//! let mut registry = ToolRegistry::new();
//! registry.register(Echo);
//! assert!(registry.has("echo"));
//! ```
//!
//! # Architecture
//!
//! - [`Tool`] - trait for executable tools with JSON schema
//! - [`ToolDefinition`] - name, description and parameter schema
//! - [`ToolRegistry`] - stores and dispatches tools
//! - [`FunctionCall`] / [`InputParam`] - parameter extraction
//! - [`FunctionMetadata`] / [`ParameterInfo`] - schema building

pub mod error;
pub mod param;
pub mod registry;
pub mod schema;
pub mod tool;

// Re-export core types at crate root.
pub use error::ToolError;
pub use param::{FunctionCall, InputParam};
pub use registry::ToolRegistry;
pub use schema::{FunctionMetadata, ParameterInfo};
pub use tool::{Tool, ToolDefinition};
