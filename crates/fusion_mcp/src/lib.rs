//! Model Context Protocol server.
//!
//! Speaks JSON-RPC 2.0 over newline-delimited stdio and exposes the tools of
//! a [`fusion_tools::ToolRegistry`]. Supported methods:
//!
//! | Method | Response |
//! |--------|----------|
//! | `initialize` | protocol version, capabilities, server info, instructions |
//! | `notifications/initialized` | none |
//! | `ping` | `{}` |
//! | `tools/list` | every registered tool with its input schema |
//! | `tools/call` | tool output as text content |
//!
//! # Example
//!
//! ```no_run
//! use fusion_core::ServerInfo;
//! use fusion_mcp::McpServer;
//! use fusion_tools::ToolRegistry;
//!
//! # async fn run() -> Result<(), fusion_mcp::McpError> {
//! let registry = ToolRegistry::new();
//! let server = McpServer::new(registry, ServerInfo::default());
//! server.serve_stdio().await
//! # }
//! ```
//!
//! # Feature Flags
//!
//! - `test-utils` - Enables [`MockMessageTransport`] for scripted sessions

mod error;
pub mod protocol;
mod server;
mod transport;

pub use error::McpError;
pub use server::McpServer;
pub use transport::{MessageTransport, StdioTransport, StreamTransport};

#[cfg(any(test, feature = "test-utils"))]
pub use transport::MockMessageTransport;
