//! # Fusion Internal Library
//!
//! Re-exports the Fusion crates for convenience.

/// Tracing setup and server metadata.
pub use fusion_core;

/// Tool trait, schemas and registry.
pub use fusion_tools;

/// Fusion AI chat API client.
pub use fusion_client;

/// The `yelp_agent` tool and response formatter.
pub use fusion_agent;

/// MCP server over stdio.
pub use fusion_mcp;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use fusion_agent::{FETCH_FAILED_MESSAGE, YelpAgentTool, format_fusion_response};
    pub use fusion_client::{Credential, FusionClient, FusionConfig, FusionRequest, UserContext};
    pub use fusion_core::{ServerInfo, TracingConfig, TracingFormat};
    pub use fusion_mcp::{McpError, McpServer};
    pub use fusion_tools::{Tool, ToolDefinition, ToolError, ToolRegistry};
}
