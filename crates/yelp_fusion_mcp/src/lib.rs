//! Wiring for the `yelp-fusion-mcp` server.
//!
//! Builds an [`McpServer`] whose only tool is `yelp_agent`.

use fusion_agent::YelpAgentTool;
use fusion_client::{FusionClient, FusionConfig};
use fusion_core::ServerInfo;
use fusion_mcp::McpServer;
use fusion_tools::ToolRegistry;

/// Name reported in the MCP handshake.
pub const SERVER_NAME: &str = "yelp-fusion-mcp";

const INSTRUCTIONS: &str = "\
Use the yelp_agent tool for any question about local businesses: search, \
details, comparisons, itineraries and reservations. Always include the Yelp \
URL of every business you recommend. To ask a follow-up, pass the chat_id \
returned by the previous call.";

/// Server metadata advertised to clients.
#[must_use]
pub fn server_info() -> ServerInfo {
    ServerInfo::new(SERVER_NAME, env!("CARGO_PKG_VERSION"))
        .with_title("Yelp Fusion AI")
        .with_instructions(INSTRUCTIONS)
}

/// Builds the server around an existing client.
#[must_use]
pub fn build_server_with_client(client: FusionClient) -> McpServer {
    let mut registry = ToolRegistry::new();
    registry.register(YelpAgentTool::new(client));
    McpServer::new(registry, server_info())
}

/// Builds the server for the given configuration.
#[must_use]
pub fn build_server(config: FusionConfig) -> McpServer {
    build_server_with_client(FusionClient::new(config))
}
