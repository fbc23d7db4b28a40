//! The `yelp_agent` tool.
//!
//! [`YelpAgentTool`] turns a natural-language query (plus an optional
//! location and conversation id) into a Fusion AI chat request and renders
//! the reply with [`format_fusion_response`]. Every failure surfaces to the
//! caller as the single string [`FETCH_FAILED_MESSAGE`]; the details go to
//! the log.
//!
//! ```no_run
//! # async fn demo() {
//! use fusion_agent::YelpAgentTool;
//! use fusion_client::FusionClient;
//! use fusion_tools::ToolRegistry;
//!
//! let mut registry = ToolRegistry::new();
//! registry.register(YelpAgentTool::new(FusionClient::from_env()));
//!
//! let reply = registry
//!     .execute(
//!         "yelp_agent",
//!         &serde_json::json!({"natural_language_query": "Best tacos in Austin"}),
//!     )
//!     .await;
//! # let _ = reply;
//! # }
//! ```

mod format;
mod tool;

pub use format::{NO_INTRODUCTION, format_fusion_response};
pub use tool::{FETCH_FAILED_MESSAGE, TOOL_NAME, YelpAgentTool};
