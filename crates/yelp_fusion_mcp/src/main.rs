//! Yelp Fusion AI MCP server.
//!
//! Serves the `yelp_agent` tool over stdin/stdout until stdin closes.
//!
//! # Environment
//!
//! - `YELP_API_KEY` - bearer token for the Fusion AI API
//! - `FUSION_LOG` - log filter directives, e.g. `fusion_client=debug`
//! - `FUSION_LOG_FORMAT` - `pretty`, `compact` or `json`
//!
//! A `.env` file in the working directory is loaded first. Logs go to stderr.

use fusion_client::{API_KEY_ENV, FusionConfig};
use fusion_core::TracingConfig;
use std::process::ExitCode;
use yelp_fusion_mcp::build_server;

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    TracingConfig::from_env().init();

    tracing::info!("Starting Fusion AI MCP server");

    let config = FusionConfig::from_env();
    if !config.credential().is_present() {
        tracing::warn!(
            env_var = API_KEY_ENV,
            "Fusion AI credential is not set; yelp_agent calls will fail until it is"
        );
    }

    match build_server(config).serve_stdio().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "server stopped on a fatal error");
            ExitCode::FAILURE
        }
    }
}
