//! Core infrastructure for the Fusion MCP server.
//!
//! This crate provides the pieces every binary in the workspace needs:
//!
//! - [`ServerInfo`] - Server metadata advertised during the MCP handshake
//! - [`TracingConfig`] - Logging and observability via the `tracing` crate
//!
//! # Feature Flags
//!
//! - `test-utils` - Enables [`LogCapture`] for asserting on emitted log events
//!
//! # Example
//!
//! ```no_run
//! use fusion_core::{TracingConfig, TracingFormat};
//! use tracing::Level;
//!
//! TracingConfig::default()
//!     .with_level(Level::DEBUG)
//!     .with_format(TracingFormat::Compact)
//!     .init();
//! ```

mod server_info;
mod tracing_setup;

#[cfg(any(test, feature = "test-utils"))]
mod capture;

pub use server_info::ServerInfo;
pub use tracing_setup::{
    LOG_FILTER_ENV, LOG_FORMAT_ENV, ParseFormatError, TracingConfig, TracingFormat,
};

// Re-export test utilities
#[cfg(any(test, feature = "test-utils"))]
pub use capture::{CapturedEvent, LogCapture};
