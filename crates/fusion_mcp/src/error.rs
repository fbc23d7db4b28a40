//! Fatal server errors.
//!
//! Protocol-level problems (bad JSON, unknown methods) are answered on the
//! wire and never surface here. [`McpError`] is reserved for failures that
//! stop the serving loop.

/// Errors that end a serving session.
#[derive(Debug, thiserror::Error)]
pub enum McpError {
    /// Reading from or writing to the transport failed.
    #[error("transport I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The writer task stopped unexpectedly.
    #[error("response writer stopped: {0}")]
    WriterStopped(String),
}
