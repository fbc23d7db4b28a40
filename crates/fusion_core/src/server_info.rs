//! Server metadata.
//!
//! [`ServerInfo`] is the identity the server reports to a connecting client
//! (name, title, version) plus the free-form usage instructions sent back in
//! the `initialize` handshake.
//!
//! # Example
//!
//! ```
//! use fusion_core::ServerInfo;
//!
//! let info = ServerInfo::new("yelp-fusion-mcp", "1.2.3")
//!     .with_title("Yelp Fusion AI")
//!     .with_instructions("Use yelp_agent for local business questions.");
//!
//! assert_eq!(info.name, "yelp-fusion-mcp");
//! assert_eq!(info.title.as_deref(), Some("Yelp Fusion AI"));
//! ```

/// Server runtime information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerInfo {
    /// Machine-readable server name.
    pub name: String,
    /// Human-readable display title.
    pub title: Option<String>,
    /// Server version string.
    pub version: String,
    /// Usage instructions for the connecting client.
    pub instructions: Option<String>,
}

impl ServerInfo {
    /// Creates server info with the given name and version.
    #[must_use]
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: None,
            version: version.into(),
            instructions: None,
        }
    }

    /// Sets the display title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the client instructions.
    #[must_use]
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }
}

impl Default for ServerInfo {
    fn default() -> Self {
        Self::new("fusion-mcp", env!("CARGO_PKG_VERSION"))
    }
}
