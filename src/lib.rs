//! Yelp Fusion AI exposed as a Model Context Protocol tool.
//!

pub use fusion_internal::*;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use fusion_internal::prelude::*;
}
