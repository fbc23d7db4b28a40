//! Client for the Yelp Fusion AI chat API.
//!
//! The API takes a natural-language query (plus an optional conversation id
//! and an optional location) and answers with a conversational reply and
//! structured business data.
//!
//! ```no_run
//! # async fn demo() {
//! use fusion_client::{FusionClient, FusionConfig, FusionRequest, UserContext};
//!
//! let client = FusionClient::new(FusionConfig::from_env());
//! let request = FusionRequest::new("Find emergency plumbers in Boston")
//!     .with_user_context(UserContext::from_coordinates(Some(42.36), Some(-71.06)));
//!
//! match client.chat(&request).await {
//!     Some(payload) => println!("{payload}"),
//!     None => eprintln!("request failed, see logs"),
//! }
//! # }
//! ```
//!
//! # Failure model
//!
//! [`FusionClient::send`] reports failures as a typed [`FusionError`].
//! [`FusionClient::chat`] logs each failure exactly once and reduces it to
//! `None`, which is what tool handlers consume.

mod client;
mod config;
mod error;
mod transport;
pub mod types;

pub use client::FusionClient;
pub use config::{API_KEY_ENV, ApiKey, Credential, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT, FusionConfig};
pub use error::{FusionError, TransportError};
pub use transport::{HttpResponse, HttpTransport, ReqwestTransport};
pub use types::{FusionRequest, FusionResponse, UserContext};

#[cfg(any(test, feature = "test-utils"))]
pub use transport::{MockTransport, RecordedRequest};
