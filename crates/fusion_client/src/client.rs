//! Fusion AI chat client.

use crate::config::{API_KEY_ENV, Credential, FusionConfig};
use crate::error::FusionError;
use crate::transport::{HttpTransport, ReqwestTransport};
use crate::types::FusionRequest;
use serde_json::Value;
use std::sync::Arc;

/// Most characters of an error response body written to the error log.
const LOGGED_BODY_LIMIT: usize = 512;

/// Client for the Fusion AI chat endpoint.
///
/// Holds only immutable configuration and a shared transport; cloning is cheap
/// and concurrent calls share no mutable state.
#[derive(Clone)]
pub struct FusionClient {
    config: FusionConfig,
    transport: Arc<dyn HttpTransport>,
}

impl FusionClient {
    /// Creates a client that talks to the network through `reqwest`.
    #[must_use]
    pub fn new(config: FusionConfig) -> Self {
        Self::with_transport(config, Arc::new(ReqwestTransport))
    }

    /// Creates a client with the credential read from `YELP_API_KEY`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(FusionConfig::from_env())
    }

    /// Creates a client over a custom transport.
    #[must_use]
    pub fn with_transport(config: FusionConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self { config, transport }
    }

    /// Returns the client configuration.
    #[must_use]
    pub fn config(&self) -> &FusionConfig {
        &self.config
    }

    /// Sends a chat request and returns the parsed JSON payload.
    ///
    /// No network I/O happens when the credential is missing.
    pub async fn send(&self, request: &FusionRequest) -> Result<Value, FusionError> {
        let Credential::Present(api_key) = self.config.credential() else {
            return Err(FusionError::MissingCredential(API_KEY_ENV));
        };

        let body = serde_json::to_value(request)?;

        tracing::debug!(
            endpoint = self.config.endpoint(),
            has_chat_id = request.chat_id.is_some(),
            has_location = request.user_context.is_some(),
            "sending Fusion AI request"
        );

        let response = self
            .transport
            .post_json(
                self.config.endpoint(),
                api_key.expose(),
                &body,
                self.config.timeout(),
            )
            .await?;

        if !response.is_success() {
            return Err(FusionError::Status {
                status: response.status,
                body: response.body,
            });
        }

        Ok(serde_json::from_str(&response.body)?)
    }

    /// Sends a chat request, logging any failure and reducing it to `None`.
    pub async fn chat(&self, request: &FusionRequest) -> Option<Value> {
        match self.send(request).await {
            Ok(payload) => Some(payload),
            Err(err) => {
                log_failure(&err);
                None
            }
        }
    }
}

/// Logs a failure once, with a message that identifies its class.
fn log_failure(err: &FusionError) {
    match err {
        FusionError::MissingCredential(env_var) => {
            tracing::warn!(env_var, "Fusion AI credential is not set; skipping request");
        }
        FusionError::Transport(source) => {
            tracing::error!(error = %source, "Fusion AI transport error");
        }
        FusionError::Status { status, body } => {
            tracing::error!(
                status,
                body = %body_excerpt(body),
                body_bytes = body.len(),
                "Fusion AI returned HTTP error status"
            );
        }
        FusionError::Json(source) => {
            tracing::error!(error = %source, "Unexpected error making Fusion AI request");
        }
    }
}

/// The first [`LOGGED_BODY_LIMIT`] characters of `body`, marked when cut.
fn body_excerpt(body: &str) -> std::borrow::Cow<'_, str> {
    match body.char_indices().nth(LOGGED_BODY_LIMIT) {
        Some((cut, _)) => format!("{}... [truncated]", &body[..cut]).into(),
        None => body.into(),
    }
}

impl core::fmt::Debug for FusionClient {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FusionClient")
            .field("endpoint", &self.config.endpoint())
            .field("timeout", &self.config.timeout())
            .field("credential", &self.config.credential().is_present())
            .finish_non_exhaustive()
    }
}
