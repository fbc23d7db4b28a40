//! Client configuration.

use core::time::Duration;

/// Environment variable holding the bearer token.
pub const API_KEY_ENV: &str = "YELP_API_KEY";

/// Fusion AI chat endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.yelp.com/ai/chat/v2";

/// Per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A bearer token. Redacted in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wraps a token.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the raw token.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("ApiKey([REDACTED])")
    }
}

/// Whether a credential was configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    /// A usable token.
    Present(ApiKey),
    /// No token was configured; requests are skipped.
    Missing,
}

impl Credential {
    /// Reads the credential from the given environment variable.
    ///
    /// Unset and blank values are both [`Credential::Missing`].
    #[must_use]
    pub fn from_env(env_var: &str) -> Self {
        Self::from_option(std::env::var(env_var).ok())
    }

    /// Builds a credential from an optional raw value.
    #[must_use]
    pub fn from_option(value: Option<String>) -> Self {
        match value {
            Some(key) if !key.trim().is_empty() => Self::Present(ApiKey::new(key.trim())),
            _ => Self::Missing,
        }
    }

    /// Returns `true` when a token is configured.
    #[must_use]
    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }
}

/// Configuration for [`FusionClient`](crate::FusionClient).
#[derive(Debug, Clone)]
pub struct FusionConfig {
    endpoint: String,
    timeout: Duration,
    credential: Credential,
}

impl FusionConfig {
    /// Creates a configuration for the default endpoint and timeout.
    #[must_use]
    pub fn new(credential: Credential) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            credential,
        }
    }

    /// Creates a configuration with the credential read from `YELP_API_KEY`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(Credential::from_env(API_KEY_ENV))
    }

    /// Overrides the endpoint URL.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Overrides the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the endpoint URL.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the configured credential.
    #[must_use]
    pub fn credential(&self) -> &Credential {
        &self.credential
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_credential_is_missing() {
        assert_eq!(Credential::from_option(None), Credential::Missing);
        assert_eq!(Credential::from_option(Some("  ".into())), Credential::Missing);
        assert!(Credential::from_option(Some("key".into())).is_present());
    }

    #[test]
    fn api_key_debug_is_redacted() {
        let credential = Credential::from_option(Some("secret-token".into()));
        let rendered = format!("{credential:?}");
        assert!(!rendered.contains("secret-token"), "leaked: {rendered}");
        assert!(rendered.contains("REDACTED"));
    }

    #[test]
    fn defaults_match_the_public_endpoint() {
        let config = FusionConfig::new(Credential::Missing);
        assert_eq!(config.endpoint(), "https://api.yelp.com/ai/chat/v2");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(!config.credential().is_present());
    }

    #[test]
    fn overrides_apply() {
        let config = FusionConfig::new(Credential::Missing)
            .with_endpoint("http://localhost:9999/chat")
            .with_timeout(Duration::from_secs(2));
        assert_eq!(config.endpoint(), "http://localhost:9999/chat");
        assert_eq!(config.timeout(), Duration::from_secs(2));
    }
}
