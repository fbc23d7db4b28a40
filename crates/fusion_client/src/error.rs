//! Error types for Fusion AI requests.

/// Failures below the HTTP status line: connection, DNS, timeout, I/O.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TransportError {
    /// The request did not complete within the timeout.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// The connection could not be established (DNS, refused, TLS).
    #[error("connection failed: {0}")]
    Connect(String),

    /// A header value could not be encoded.
    #[error("invalid header: {0}")]
    InvalidHeader(String),

    /// Any other transport failure (body read, redirect loop, ...).
    #[error("http error: {0}")]
    Other(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        let detail = error_chain(&err);
        if err.is_timeout() {
            Self::Timeout(detail)
        } else if err.is_connect() {
            Self::Connect(detail)
        } else {
            Self::Other(detail)
        }
    }
}

/// Renders an error followed by each of its sources, joined by `": "`.
///
/// `reqwest` keeps the useful part ("connection refused", "operation timed
/// out") in the source chain, not in its own `Display`.
pub(crate) fn error_chain(err: &dyn std::error::Error) -> String {
    let mut rendered = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !rendered.ends_with(&text) {
            rendered.push_str(": ");
            rendered.push_str(&text);
        }
        source = cause.source();
    }
    rendered
}

/// Errors for a Fusion AI chat request.
#[derive(Debug, thiserror::Error)]
pub enum FusionError {
    /// No credential was configured; no request was sent.
    #[error("credential {0} is not set")]
    MissingCredential(&'static str),

    /// The request never produced an HTTP response.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The service answered with a non-2xx status.
    #[error("http status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, verbatim.
        body: String,
    },

    /// JSON encoding of the request or decoding of the response failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("{message}")]
    struct Layered {
        message: &'static str,
        #[source]
        source: Option<Box<Layered>>,
    }

    fn layered(messages: &[&'static str]) -> Layered {
        let (first, rest) = messages.split_first().expect("at least one message");
        Layered {
            message: first,
            source: (!rest.is_empty()).then(|| Box::new(layered(rest))),
        }
    }

    #[test]
    fn chain_includes_every_cause() {
        let err = layered(&[
            "error sending request for url (http://127.0.0.1:1/chat)",
            "client error (Connect)",
            "Connection refused (os error 111)",
        ]);
        assert_eq!(
            error_chain(&err),
            "error sending request for url (http://127.0.0.1:1/chat): \
             client error (Connect): Connection refused (os error 111)"
        );
    }

    #[test]
    fn chain_skips_a_cause_already_in_the_message() {
        let err = layered(&["timed out: operation timed out", "operation timed out"]);
        assert_eq!(error_chain(&err), "timed out: operation timed out");
    }

    #[test]
    fn single_error_renders_alone() {
        assert_eq!(error_chain(&layered(&["boom"])), "boom");
    }
}
