//! HTTP transport seam.
//!
//! [`HttpTransport`] is the single point where bytes leave the process.
//! [`ReqwestTransport`] is the production implementation; tests substitute
//! [`MockTransport`] (behind the `test-utils` feature) to script replies and
//! count calls.

use crate::error::TransportError;
use async_trait::async_trait;
use core::time::Duration;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::Value;
#[cfg(any(test, feature = "test-utils"))]
use std::collections::VecDeque;
#[cfg(any(test, feature = "test-utils"))]
use std::sync::Mutex;

/// Status line and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

impl HttpResponse {
    /// Creates a response.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns `true` for 2xx statuses.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one authenticated JSON POST.
#[async_trait]
pub trait HttpTransport: Send + Sync + 'static {
    /// Posts `body` to `url` with a bearer token and the given timeout.
    ///
    /// Returns `Ok` for any HTTP response, including error statuses; `Err` is
    /// reserved for failures that produced no response.
    async fn post_json(
        &self,
        url: &str,
        bearer_token: &str,
        body: &Value,
        timeout: Duration,
    ) -> Result<HttpResponse, TransportError>;
}

/// [`HttpTransport`] backed by `reqwest`.
///
/// Each call builds its own client and drops it when the call completes, so no
/// connection state is shared between requests.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReqwestTransport;

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post_json(
        &self,
        url: &str,
        bearer_token: &str,
        body: &Value,
        timeout: Duration,
    ) -> Result<HttpResponse, TransportError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let mut auth = HeaderValue::from_str(&format!("Bearer {bearer_token}"))
            .map_err(|err| TransportError::InvalidHeader(err.to_string()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let client = reqwest::Client::builder().timeout(timeout).build()?;

        let response = client.post(url).headers(headers).json(body).send().await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        tracing::debug!(status, bytes = body.len(), "Fusion AI response received");

        Ok(HttpResponse { status, body })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// MockTransport for Testing
// ─────────────────────────────────────────────────────────────────────────────

/// A request captured by [`MockTransport`].
#[cfg(any(test, feature = "test-utils"))]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    /// Target URL.
    pub url: String,
    /// Bearer token sent.
    pub bearer_token: String,
    /// JSON body sent.
    pub body: Value,
    /// Timeout requested.
    pub timeout: Duration,
}

/// Mock transport for testing.
///
/// Records every request and answers with scripted replies in FIFO order.
/// When the script runs dry it fails with [`TransportError::Other`].
///
/// # Example
///
/// ```ignore
/// let mock = Arc::new(MockTransport::new());
/// mock.enqueue_response(200, r#"{"chat_id": "c1"}"#);
///
/// let config = FusionConfig::new(Credential::from_option(Some("key".into())));
/// let client = FusionClient::with_transport(config, mock.clone());
/// let payload = client.chat(&FusionRequest::new("coffee")).await;
///
/// assert!(payload.is_some());
/// assert_eq!(mock.call_count(), 1);
/// ```
#[cfg(any(test, feature = "test-utils"))]
pub struct MockTransport {
    requests: Mutex<Vec<RecordedRequest>>,
    replies: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
}

#[cfg(any(test, feature = "test-utils"))]
impl MockTransport {
    /// Creates a mock with no scripted replies.
    #[must_use]
    pub fn new() -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            replies: Mutex::new(VecDeque::new()),
        }
    }

    /// Queues an HTTP response.
    pub fn enqueue_response(&self, status: u16, body: impl Into<String>) {
        self.replies
            .lock()
            .expect("MockTransport lock poisoned")
            .push_back(Ok(HttpResponse::new(status, body)));
    }

    /// Queues a JSON HTTP 200 response.
    pub fn enqueue_json(&self, body: &Value) {
        self.enqueue_response(200, body.to_string());
    }

    /// Queues a transport failure.
    pub fn enqueue_error(&self, error: TransportError) {
        self.replies
            .lock()
            .expect("MockTransport lock poisoned")
            .push_back(Err(error));
    }

    /// Returns the number of requests received.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.requests
            .lock()
            .expect("MockTransport lock poisoned")
            .len()
    }

    /// Takes all recorded requests, clearing the internal record.
    pub fn take_requests(&self) -> Vec<RecordedRequest> {
        std::mem::take(&mut *self.requests.lock().expect("MockTransport lock poisoned"))
    }
}

#[cfg(any(test, feature = "test-utils"))]
impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[async_trait]
impl HttpTransport for MockTransport {
    async fn post_json(
        &self,
        url: &str,
        bearer_token: &str,
        body: &Value,
        timeout: Duration,
    ) -> Result<HttpResponse, TransportError> {
        self.requests
            .lock()
            .expect("MockTransport lock poisoned")
            .push(RecordedRequest {
                url: url.to_string(),
                bearer_token: bearer_token.to_string(),
                body: body.clone(),
                timeout,
            });

        self.replies
            .lock()
            .expect("MockTransport lock poisoned")
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Other("no scripted reply".to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_covers_the_2xx_range() {
        assert!(HttpResponse::new(200, "").is_success());
        assert!(HttpResponse::new(204, "").is_success());
        assert!(!HttpResponse::new(199, "").is_success());
        assert!(!HttpResponse::new(301, "").is_success());
        assert!(!HttpResponse::new(503, "").is_success());
    }

    #[tokio::test]
    async fn mock_replies_in_order_then_fails() {
        let mock = MockTransport::new();
        mock.enqueue_response(201, "first");
        mock.enqueue_error(TransportError::Timeout("slow".into()));

        let body = serde_json::json!({"query": "q"});
        let timeout = Duration::from_secs(1);

        let first = mock.post_json("u", "t", &body, timeout).await.unwrap();
        assert_eq!(first, HttpResponse::new(201, "first"));

        let second = mock.post_json("u", "t", &body, timeout).await;
        assert!(matches!(second, Err(TransportError::Timeout(_))));

        let third = mock.post_json("u", "t", &body, timeout).await;
        assert!(matches!(third, Err(TransportError::Other(_))));

        assert_eq!(mock.call_count(), 3);
        let recorded = mock.take_requests();
        assert_eq!(recorded[0].bearer_token, "t");
        assert_eq!(recorded[0].body, body);
        assert_eq!(mock.call_count(), 0);
    }

    mod wire {
        use super::*;
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        use tokio::net::{TcpListener, TcpStream};
        use tokio::task::JoinHandle;

        async fn listener() -> (TcpListener, String) {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let url = format!("http://{}/chat", listener.local_addr().unwrap());
            (listener, url)
        }

        /// Reads one HTTP/1.1 request: the head up to the blank line, then
        /// `content-length` bytes of body.
        async fn read_request(stream: &mut TcpStream) -> (String, String) {
            let mut raw = Vec::new();
            let mut chunk = [0u8; 1024];
            loop {
                let read = stream.read(&mut chunk).await.unwrap();
                assert!(read > 0, "peer closed before the request was complete");
                raw.extend_from_slice(&chunk[..read]);

                let Some(end) = raw.windows(4).position(|window| window == b"\r\n\r\n") else {
                    continue;
                };
                let head = String::from_utf8_lossy(&raw[..end]).to_lowercase();
                let length = head
                    .lines()
                    .find_map(|line| line.strip_prefix("content-length:"))
                    .and_then(|value| value.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if raw.len() >= end + 4 + length {
                    let body = String::from_utf8_lossy(&raw[end + 4..end + 4 + length]);
                    return (head, body.into_owned());
                }
            }
        }

        /// Answers the first connection with `reply` and hands back what it read.
        fn answer_once(listener: TcpListener, reply: &'static str) -> JoinHandle<(String, String)> {
            tokio::spawn(async move {
                let (mut stream, _) = listener.accept().await.unwrap();
                let request = read_request(&mut stream).await;
                stream.write_all(reply.as_bytes()).await.unwrap();
                stream.shutdown().await.unwrap();
                request
            })
        }

        #[tokio::test]
        async fn posts_json_with_bearer_auth() {
            let (listener, url) = listener().await;
            let server = answer_once(
                listener,
                "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 16\r\nconnection: close\r\n\r\n{\"chat_id\":\"c1\"}",
            );

            let response = ReqwestTransport
                .post_json(&url, "tok", &serde_json::json!({"query": "q"}), Duration::from_secs(5))
                .await
                .unwrap();
            let (head, body) = server.await.unwrap();

            assert!(head.starts_with("post /chat http/1.1"), "{head}");
            assert!(head.contains("\r\ncontent-type: application/json"), "{head}");
            assert!(head.contains("\r\nauthorization: bearer tok"), "{head}");
            assert_eq!(body, r#"{"query":"q"}"#);
            assert_eq!(response, HttpResponse::new(200, r#"{"chat_id":"c1"}"#));
        }

        #[tokio::test]
        async fn error_status_is_returned_not_raised() {
            let (listener, url) = listener().await;
            let server = answer_once(
                listener,
                "HTTP/1.1 503 Service Unavailable\r\ncontent-length: 4\r\nconnection: close\r\n\r\nbusy",
            );

            let response = ReqwestTransport
                .post_json(&url, "tok", &serde_json::json!({"query": "q"}), Duration::from_secs(5))
                .await
                .unwrap();
            server.await.unwrap();

            assert_eq!(response, HttpResponse::new(503, "busy"));
            assert!(!response.is_success());
        }

        #[tokio::test]
        async fn stalled_peer_times_out() {
            let (listener, url) = listener().await;
            let server = tokio::spawn(async move {
                let (stream, _) = listener.accept().await.unwrap();
                tokio::time::sleep(Duration::from_secs(10)).await;
                drop(stream);
            });

            let result = ReqwestTransport
                .post_json(&url, "tok", &serde_json::json!({"query": "q"}), Duration::from_millis(200))
                .await;
            server.abort();

            assert!(matches!(result, Err(TransportError::Timeout(_))), "{result:?}");
        }

        #[tokio::test]
        async fn refused_connection_keeps_the_cause() {
            let (listener, url) = listener().await;
            drop(listener);

            let result = ReqwestTransport
                .post_json(&url, "tok", &serde_json::json!({"query": "q"}), Duration::from_secs(5))
                .await;

            match result {
                Err(TransportError::Connect(detail)) => {
                    assert!(detail.contains(&url), "{detail}");
                    assert!(detail.to_lowercase().contains("refused"), "{detail}");
                }
                other => panic!("expected a connect error, got {other:?}"),
            }
        }

        #[tokio::test]
        async fn unencodable_token_is_an_invalid_header() {
            let result = ReqwestTransport
                .post_json(
                    "http://127.0.0.1:9/chat",
                    "bad\ntoken",
                    &serde_json::json!({}),
                    Duration::from_secs(1),
                )
                .await;
            assert!(matches!(result, Err(TransportError::InvalidHeader(_))), "{result:?}");
        }
    }
}
