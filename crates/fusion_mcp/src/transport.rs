//! Line-oriented message transports.
//!
//! MCP over stdio frames each JSON-RPC message as a single line of UTF-8
//! JSON. [`MessageTransport`] abstracts the channel so the serving loop can
//! run over real stdio ([`StdioTransport`]), any pair of async streams
//! ([`StreamTransport`]), or a scripted queue in tests
//! ([`MockMessageTransport`], behind the `test-utils` feature).

use crate::error::McpError;
use std::future::Future;
#[cfg(any(test, feature = "test-utils"))]
use std::collections::VecDeque;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Stdin, Stdout};
use tokio::sync::Mutex;

/// A bidirectional channel of newline-delimited messages.
pub trait MessageTransport: Send + Sync + 'static {
    /// Receives the next message, without its line terminator.
    ///
    /// Returns `Ok(None)` once the peer has closed the channel.
    fn receive(&self) -> impl Future<Output = Result<Option<String>, McpError>> + Send + '_;

    /// Sends one message as a single line.
    fn send(&self, message: String) -> impl Future<Output = Result<(), McpError>> + Send + '_;
}

// ─────────────────────────────────────────────────────────────────────────────
// StreamTransport
// ─────────────────────────────────────────────────────────────────────────────

/// [`MessageTransport`] over an async reader and writer.
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected, so a
/// garbled line becomes a parse error for that message instead of ending the
/// session.
pub struct StreamTransport<R, W> {
    reader: Mutex<R>,
    writer: Mutex<W>,
}

/// [`StreamTransport`] over the process's stdin and stdout.
pub type StdioTransport = StreamTransport<BufReader<Stdin>, Stdout>;

impl<R, W> StreamTransport<R, W> {
    /// Wraps a reader and writer.
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader: Mutex::new(reader),
            writer: Mutex::new(writer),
        }
    }
}

impl StdioTransport {
    /// Creates a transport over stdin and stdout.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
    }
}

impl<R, W> MessageTransport for StreamTransport<R, W>
where
    R: AsyncBufRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin + Send + 'static,
{
    async fn receive(&self) -> Result<Option<String>, McpError> {
        let mut reader = self.reader.lock().await;
        let mut buf = Vec::new();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&buf);
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }

    async fn send(&self, message: String) -> Result<(), McpError> {
        let mut writer = self.writer.lock().await;
        writer.write_all(message.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// MockMessageTransport for Testing
// ─────────────────────────────────────────────────────────────────────────────

/// Mock transport for testing.
///
/// Replays queued inbound lines, then reports end of input. Every sent
/// message is recorded.
#[cfg(any(test, feature = "test-utils"))]
pub struct MockMessageTransport {
    inbound: std::sync::Mutex<VecDeque<String>>,
    sent: std::sync::Mutex<Vec<String>>,
}

#[cfg(any(test, feature = "test-utils"))]
impl MockMessageTransport {
    /// Creates a mock that will replay `lines` in order.
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inbound: std::sync::Mutex::new(lines.into_iter().map(Into::into).collect()),
            sent: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// Takes all sent messages, clearing the internal record.
    pub fn take_sent(&self) -> Vec<String> {
        std::mem::take(&mut *self.sent.lock().expect("MockMessageTransport lock poisoned"))
    }

    /// Returns the number of sent messages.
    #[must_use]
    pub fn sent_count(&self) -> usize {
        self.sent
            .lock()
            .expect("MockMessageTransport lock poisoned")
            .len()
    }
}

#[cfg(any(test, feature = "test-utils"))]
impl MessageTransport for MockMessageTransport {
    async fn receive(&self) -> Result<Option<String>, McpError> {
        Ok(self
            .inbound
            .lock()
            .expect("MockMessageTransport lock poisoned")
            .pop_front())
    }

    async fn send(&self, message: String) -> Result<(), McpError> {
        self.sent
            .lock()
            .expect("MockMessageTransport lock poisoned")
            .push(message);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stream_transport_splits_lines_and_strips_terminators() {
        let input: &[u8] = b"{\"a\":1}\r\n{\"b\":2}\nlast";
        let transport = StreamTransport::new(input, Vec::new());

        assert_eq!(transport.receive().await.unwrap().as_deref(), Some("{\"a\":1}"));
        assert_eq!(transport.receive().await.unwrap().as_deref(), Some("{\"b\":2}"));
        assert_eq!(transport.receive().await.unwrap().as_deref(), Some("last"));
        assert_eq!(transport.receive().await.unwrap(), None);
    }

    #[tokio::test]
    async fn stream_transport_writes_one_line_per_message() {
        let transport = StreamTransport::new(&b""[..], Vec::new());
        transport.send("first".to_string()).await.unwrap();
        transport.send("second".to_string()).await.unwrap();

        let written = transport.writer.into_inner();
        assert_eq!(written, b"first\nsecond\n");
    }

    #[tokio::test]
    async fn invalid_utf8_is_replaced_not_fatal() {
        let input: &[u8] = b"\xff\xfe\n";
        let transport = StreamTransport::new(input, Vec::new());
        let line = transport.receive().await.unwrap().unwrap();
        assert!(line.contains('\u{FFFD}'));
    }

    #[tokio::test]
    async fn mock_replays_then_reports_eof() {
        let mock = MockMessageTransport::new(["one", "two"]);
        assert_eq!(mock.receive().await.unwrap().as_deref(), Some("one"));
        assert_eq!(mock.receive().await.unwrap().as_deref(), Some("two"));
        assert_eq!(mock.receive().await.unwrap(), None);

        mock.send("reply".to_string()).await.unwrap();
        assert_eq!(mock.sent_count(), 1);
        assert_eq!(mock.take_sent(), ["reply"]);
    }
}
