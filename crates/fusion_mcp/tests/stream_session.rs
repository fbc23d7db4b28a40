//! Full sessions over in-memory byte streams.

use fusion_core::ServerInfo;
use fusion_mcp::{McpServer, StreamTransport};
use fusion_tools::{Tool, ToolDefinition, ToolError, ToolRegistry};
use serde_json::{Value, json};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, DuplexStream, ReadHalf, WriteHalf};
use tokio::sync::Notify;
use tokio::task::JoinHandle;

/// `wait` blocks until `release` has been called.
struct Gate {
    notify: Arc<Notify>,
    name: &'static str,
}

impl Tool for Gate {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(self.name, "Gate half.", json!({"type": "object"}))
    }

    fn execute(
        &self,
        _args: Value,
    ) -> Pin<Box<dyn Future<Output = Result<Value, ToolError>> + Send + '_>> {
        Box::pin(async move {
            if self.name == "wait" {
                self.notify.notified().await;
            } else {
                self.notify.notify_one();
            }
            Ok(Value::String(self.name.to_string()))
        })
    }
}

struct Slow;

impl Tool for Slow {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new("slow", "Answers after a short delay.", json!({"type": "object"}))
    }

    fn execute(
        &self,
        _args: Value,
    ) -> Pin<Box<dyn Future<Output = Result<Value, ToolError>> + Send + '_>> {
        Box::pin(async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            Ok(Value::String("done".to_string()))
        })
    }
}

struct Session {
    input: WriteHalf<DuplexStream>,
    output: tokio::io::Lines<BufReader<ReadHalf<DuplexStream>>>,
    server: JoinHandle<Result<(), fusion_mcp::McpError>>,
}

fn start() -> Session {
    let notify = Arc::new(Notify::new());
    let mut registry = ToolRegistry::new();
    registry.register(Gate {
        notify: Arc::clone(&notify),
        name: "wait",
    });
    registry.register(Gate {
        notify,
        name: "release",
    });
    registry.register(Slow);
    let server = Arc::new(McpServer::new(registry, ServerInfo::new("session-test", "0.0.0")));

    let (client, server_side) = tokio::io::duplex(64 * 1024);
    let (server_read, server_write) = tokio::io::split(server_side);
    let (client_read, client_write) = tokio::io::split(client);
    let transport = Arc::new(StreamTransport::new(BufReader::new(server_read), server_write));

    Session {
        input: client_write,
        output: BufReader::new(client_read).lines(),
        server: tokio::spawn(server.serve(transport)),
    }
}

fn call(id: u64, tool: &str) -> String {
    format!(
        "{}\n",
        json!({"jsonrpc": "2.0", "id": id, "method": "tools/call", "params": {"name": tool}})
    )
}

async fn next_response(session: &mut Session) -> Value {
    let line = tokio::time::timeout(Duration::from_secs(5), session.output.next_line())
        .await
        .expect("timed out waiting for a response")
        .unwrap()
        .expect("output closed");
    serde_json::from_str(&line).unwrap()
}

#[tokio::test]
async fn requests_are_handled_concurrently() {
    let mut session = start();

    session.input.write_all(call(1, "wait").as_bytes()).await.unwrap();
    session.input.write_all(call(2, "release").as_bytes()).await.unwrap();

    let first = next_response(&mut session).await;
    let second = next_response(&mut session).await;
    assert_eq!(first["id"], 2);
    assert_eq!(first["result"]["content"][0]["text"], "release");
    assert_eq!(second["id"], 1);
    assert_eq!(second["result"]["content"][0]["text"], "wait");

    session.input.shutdown().await.unwrap();
    session.server.await.unwrap().unwrap();
}

#[tokio::test]
async fn end_of_input_waits_for_in_flight_requests() {
    let mut session = start();

    session.input.write_all(call(7, "slow").as_bytes()).await.unwrap();
    session.input.shutdown().await.unwrap();

    let response = next_response(&mut session).await;
    assert_eq!(response["id"], 7);
    assert_eq!(response["result"]["content"][0]["text"], "done");

    tokio::time::timeout(Duration::from_secs(5), session.server)
        .await
        .expect("server did not stop")
        .unwrap()
        .unwrap();
}

#[tokio::test]
async fn garbage_line_does_not_end_the_session() {
    let mut session = start();

    session.input.write_all(b"this is not json\n").await.unwrap();
    session
        .input
        .write_all(b"{\"jsonrpc\":\"2.0\",\"id\":9,\"method\":\"ping\"}\n")
        .await
        .unwrap();

    let mut responses = vec![
        next_response(&mut session).await,
        next_response(&mut session).await,
    ];
    responses.sort_by_key(|response| response["id"].is_null());

    assert_eq!(responses[0], json!({"jsonrpc": "2.0", "id": 9, "result": {}}));
    assert_eq!(responses[1]["id"], Value::Null);
    assert_eq!(responses[1]["error"]["code"], -32700);

    session.input.shutdown().await.unwrap();
    session.server.await.unwrap().unwrap();
}
