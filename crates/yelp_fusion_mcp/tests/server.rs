//! The assembled server, driven through its JSON-RPC entry point.

use fusion_client::{Credential, FusionClient, FusionConfig, MockTransport};
use serde_json::{Value, json};
use std::sync::Arc;
use yelp_fusion_mcp::{SERVER_NAME, build_server, build_server_with_client};

async fn request(server: &fusion_mcp::McpServer, message: Value) -> Value {
    let response = server.handle_message(message).await.expect("no response");
    serde_json::to_value(response).unwrap()
}

#[tokio::test]
async fn handshake_advertises_the_server() {
    let server = build_server(FusionConfig::new(Credential::Missing));
    let response = request(
        &server,
        json!({"jsonrpc": "2.0", "id": 0, "method": "initialize", "params": {}}),
    )
    .await;

    let result = &response["result"];
    assert_eq!(result["protocolVersion"], "2025-06-18");
    assert_eq!(result["serverInfo"]["name"], SERVER_NAME);
    assert!(result["instructions"].as_str().unwrap().contains("chat_id"));
}

#[tokio::test]
async fn yelp_agent_is_the_only_tool() {
    let server = build_server(FusionConfig::new(Credential::Missing));
    let response = request(
        &server,
        json!({"jsonrpc": "2.0", "id": 1, "method": "tools/list"}),
    )
    .await;

    let tools = response["result"]["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 1);
    assert_eq!(tools[0]["name"], "yelp_agent");

    let schema = &tools[0]["inputSchema"];
    assert_eq!(schema["type"], "object");
    assert_eq!(schema["required"], json!(["natural_language_query"]));
    let properties: Vec<&str> = schema["properties"]
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(
        properties,
        ["natural_language_query", "search_latitude", "search_longitude", "chat_id"]
    );
}

#[tokio::test]
async fn missing_credential_yields_the_failure_text() {
    let server = build_server(FusionConfig::new(Credential::Missing));
    let response = request(
        &server,
        json!({
            "jsonrpc": "2.0",
            "id": 2,
            "method": "tools/call",
            "params": {"name": "yelp_agent", "arguments": {"natural_language_query": "tacos"}}
        }),
    )
    .await;

    let result = &response["result"];
    assert_eq!(result["content"].as_array().map(Vec::len), Some(1));
    assert_eq!(result["content"][0]["type"], "text");
    assert_eq!(result["content"][0]["text"], "Unable to fetch data from Yelp.");
    assert_eq!(result["isError"], false);
}

#[tokio::test]
async fn successful_call_returns_formatted_text() {
    let mock = Arc::new(MockTransport::new());
    mock.enqueue_json(&json!({
        "response": {"text": "Try these."},
        "chat_id": "conv-1",
        "entities": [{"businesses": [{"name": "Taqueria", "price": "$"}]}]
    }));
    let client = FusionClient::with_transport(
        FusionConfig::new(Credential::from_option(Some("key".to_string()))),
        mock.clone(),
    );
    let server = build_server_with_client(client);

    let response = request(
        &server,
        json!({
            "jsonrpc": "2.0",
            "id": 3,
            "method": "tools/call",
            "params": {
                "name": "yelp_agent",
                "arguments": {
                    "natural_language_query": "tacos",
                    "search_latitude": 30.27,
                    "search_longitude": -97.74
                }
            }
        }),
    )
    .await;

    let text = response["result"]["content"][0]["text"].as_str().unwrap();
    assert!(text.starts_with("# Introduction\nTry these.\n\n# Businesses\n\n## Business 1: Taqueria\n- **Price**: $"));
    assert!(text.contains("# Chat ID\nconv-1"));

    let sent = mock.take_requests();
    assert_eq!(
        sent[0].body["user_context"],
        json!({"latitude": 30.27, "longitude": -97.74})
    );
}
