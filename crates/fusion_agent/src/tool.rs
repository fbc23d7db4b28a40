//! The `yelp_agent` tool.

use crate::format::format_fusion_response;
use fusion_client::{FusionClient, FusionRequest, UserContext};
use fusion_tools::{FunctionCall, FunctionMetadata, InputParam, Tool, ToolDefinition, ToolError};
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;

/// Name under which the tool is registered.
pub const TOOL_NAME: &str = "yelp_agent";

/// Text returned for every failed request.
pub const FETCH_FAILED_MESSAGE: &str = "Unable to fetch data from Yelp.";

const DESCRIPTION: &str = "\
Intelligent Yelp business agent for agent-to-agent communication. Answers any \
natural language request about local businesses through a conversation with \
Yelp's business data and reservation platform, returning both a natural \
language reply and structured business data. Keeps conversation context \
across turns.

When recommending businesses, ALWAYS include the Yelp URL from the structured \
data so users can open the business on Yelp directly.

Capabilities include business search, detailed questions, comparisons, \
itinerary planning, table reservations at participating restaurants through \
Yelp Reservations, and any other business analysis an agent with access to \
Yelp's data could provide.

Pass the chat_id from a previous response to ask follow-up questions.

Examples:
- \"Find emergency plumbers in Boston\"
- \"What do people say about the quality of their work?\" (follow-up with chat_id)
- \"Plan a progressive date in SF's Mission District\"
- \"What are their hours?\" (follow-up with chat_id)
- \"Book table for 2 at Mama Nachas tonight at 7pm\"
- \"Compare auto repair shops from budget to luxury in Sacramento\"";

/// Conversational Yelp business search.
///
/// Stateless apart from the shared client; concurrent calls are independent.
#[derive(Debug, Clone)]
pub struct YelpAgentTool {
    client: FusionClient,
    metadata: FunctionMetadata,
}

impl YelpAgentTool {
    /// Creates the tool over the given client.
    #[must_use]
    pub fn new(client: FusionClient) -> Self {
        let metadata = FunctionMetadata::new(TOOL_NAME)
            .with_description(DESCRIPTION)
            .add_parameter(
                String::schema_info("natural_language_query")
                    .with_description("Any business-related request in natural language"),
            )
            .add_parameter(
                f64::schema_info("search_latitude")
                    .with_description("Latitude for precise location-based searches")
                    .optional(),
            )
            .add_parameter(
                f64::schema_info("search_longitude")
                    .with_description("Longitude for precise location-based searches")
                    .optional(),
            )
            .add_parameter(
                String::schema_info("chat_id")
                    .with_description("The chat_id of a previous response, for conversational context")
                    .optional(),
            );

        Self { client, metadata }
    }

    /// Runs one query against Fusion AI and renders the result.
    ///
    /// Returns [`FETCH_FAILED_MESSAGE`] when the request fails or the payload
    /// is empty.
    pub async fn run(
        &self,
        query: &str,
        latitude: Option<f64>,
        longitude: Option<f64>,
        chat_id: Option<String>,
    ) -> String {
        tracing::info!("Interacting with Yelp app with query: {query}");

        let request = FusionRequest::new(query)
            .with_chat_id(chat_id)
            .with_user_context(UserContext::from_coordinates(latitude, longitude));

        match self.client.chat(&request).await {
            Some(payload) if !is_empty_payload(&payload) => format_fusion_response(&payload),
            _ => FETCH_FAILED_MESSAGE.to_string(),
        }
    }
}

impl Tool for YelpAgentTool {
    fn definition(&self) -> ToolDefinition {
        self.metadata.to_tool_definition()
    }

    fn execute(
        &self,
        args: Value,
    ) -> Pin<Box<dyn Future<Output = Result<Value, ToolError>> + Send + '_>> {
        Box::pin(async move {
            let call = FunctionCall::from_value(TOOL_NAME, args)?;
            let query: String = call.get_param("natural_language_query")?;
            let latitude = call.get_optional_param::<f64>("search_latitude")?;
            let longitude = call.get_optional_param::<f64>("search_longitude")?;
            let chat_id = call.get_optional_param::<String>("chat_id")?;

            let text = self.run(&query, latitude, longitude, chat_id).await;
            Ok(Value::String(text))
        })
    }
}

/// `null`, `false`, zero and empty containers carry nothing to render.
fn is_empty_payload(payload: &Value) -> bool {
    match payload {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}
