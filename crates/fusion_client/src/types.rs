//! Fusion AI chat API types.
//!
//! Request types serialize optional fields only when they are set, so an
//! absent `chat_id` or `user_context` never appears on the wire (not even as
//! `null`).
//!
//! Response types are a lenient, read-only view of the payload. Every field
//! is optional and unknown fields are ignored; `null` is accepted wherever a
//! list is expected.

use serde::{Deserialize, Deserializer, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Request Types
// ─────────────────────────────────────────────────────────────────────────────

/// Location used to bias results geographically.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UserContext {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

impl UserContext {
    /// Pairs two optional coordinates into a location.
    ///
    /// Both coordinates must be present and non-zero; otherwise the whole
    /// context is dropped. A coordinate of exactly `0.0` counts as absent.
    #[must_use]
    pub fn from_coordinates(latitude: Option<f64>, longitude: Option<f64>) -> Option<Self> {
        match (latitude, longitude) {
            (Some(latitude), Some(longitude)) if latitude != 0.0 && longitude != 0.0 => {
                Some(Self {
                    latitude,
                    longitude,
                })
            }
            _ => None,
        }
    }
}

/// Request body for the chat endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FusionRequest {
    /// The natural-language query.
    pub query: String,
    /// Conversation id from a previous response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<String>,
    /// Optional location context.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_context: Option<UserContext>,
}

impl FusionRequest {
    /// Creates a request carrying only a query.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            chat_id: None,
            user_context: None,
        }
    }

    /// Sets the conversation id. Empty ids are dropped.
    #[must_use]
    pub fn with_chat_id(mut self, chat_id: Option<impl Into<String>>) -> Self {
        self.chat_id = chat_id.map(Into::into).filter(|id| !id.is_empty());
        self
    }

    /// Sets the location context.
    #[must_use]
    pub fn with_user_context(mut self, user_context: Option<UserContext>) -> Self {
        self.user_context = user_context;
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Response Types
// ─────────────────────────────────────────────────────────────────────────────

/// Top-level chat response.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FusionResponse {
    /// Conversational reply.
    pub response: Option<ResponseText>,
    /// Conversation id to pass on follow-up queries.
    pub chat_id: Option<String>,
    /// Structured entities referenced by the reply.
    #[serde(deserialize_with = "null_as_default")]
    pub entities: Vec<Entity>,
}

impl FusionResponse {
    /// Returns the reply text, if any.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.response.as_ref().and_then(|r| r.text.as_deref())
    }

    /// Iterates over every business across all entities, in order.
    pub fn businesses(&self) -> impl Iterator<Item = &Business> {
        self.entities.iter().flat_map(|entity| entity.businesses.iter())
    }
}

/// The natural-language part of a response.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ResponseText {
    /// Reply text.
    pub text: Option<String>,
}

/// A group of structured results.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Entity {
    /// Businesses in this group.
    #[serde(deserialize_with = "null_as_default")]
    pub businesses: Vec<Business>,
}

/// A business record.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Business {
    /// Yelp business id.
    pub id: Option<String>,
    /// Display name.
    pub name: Option<String>,
    /// Yelp page URL.
    pub url: Option<String>,
    /// Price tier, e.g. `$$`.
    pub price: Option<String>,
    /// Average rating out of 5.
    pub rating: Option<f64>,
    /// Number of reviews.
    pub review_count: Option<u64>,
    /// Business categories.
    #[serde(deserialize_with = "null_as_default")]
    pub categories: Vec<Category>,
    /// Postal location.
    pub location: Option<Location>,
    /// Geographic coordinates.
    pub coordinates: Option<Coordinates>,
    /// Phone number.
    pub phone: Option<String>,
    /// Free-form attributes.
    pub attributes: Option<Attributes>,
    /// Query-specific details.
    pub contextual_info: Option<ContextualInfo>,
}

/// A business category.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Category {
    /// Category alias, e.g. `plumbing`.
    pub alias: Option<String>,
    /// Display title, e.g. `Plumbing`.
    pub title: Option<String>,
}

/// A postal location.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Location {
    /// Single-line formatted address.
    pub formatted_address: Option<String>,
}

/// Geographic coordinates of a business.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Coordinates {
    /// Latitude.
    pub latitude: Option<f64>,
    /// Longitude.
    pub longitude: Option<f64>,
}

/// Selected business attributes.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Attributes {
    /// The business's own website.
    #[serde(rename = "BusinessUrl")]
    pub business_url: Option<String>,
}

/// Details generated for the current query.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ContextualInfo {
    /// Short summary of the business.
    pub summary: Option<String>,
    /// A review excerpt relevant to the query.
    pub review_snippet: Option<String>,
    /// Opening hours per day.
    #[serde(deserialize_with = "null_as_default")]
    pub business_hours: Vec<DayHours>,
}

/// Opening hours for one day.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DayHours {
    /// Day name, e.g. `Monday`.
    pub day_of_week: Option<String>,
    /// Open intervals for the day.
    #[serde(deserialize_with = "null_as_default")]
    pub business_hours: Vec<OpenInterval>,
}

/// One open interval.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct OpenInterval {
    /// Opening time as sent by the API.
    pub open_time: Option<String>,
    /// Closing time as sent by the API.
    pub close_time: Option<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn user_context_requires_both_non_zero_coordinates() {
        assert_eq!(
            UserContext::from_coordinates(Some(37.77), Some(-122.42)),
            Some(UserContext {
                latitude: 37.77,
                longitude: -122.42
            })
        );
        assert_eq!(UserContext::from_coordinates(Some(37.77), None), None);
        assert_eq!(UserContext::from_coordinates(None, Some(-122.42)), None);
        assert_eq!(UserContext::from_coordinates(Some(0.0), Some(-122.42)), None);
        assert_eq!(UserContext::from_coordinates(Some(-0.0), Some(10.0)), None);
        assert_eq!(UserContext::from_coordinates(None, None), None);
    }

    #[test]
    fn request_omits_unset_fields() {
        let body = serde_json::to_value(FusionRequest::new("tacos")).unwrap();
        assert_eq!(body, json!({"query": "tacos"}));
    }

    #[test]
    fn request_drops_empty_chat_id() {
        let request = FusionRequest::new("tacos").with_chat_id(Some(""));
        assert_eq!(request.chat_id, None);
    }

    #[test]
    fn request_includes_set_fields() {
        let request = FusionRequest::new("tacos")
            .with_chat_id(Some("chat-1"))
            .with_user_context(UserContext::from_coordinates(Some(1.5), Some(2.5)));
        let body = serde_json::to_value(request).unwrap();
        assert_eq!(
            body,
            json!({
                "query": "tacos",
                "chat_id": "chat-1",
                "user_context": {"latitude": 1.5, "longitude": 2.5}
            })
        );
    }

    #[test]
    fn response_tolerates_missing_and_null_fields() {
        let response: FusionResponse = serde_json::from_value(json!({
            "entities": null,
            "unrelated": {"nested": true}
        }))
        .unwrap();
        assert_eq!(response, FusionResponse::default());
        assert_eq!(response.text(), None);
        assert_eq!(response.businesses().count(), 0);
    }

    #[test]
    fn response_flattens_businesses_across_entities() {
        let response: FusionResponse = serde_json::from_value(json!({
            "response": {"text": "Here you go"},
            "entities": [
                {"businesses": [{"name": "A"}]},
                {"other": 1},
                {"businesses": [{"name": "B", "categories": null}]}
            ]
        }))
        .unwrap();
        let names: Vec<_> = response
            .businesses()
            .filter_map(|b| b.name.as_deref())
            .collect();
        assert_eq!(names, ["A", "B"]);
        assert_eq!(response.text(), Some("Here you go"));
    }
}
