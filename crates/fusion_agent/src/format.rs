//! Rendering of Fusion AI payloads as Markdown text.
//!
//! [`format_fusion_response`] is total: every field is optional, and a payload
//! whose fields have unexpected JSON types is rendered as the reply text plus
//! the raw JSON instead of failing.

use fusion_client::FusionResponse;
use fusion_client::types::{Business, ContextualInfo, DayHours};
use serde_json::Value;

/// Shown when the payload carries no reply text.
pub const NO_INTRODUCTION: &str = "No introduction provided.";

/// Name used for a business that has none.
const UNKNOWN_NAME: &str = "Unknown";

/// Renders a Fusion AI payload for the calling agent.
///
/// Output sections, in order and separated by blank lines:
///
/// 1. `# Introduction` with the reply text.
/// 2. `# Businesses` with one `## Business N: <name>` block per business.
///    Omitted when there are no businesses.
/// 3. `# Chat ID` with the conversation id. Omitted when there is none.
#[must_use]
pub fn format_fusion_response(payload: &Value) -> String {
    match serde_json::from_value::<FusionResponse>(payload.clone()) {
        Ok(response) => format_response(&response),
        Err(err) => {
            tracing::debug!(error = %err, "payload does not match the known shape; rendering raw JSON");
            format_raw(payload)
        }
    }
}

fn format_response(response: &FusionResponse) -> String {
    let mut sections = vec![introduction(response.text())];

    let blocks: Vec<String> = response
        .businesses()
        .enumerate()
        .map(|(index, business)| format_business(index + 1, business))
        .collect();
    if !blocks.is_empty() {
        sections.push(format!("# Businesses\n\n{}", blocks.join("\n\n")));
    }

    if let Some(chat_id) = response.chat_id.as_deref().filter(|id| !id.is_empty()) {
        sections.push(format!(
            "# Chat ID\n{chat_id}\n\nPass this chat_id to yelp_agent for follow-up questions in the same conversation."
        ));
    }

    sections.join("\n\n")
}

fn introduction(text: Option<&str>) -> String {
    let text = text
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .unwrap_or(NO_INTRODUCTION);
    format!("# Introduction\n{text}")
}

fn format_business(number: usize, business: &Business) -> String {
    let name = business
        .name
        .as_deref()
        .filter(|name| !name.is_empty())
        .unwrap_or(UNKNOWN_NAME);
    let mut lines = vec![format!("## Business {number}: {name}")];

    if let Some(price) = non_empty(business.price.as_deref()) {
        lines.push(field("Price", price));
    }
    if let Some(rating) = business.rating {
        let rating = match business.review_count {
            Some(count) => format!("{rating}/5 ({count} reviews)"),
            None => format!("{rating}/5"),
        };
        lines.push(field("Rating", &rating));
    }

    let categories: Vec<&str> = business
        .categories
        .iter()
        .filter_map(|category| non_empty(category.title.as_deref()))
        .collect();
    if !categories.is_empty() {
        lines.push(field("Type", &categories.join(", ")));
    }

    let address = business
        .location
        .as_ref()
        .and_then(|location| non_empty(location.formatted_address.as_deref()));
    if let Some(address) = address {
        lines.push(field("Location", address));
    }
    if let Some(coordinates) = &business.coordinates
        && let (Some(latitude), Some(longitude)) = (coordinates.latitude, coordinates.longitude)
    {
        lines.push(field("Coordinates", &format!("{latitude}, {longitude}")));
    }
    if let Some(url) = non_empty(business.url.as_deref()) {
        lines.push(field("URL", &format!("[View on Yelp]({url})")));
    }
    if let Some(phone) = non_empty(business.phone.as_deref()) {
        lines.push(field("Phone", phone));
    }

    let website = business
        .attributes
        .as_ref()
        .and_then(|attributes| non_empty(attributes.business_url.as_deref()));
    if let Some(website) = website {
        lines.push(field("Website", website));
    }

    if let Some(info) = &business.contextual_info {
        push_contextual_info(&mut lines, info);
    }

    lines.join("\n")
}

fn push_contextual_info(lines: &mut Vec<String>, info: &ContextualInfo) {
    if !info.business_hours.is_empty() {
        lines.push("- **Hours**:".to_string());
        lines.extend(info.business_hours.iter().map(format_day));
    }
    if let Some(summary) = non_empty(info.summary.as_deref()) {
        lines.push(field("Summary", summary));
    }
    if let Some(snippet) = non_empty(info.review_snippet.as_deref()) {
        lines.push(field("Review Highlight", snippet));
    }
}

fn format_day(day: &DayHours) -> String {
    let name = day.day_of_week.as_deref().unwrap_or(UNKNOWN_NAME);
    let intervals: Vec<String> = day
        .business_hours
        .iter()
        .map(|interval| {
            format!(
                "{} - {}",
                interval.open_time.as_deref().unwrap_or("?"),
                interval.close_time.as_deref().unwrap_or("?")
            )
        })
        .collect();
    if intervals.is_empty() {
        format!("  - {name}: Closed")
    } else {
        format!("  - {name}: {}", intervals.join(", "))
    }
}

fn format_raw(payload: &Value) -> String {
    let text = payload
        .pointer("/response/text")
        .and_then(Value::as_str);
    let raw = serde_json::to_string_pretty(payload).unwrap_or_else(|_| payload.to_string());
    format!(
        "{}\n\n# Raw Response\n```json\n{raw}\n```",
        introduction(text)
    )
}

fn field(label: &str, value: &str) -> String {
    format!("- **{label}**: {value}")
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}
