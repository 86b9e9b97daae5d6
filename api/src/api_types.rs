//! External JSON:API shapes of the event search endpoint.

use anyhow::{Context, Result};
use gcb_event::{Event, Field};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const JSON_API_CONTENT_TYPE: &str = "application/vnd.api+json";
pub const EVENT_TYPE: &str = "event";

/// An event as returned to API clients: camelCase attributes plus the
/// resource `id` and `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl ApiEvent {
    pub fn from_event(event: &Event) -> Result<Self> {
        let stored = match serde_json::to_value(event).context("Failed to serialize event")? {
            Value::Object(map) => map,
            other => anyhow::bail!("event serialized to a non-object: {}", other),
        };

        let mut attributes = Map::new();
        for (name, value) in stored {
            let key = Field::from_document(&name)
                .map(|f| f.param().to_string())
                .unwrap_or(name);
            attributes.insert(key, value);
        }

        Ok(Self {
            id: event.key().unwrap_or_default().to_string(),
            kind: EVENT_TYPE.to_string(),
            attributes,
        })
    }
}

/// JSON:API links object with pagination
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Links {
    #[serde(rename = "self")]
    pub self_link: String,
    pub first: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    pub total: u64,
}

/// JSON:API error object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    pub status: String,
    pub detail: String,
}

/// Top level document of `/api/events/search`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventSearchResponse {
    pub links: Links,
    pub data: Vec<ApiEvent>,
    pub meta: Meta,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_api_event_uses_param_names() {
        let mut event = Event::default();
        event.set_field(Field::GameId, "RPG24ND00001").unwrap();
        event.set_field(Field::MinPlayers, "3").unwrap();
        event.set_field(Field::EventType, "RPG").unwrap();

        let api = ApiEvent::from_event(&event).unwrap();
        assert_eq!(
            serde_json::to_value(&api).unwrap(),
            json!({
                "id": "RPG24ND00001",
                "type": "event",
                "gameId": "RPG24ND00001",
                "eventType": "RPG - Role Playing Game",
                "minPlayers": 3,
            })
        );
    }

    #[test]
    fn test_error_document_shape() {
        let doc = EventSearchResponse {
            links: Links {
                self_link: "/api/events/search?cost=x".to_string(),
                first: "/api/events/search?cost=x&page=0".to_string(),
                ..Default::default()
            },
            error: Some(ApiError {
                status: "bad request".to_string(),
                detail: "invalid".to_string(),
            }),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&doc).unwrap(),
            json!({
                "links": {
                    "self": "/api/events/search?cost=x",
                    "first": "/api/events/search?cost=x&page=0",
                },
                "data": [],
                "meta": { "total": 0 },
                "error": { "status": "bad request", "detail": "invalid" },
            })
        );
    }
}
