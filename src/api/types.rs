//! Wire types for the action server protocol.
//!
//! Requests arrive from the dialogue manager with a full conversation
//! tracker attached; this server only reads the latest message out of
//! it. Every tracker field is defaulted so a sparse or absent tracker
//! still deserializes.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::actions::{ActionRegistry, Entity, IncomingMessage, Utterance};

// ---------------------------------------------------------------------------
// Shared state
// ---------------------------------------------------------------------------

/// State shared across all endpoint handlers.
#[derive(Clone)]
pub struct ApiContext {
    pub registry: Arc<ActionRegistry>,
}

impl ApiContext {
    pub fn new(registry: Arc<ActionRegistry>) -> Self {
        Self { registry }
    }
}

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ActionRequest {
    /// Wire name of the action to run.
    pub next_action: String,
    #[serde(default)]
    pub sender_id: String,
    #[serde(default)]
    pub tracker: TrackerState,
    /// Domain snapshot sent by the dialogue manager; accepted and ignored.
    #[serde(default)]
    pub domain: Value,
    #[serde(default)]
    pub version: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TrackerState {
    #[serde(default)]
    pub sender_id: String,
    #[serde(default)]
    pub latest_message: LatestMessage,
}

#[derive(Debug, Default, Deserialize)]
pub struct LatestMessage {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub entities: Vec<WireEntity>,
}

#[derive(Debug, Deserialize)]
pub struct WireEntity {
    pub entity: String,
    #[serde(default)]
    pub value: Value,
}

impl TrackerState {
    /// Project the tracker down to what actions consume. Non-string
    /// entity values collapse to the empty string.
    pub fn to_message(&self) -> IncomingMessage {
        IncomingMessage {
            text: self.latest_message.text.clone().unwrap_or_default(),
            entities: self
                .latest_message
                .entities
                .iter()
                .map(|entity| Entity {
                    name: entity.entity.clone(),
                    value: entity.value.as_str().unwrap_or_default().to_string(),
                })
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Response
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct ActionResponse {
    /// Tracker events; none of these actions mutate conversation state.
    pub events: Vec<Value>,
    pub responses: Vec<ResponseMessage>,
}

impl ActionResponse {
    pub fn from_utterances(utterances: Vec<Utterance>) -> Self {
        Self {
            events: Vec::new(),
            responses: utterances.into_iter().map(ResponseMessage::from).collect(),
        }
    }
}

/// One bot message: either literal text or the name of a response
/// template the dialogue manager renders itself. Exactly one of the
/// two keys is serialized.
#[derive(Debug, Serialize)]
pub struct ResponseMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
}

impl From<Utterance> for ResponseMessage {
    fn from(utterance: Utterance) -> Self {
        match utterance {
            Utterance::Text(text) => Self {
                text: Some(text),
                response: None,
            },
            Utterance::Template(name) => Self {
                text: None,
                response: Some(name.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn full_request_deserializes() {
        let body = json!({
            "next_action": "action_consultar_sintoma",
            "sender_id": "user-7",
            "tracker": {
                "sender_id": "user-7",
                "latest_message": {
                    "text": "me duele la cabeza",
                    "entities": [{"entity": "sintoma", "value": "dolor de cabeza"}]
                }
            },
            "domain": {"intents": []},
            "version": "3.1.0"
        });
        let request: ActionRequest = serde_json::from_value(body).unwrap();
        assert_eq!(request.next_action, "action_consultar_sintoma");
        assert_eq!(request.version.as_deref(), Some("3.1.0"));

        let message = request.tracker.to_message();
        assert_eq!(message.text, "me duele la cabeza");
        assert_eq!(message.entities.len(), 1);
        assert_eq!(message.entities[0].name, "sintoma");
        assert_eq!(message.entities[0].value, "dolor de cabeza");
    }

    #[test]
    fn sparse_request_defaults_everything() {
        let request: ActionRequest =
            serde_json::from_value(json!({"next_action": "action_listar_sintomas"})).unwrap();
        assert_eq!(request.sender_id, "");
        let message = request.tracker.to_message();
        assert_eq!(message.text, "");
        assert!(message.entities.is_empty());
    }

    #[test]
    fn null_message_text_becomes_empty() {
        let tracker: TrackerState =
            serde_json::from_value(json!({"latest_message": {"text": null}})).unwrap();
        assert_eq!(tracker.to_message().text, "");
    }

    #[test]
    fn non_string_entity_value_collapses_to_empty() {
        let tracker: TrackerState = serde_json::from_value(json!({
            "latest_message": {
                "entities": [{"entity": "sintoma", "value": 42}]
            }
        }))
        .unwrap();
        let message = tracker.to_message();
        assert_eq!(message.entities[0].value, "");
    }

    #[test]
    fn response_serializes_with_one_key_per_message() {
        let response = ActionResponse::from_utterances(vec![
            Utterance::Text("hola".to_string()),
            Utterance::Template("utter_menu"),
        ]);
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value,
            json!({
                "events": [],
                "responses": [{"text": "hola"}, {"response": "utter_menu"}]
            })
        );
    }
}
