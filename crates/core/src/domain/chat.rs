use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Inbound message from the transport collaborator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub guest_id: Option<String>,
    pub message: String,
}

/// Structured reply. `context` is a free-form mapping used to surface
/// conflicts and pending state back to the caller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub session_id: String,
    pub reply: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_actions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Map<String, Value>>,
}

impl ChatResponse {
    pub fn new(session_id: impl Into<String>, reply: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            reply: reply.into(),
            intent: None,
            suggested_actions: None,
            context: None,
        }
    }

    pub fn with_intent(mut self, intent: impl Into<String>) -> Self {
        self.intent = Some(intent.into());
        self
    }

    pub fn with_suggested_actions<I, S>(mut self, actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.suggested_actions = Some(actions.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_context(mut self, key: impl Into<String>, value: Value) -> Self {
        self.context.get_or_insert_with(Map::new).insert(key.into(), value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{ChatRequest, ChatResponse};

    #[test]
    fn request_tolerates_missing_session_and_guest_ids() {
        let request: ChatRequest =
            serde_json::from_str(r#"{"message": "hello"}"#).expect("minimal request");
        assert!(request.session_id.is_none());
        assert!(request.guest_id.is_none());
        assert_eq!(request.message, "hello");
    }

    #[test]
    fn response_omits_empty_optional_fields_on_the_wire() {
        let response = ChatResponse::new("guest-1", "Hello!");
        let wire = serde_json::to_string(&response).expect("serialize");
        assert!(!wire.contains("intent"));
        assert!(!wire.contains("suggested_actions"));
        assert!(!wire.contains("context"));
    }

    #[test]
    fn builder_accumulates_context_entries() {
        let response = ChatResponse::new("guest-1", "held")
            .with_intent("confirm")
            .with_context("conflicts", serde_json::json!(["Grilled Chicken Sandwich"]))
            .with_context("preferences", serde_json::json!(["vegetarian"]));

        let context = response.context.expect("context");
        assert_eq!(context.len(), 2);
        assert_eq!(response.intent.as_deref(), Some("confirm"));
    }
}
