use std::sync::Arc;

use chrono::Utc;
use concierge_core::{Catalog, ChatRequest, ChatResponse};
use tracing::{info, warn};

use crate::dialogue::DialogueEngine;
use crate::intent::{IntentParser, ParsedIntent};
use crate::llm::{fallback_prompt, LlmClient};
use crate::matcher::MenuMatcher;
use crate::session::SessionStore;
use crate::text::SynonymTable;

/// Orchestrates one conversational turn: resolve the session, parse the
/// message, transition the dialogue state, and always produce a reply.
pub struct AgentRuntime {
    catalog: Arc<Catalog>,
    synonyms: SynonymTable,
    dialogue: DialogueEngine,
    sessions: Arc<dyn SessionStore>,
    generative: Option<Arc<dyn LlmClient>>,
}

impl AgentRuntime {
    pub fn new(
        catalog: Arc<Catalog>,
        sessions: Arc<dyn SessionStore>,
        generative: Option<Arc<dyn LlmClient>>,
    ) -> Self {
        Self {
            catalog,
            synonyms: SynonymTable::with_default_entries(),
            dialogue: DialogueEngine::new(),
            sessions,
            generative,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Never fails: every error class degrades to some reply.
    pub async fn handle_message(&self, request: &ChatRequest) -> ChatResponse {
        let session_id = resolve_session_id(request);

        let handle = self.sessions.session(&session_id).await;
        let mut session = handle.lock().await;
        session.touch();

        let matcher = MenuMatcher::new(&self.catalog, &self.synonyms);
        let parsed = IntentParser::new(matcher).parse(&request.message);

        let response = match (parsed, self.generative.as_deref()) {
            (ParsedIntent::Unknown, Some(client)) => {
                self.generative_reply(client, &session_id, &request.message).await
            }
            (other, _) => self.dialogue.respond(&session_id, other, &mut session),
        };

        info!(
            event_name = "agent.turn",
            session_id = %session_id,
            intent = response.intent.as_deref().unwrap_or("none"),
            "turn handled"
        );
        response
    }

    /// Delegates to the generative collaborator; any failure degrades to an
    /// apologetic reply and leaves the session untouched.
    async fn generative_reply(
        &self,
        client: &dyn LlmClient,
        session_id: &str,
        message: &str,
    ) -> ChatResponse {
        match client.complete(&fallback_prompt(message)).await {
            Ok(reply) => ChatResponse::new(session_id, reply).with_intent("unknown"),
            Err(error) => {
                warn!(
                    event_name = "agent.generative_failed",
                    session_id = %session_id,
                    error = %error,
                    "generative backend failed; degrading to error reply"
                );
                ChatResponse::new(session_id, "Sorry, I couldn't process that.")
                    .with_intent("error")
            }
        }
    }
}

fn resolve_session_id(request: &ChatRequest) -> String {
    match request.session_id.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => format!("guest-{}", Utc::now().timestamp()),
    }
}
