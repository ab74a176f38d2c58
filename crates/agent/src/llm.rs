use anyhow::Result;
use async_trait::async_trait;

/// Pluggable text-generation collaborator. A single blocking request, no
/// internal retry; callers treat any failure as recoverable.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// Default client when no generative backend is configured. Keeps the
/// system fully functional in reduced mode.
#[derive(Clone, Copy, Debug, Default)]
pub struct MockLlmClient;

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, _prompt: &str) -> Result<String> {
        Ok("I'm the room service assistant. Could you tell me which dish you would like?"
            .to_string())
    }
}

/// Prompt for free-form replies when no rule matched the guest message.
pub fn fallback_prompt(message: &str) -> String {
    format!(
        "You are a hotel room service assistant. A guest said: \"{message}\". \
         Reply briefly and helpfully, steering the guest toward naming a dish from the menu."
    )
}
