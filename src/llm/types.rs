//! Common types for chat-completion calls

use crate::session::{ChatMessage, Role};

/// A completion request: the full transcript plus sampling settings.
#[derive(Debug, Clone)]
pub struct LlmRequest {
    pub messages: Vec<LlmMessage>,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
}

impl LlmRequest {
    /// Build a request from a session transcript, preserving order.
    pub fn from_transcript(messages: &[ChatMessage], temperature: f32) -> Self {
        Self {
            messages: messages.iter().map(LlmMessage::from).collect(),
            temperature,
            max_tokens: None,
        }
    }
}

/// Message in a completion request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmMessage {
    pub role: LlmRole,
    pub content: String,
}

/// Message role on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmRole {
    System,
    User,
    Assistant,
}

impl LlmRole {
    pub fn as_str(self) -> &'static str {
        match self {
            LlmRole::System => "system",
            LlmRole::User => "user",
            LlmRole::Assistant => "assistant",
        }
    }
}

impl From<&ChatMessage> for LlmMessage {
    fn from(msg: &ChatMessage) -> Self {
        let role = match msg.role {
            Role::System => LlmRole::System,
            Role::User => LlmRole::User,
            Role::Assistant => LlmRole::Assistant,
        };
        Self {
            role,
            content: msg.content.clone(),
        }
    }
}

/// A single completion
#[derive(Debug, Clone)]
pub struct LlmResponse {
    pub text: String,
    pub usage: Usage,
}

/// Token usage reported by the provider
#[derive(Debug, Clone, Copy, Default)]
pub struct Usage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionState;

    #[test]
    fn from_transcript_preserves_order_and_roles() {
        let mut state = SessionState::new("s", "slug");
        state.push(Role::User, "how is yield measured?");

        let request = LlmRequest::from_transcript(&state.messages, 0.7);

        assert_eq!(request.messages.len(), 3);
        assert_eq!(request.messages[0].role, LlmRole::System);
        assert_eq!(request.messages[1].role, LlmRole::Assistant);
        assert_eq!(request.messages[2].role, LlmRole::User);
        assert_eq!(request.messages[2].content, "how is yield measured?");
        assert!((request.temperature - 0.7).abs() < f32::EPSILON);
        assert!(request.max_tokens.is_none());
    }
}
