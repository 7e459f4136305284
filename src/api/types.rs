//! API request and response types

use crate::session::ChatMessage;
use serde::{Deserialize, Serialize};

/// Request to submit one chat message
#[derive(Debug, Deserialize)]
pub struct ChatTurnRequest {
    pub text: String,
}

/// Full rendered view of a session, returned after every mutation so the
/// UI redraws from this payload alone.
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub session_id: String,
    pub slug: String,
    /// User and assistant turns only; the persona instruction stays
    /// server-side.
    pub messages: Vec<ChatMessage>,
    /// Present exactly once per generated report: populated while the
    /// feedback is pending and cleared by rendering it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
