//! In-memory session store
//!
//! Each interview session owns an append-only transcript seeded with the
//! persona instruction and the opening greeting, plus the feedback
//! bookkeeping. Sessions are held behind individual async mutexes so one
//! turn runs at a time per session while distinct sessions stay isolated.
//! Nothing is persisted; session lifetime equals process lifetime.

use crate::persona;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Speaker of a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One transcript entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Mutable state of one interview session.
///
/// Invariants: `messages` is append-only and chronologically ordered; the
/// first entry is always the persona instruction and the second the fixed
/// greeting. The feedback text is stored here at generation time so a view
/// render never has to recompute it (`feedback_pending` only gates whether
/// the next rendered view carries it).
#[derive(Debug)]
pub struct SessionState {
    pub id: String,
    pub slug: String,
    pub messages: Vec<ChatMessage>,
    pub feedback: Option<String>,
    pub feedback_pending: bool,
    pub created_at: DateTime<Utc>,
}

impl SessionState {
    /// Create a session seeded with the two fixed opening messages.
    pub fn new(id: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            slug: slug.into(),
            messages: vec![
                ChatMessage::new(Role::System, persona::INTERVIEWEE_CONTEXT),
                ChatMessage::new(Role::Assistant, persona::GREETING),
            ],
            feedback: None,
            feedback_pending: false,
            created_at: Utc::now(),
        }
    }

    pub fn push(&mut self, role: Role, content: impl Into<String>) {
        self.messages.push(ChatMessage::new(role, content));
    }

    /// Take the feedback text for display, clearing the pending flag.
    /// Returns `None` when no feedback is pending; the stored text itself
    /// is kept so a repeat call after a new `end` works the same way.
    pub fn take_pending_feedback(&mut self) -> Option<String> {
        if self.feedback_pending {
            self.feedback_pending = false;
            self.feedback.clone()
        } else {
            None
        }
    }
}

/// Shared handle to one session. The async mutex serializes turns: the
/// chat handler holds it across the blocking model call.
pub type SessionHandle = Arc<tokio::sync::Mutex<SessionState>>;

/// Registry of live sessions, keyed by session id.
#[derive(Default)]
pub struct SessionManager {
    sessions: Mutex<HashMap<String, SessionHandle>>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create and register a new seeded session, returning its handle.
    pub fn create(&self, id: impl Into<String>, slug: impl Into<String>) -> SessionHandle {
        let state = SessionState::new(id, slug);
        let id = state.id.clone();
        let handle = Arc::new(tokio::sync::Mutex::new(state));
        self.sessions
            .lock()
            .unwrap()
            .insert(id, Arc::clone(&handle));
        handle
    }

    /// Look up a live session by id.
    pub fn get(&self, id: &str) -> Option<SessionHandle> {
        self.sessions.lock().unwrap().get(id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_seeded_with_persona_and_greeting() {
        let state = SessionState::new("s1", "monday-morning-kiln");
        assert_eq!(state.messages.len(), 2);
        assert_eq!(state.messages[0].role, Role::System);
        assert_eq!(state.messages[0].content, persona::INTERVIEWEE_CONTEXT);
        assert_eq!(state.messages[1].role, Role::Assistant);
        assert_eq!(state.messages[1].content, persona::GREETING);
        assert!(!state.feedback_pending);
        assert!(state.feedback.is_none());
    }

    #[test]
    fn transcript_round_trips_in_order() {
        let mut state = SessionState::new("s1", "slug");
        for i in 0..5 {
            state.push(Role::User, format!("question {i}"));
            state.push(Role::Assistant, format!("answer {i}"));
        }

        // Seeds still first, turn pairs in submission order.
        assert_eq!(state.messages.len(), 12);
        assert_eq!(state.messages[0].role, Role::System);
        assert_eq!(state.messages[1].role, Role::Assistant);
        for i in 0..5 {
            assert_eq!(state.messages[2 + 2 * i].content, format!("question {i}"));
            assert_eq!(state.messages[3 + 2 * i].content, format!("answer {i}"));
        }
    }

    #[test]
    fn take_pending_feedback_clears_flag_but_keeps_text() {
        let mut state = SessionState::new("s1", "slug");
        state.feedback = Some("report".to_string());
        state.feedback_pending = true;

        assert_eq!(state.take_pending_feedback().as_deref(), Some("report"));
        assert!(!state.feedback_pending);
        // Second take yields nothing, but the text is retained.
        assert_eq!(state.take_pending_feedback(), None);
        assert_eq!(state.feedback.as_deref(), Some("report"));
    }

    #[test]
    fn manager_isolates_sessions() {
        let manager = SessionManager::new();
        let a = manager.create("a", "slug-a");
        let b = manager.create("b", "slug-b");

        a.blocking_lock().push(Role::User, "only in a");

        assert_eq!(a.blocking_lock().messages.len(), 3);
        assert_eq!(b.blocking_lock().messages.len(), 2);
        assert!(manager.get("a").is_some());
        assert!(manager.get("missing").is_none());
    }
}
