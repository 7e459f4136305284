//! HTTP API for the interview simulation

mod assets;
mod handlers;
mod types;

pub use handlers::create_router;
#[allow(unused_imports)] // Public API re-exports
pub use types::*;

use crate::llm::LlmService;
use crate::session::SessionManager;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionManager>,
    /// `None` when no credentials are configured; model turns then take
    /// the fail-soft path.
    pub model: Option<Arc<dyn LlmService>>,
}

impl AppState {
    pub fn new(model: Option<Arc<dyn LlmService>>) -> Self {
        Self {
            sessions: Arc::new(SessionManager::new()),
            model,
        }
    }
}
