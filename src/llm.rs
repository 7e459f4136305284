//! Chat-model abstraction
//!
//! A common interface over the external conversational model, plus the
//! environment-driven configuration and a logging decorator that records
//! every call with structured fields.

mod error;
mod openai;
mod types;

pub use error::{LlmError, LlmErrorKind};
pub use openai::OpenAIService;
pub use types::{LlmMessage, LlmRequest, LlmResponse, LlmRole, Usage};

use async_trait::async_trait;
use std::sync::Arc;

/// Common interface for chat-completion providers
#[async_trait]
pub trait LlmService: Send + Sync {
    /// Make a completion request
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError>;

    /// Get the model ID
    fn model_id(&self) -> &str;
}

/// Model used when `ELICIT_MODEL` is unset.
pub const DEFAULT_MODEL: &str = "gpt-4";

/// Configuration for the model call, read from the environment
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub openai_api_key: Option<String>,
    /// Gateway base URL; when set, the gateway handles authentication
    pub gateway: Option<String>,
    /// Model identifier sent with every request
    pub model: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            gateway: None,
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

impl LlmConfig {
    pub fn from_env() -> Self {
        Self {
            openai_api_key: std::env::var("OPENAI_API_KEY").ok(),
            gateway: std::env::var("LLM_GATEWAY").ok(),
            model: std::env::var("ELICIT_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
        }
    }

    /// Build the configured service, wrapped with logging.
    ///
    /// Returns `None` when no credential source is available; the server
    /// still runs and model turns take the fail-soft path.
    pub fn build_service(&self) -> Option<Arc<dyn LlmService>> {
        // Gateway mode authenticates at the gateway, so any placeholder
        // key works; direct mode needs a real non-empty key.
        let api_key = if self.gateway.is_some() {
            self.openai_api_key
                .clone()
                .unwrap_or_else(|| "implicit".to_string())
        } else {
            let key = self.openai_api_key.clone()?;
            if key.is_empty() {
                return None;
            }
            key
        };

        let service = OpenAIService::new(api_key, self.model.clone(), self.gateway.as_deref());
        Some(Arc::new(LoggingService::new(Arc::new(service))))
    }
}

/// Logging wrapper for chat-model services
pub struct LoggingService {
    inner: Arc<dyn LlmService>,
    model_id: String,
}

impl LoggingService {
    pub fn new(inner: Arc<dyn LlmService>) -> Self {
        let model_id = inner.model_id().to_string();
        Self { inner, model_id }
    }
}

#[async_trait]
impl LlmService for LoggingService {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        let start = std::time::Instant::now();
        let result = self.inner.complete(request).await;
        let duration = start.elapsed();

        match &result {
            Ok(response) => {
                tracing::info!(
                    model = %self.model_id,
                    duration_ms = %duration.as_millis(),
                    prompt_tokens = response.usage.prompt_tokens,
                    completion_tokens = response.usage.completion_tokens,
                    "model request completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    model = %self.model_id,
                    duration_ms = %duration.as_millis(),
                    kind = ?e.kind,
                    error = %e.message,
                    "model request failed"
                );
            }
        }

        result
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}
