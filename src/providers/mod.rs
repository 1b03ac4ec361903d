use crate::config::GeminiConfig;
use crate::error::AppError;
use async_trait::async_trait;

pub mod gemini;

pub use gemini::GeminiProvider;

/// Text-generation backend used for estimate reasoning.
///
/// Implementations make exactly one attempt per call; the caller decides
/// what to show when it fails.
#[async_trait]
pub trait ReasoningProvider: Send + Sync {
    /// Provider name for logs (e.g. "gemini")
    fn provider_name(&self) -> &str;

    /// Whether a request can be attempted at all
    fn is_enabled(&self) -> bool {
        true
    }

    /// Send `prompt` and return the generated text
    async fn generate(&self, prompt: &str) -> Result<String, AppError>;
}

/// Provider that never calls out; every estimate uses the local template
pub struct OfflineProvider;

#[async_trait]
impl ReasoningProvider for OfflineProvider {
    fn provider_name(&self) -> &str {
        "offline"
    }

    fn is_enabled(&self) -> bool {
        false
    }

    async fn generate(&self, _prompt: &str) -> Result<String, AppError> {
        Err(AppError::ProviderDisabled("offline mode".to_string()))
    }
}

/// Gemini when a key is configured and `offline` is not requested, otherwise offline
pub fn build_provider(config: &GeminiConfig, offline: bool) -> Box<dyn ReasoningProvider> {
    if offline || config.active_api_key().is_none() {
        Box::new(OfflineProvider)
    } else {
        Box::new(GeminiProvider::new(config.clone()))
    }
}
