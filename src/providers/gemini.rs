use crate::{
    config::GeminiConfig,
    error::AppError,
    logging::redact_url_key,
    models::gemini::{GenerateContentRequest, GenerateContentResponse, GenerationConfig},
    providers::ReasoningProvider,
};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Call Gemini Generate Content API
/// Note: Model name is part of the URL path
pub async fn generate_content(
    client: &Client,
    config: &GeminiConfig,
    request: &GenerateContentRequest,
) -> Result<GenerateContentResponse, AppError> {
    let api_key = config.active_api_key().ok_or_else(|| {
        AppError::ProviderDisabled("Gemini API key is not configured".to_string())
    })?;

    // Gemini API format: /v1beta/models/{model}:generateContent
    let url = format!(
        "{}/models/{}:generateContent",
        config.base_url.trim_end_matches('/'),
        config.model
    );

    let mut builder = client
        .post(&url)
        .header("Content-Type", "application/json")
        .query(&[("key", api_key)]);

    if let Some(secs) = config.timeout_seconds {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    let http_request = builder
        .json(request)
        .build()
        .map_err(|e| AppError::HttpRequest(e.without_url()))?;
    tracing::debug!(
        url = %redact_url_key(http_request.url()),
        "Sending Gemini request"
    );

    // reqwest errors embed the URL, which carries the key
    let response = client
        .execute(http_request)
        .await
        .map_err(|e| AppError::HttpRequest(e.without_url()))?;

    // Check for HTTP errors
    if !response.status().is_success() {
        let status = response.status();
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(AppError::UpstreamError {
            status,
            message: error_text,
        });
    }

    let body = response
        .text()
        .await
        .map_err(|e| AppError::HttpRequest(e.without_url()))?;
    Ok(serde_json::from_str(&body)?)
}

/// Production reasoning provider backed by the Gemini API
pub struct GeminiProvider {
    client: Client,
    config: GeminiConfig,
}

impl GeminiProvider {
    pub fn new(config: GeminiConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: GeminiConfig) -> Self {
        Self { client, config }
    }

    fn generation_config(&self) -> GenerationConfig {
        GenerationConfig {
            temperature: Some(self.config.temperature),
            max_output_tokens: Some(self.config.max_output_tokens),
        }
    }
}

#[async_trait]
impl ReasoningProvider for GeminiProvider {
    fn provider_name(&self) -> &str {
        "gemini"
    }

    fn is_enabled(&self) -> bool {
        self.config.active_api_key().is_some()
    }

    async fn generate(&self, prompt: &str) -> Result<String, AppError> {
        let request = GenerateContentRequest::from_prompt(prompt, self.generation_config());
        let response = generate_content(&self.client, &self.config, &request).await?;

        match response.first_text() {
            Some(text) if !text.trim().is_empty() => Ok(text.to_string()),
            _ => Err(AppError::MalformedResponse(
                "missing candidates[0].content.parts[0].text".to_string(),
            )),
        }
    }
}
