use reqwest::StatusCode;
use thiserror::Error;

/// Application error types
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
    /// Option id not present in the catalog
    #[error("Unknown {group} option: {id}")]
    UnknownOption { group: &'static str, id: String },
    /// Reasoning provider has no credentials configured
    #[error("Provider disabled: {0}")]
    ProviderDisabled(String),
    /// Upstream API error
    #[error("Upstream error ({status}): {message}")]
    UpstreamError { status: StatusCode, message: String },
    /// Upstream answered 2xx but the body could not be decoded
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
    /// HTTP request error (connect, timeout, body read)
    #[error("HTTP request error: {0}")]
    HttpRequest(#[from] reqwest::Error),
}

impl AppError {
    /// Short machine-readable name, used as a log field
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ConfigError(_) => "config_error",
            Self::UnknownOption { .. } => "unknown_option",
            Self::ProviderDisabled(_) => "provider_disabled",
            Self::UpstreamError { .. } => "upstream_error",
            Self::MalformedResponse(_) => "malformed_response",
            Self::HttpRequest(_) => "http_request_error",
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedResponse(format!("JSON error: {}", err))
    }
}
