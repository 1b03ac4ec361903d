use crate::catalog::OptionCatalog;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable prefix, e.g. `DEVREON_ESTIMATOR__GEMINI__API_KEY`
pub const ENV_PREFIX: &str = "DEVREON_ESTIMATOR";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub catalog: OptionCatalog,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeminiConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Sent as the `key` query parameter; no key means fallback-only
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
    /// Unset leaves the HTTP client's own behavior in place
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

fn default_enabled() -> bool {
    true
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_output_tokens() -> u32 {
    300
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            api_key: None,
            base_url: default_base_url(),
            model: default_model(),
            temperature: default_temperature(),
            max_output_tokens: default_max_output_tokens(),
            timeout_seconds: None,
        }
    }
}

impl GeminiConfig {
    /// Usable key, if the provider is enabled and a non-empty key is set
    pub fn active_api_key(&self) -> Option<&str> {
        if !self.enabled {
            return None;
        }
        self.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }
}

/// Load configuration from `path` (optional) layered with environment overrides
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    let config = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    let cfg: Config = config.try_deserialize()?;
    validate_config(&cfg)?;

    Ok(cfg)
}

pub fn validate_config(cfg: &Config) -> anyhow::Result<()> {
    cfg.catalog.validate()?;

    if cfg.gemini.base_url.trim().is_empty() {
        anyhow::bail!("Gemini base_url cannot be empty");
    }
    if cfg.gemini.model.trim().is_empty() {
        anyhow::bail!("Gemini model cannot be empty");
    }
    if !(0.0..=2.0).contains(&cfg.gemini.temperature) {
        anyhow::bail!(
            "Gemini temperature must be between 0.0 and 2.0, got {}",
            cfg.gemini.temperature
        );
    }
    if cfg.gemini.max_output_tokens == 0 {
        anyhow::bail!("Gemini max_output_tokens must be greater than 0");
    }
    if cfg.gemini.timeout_seconds == Some(0) {
        anyhow::bail!("Gemini timeout_seconds must be greater than 0 when set");
    }

    Ok(())
}
