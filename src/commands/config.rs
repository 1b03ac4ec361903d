use anyhow::Result;
use colored::Colorize;
use devreon_estimator::config::{self, Config};
use devreon_estimator::logging::SensitiveApiKey;
use std::path::Path;
use tracing::info;

/// Execute the config show command
///
/// Displays the current configuration with secrets masked
pub fn show(config_path: &Path) -> Result<()> {
    println!("{}", "Loading configuration...".yellow());
    info!(path = %config_path.display(), "Loading configuration for display");

    let cfg = config::load_config(config_path)?;
    let sanitized = sanitize_secrets(&cfg);

    println!("{}", "Current Configuration:".green().bold());
    println!();

    // Serialize to TOML format
    let toml_string = toml::to_string_pretty(&sanitized)?;
    println!("{}", toml_string);

    Ok(())
}

/// Execute the config validate command
pub fn validate(config_path: &Path) -> Result<()> {
    println!("{}", "Validating configuration...".yellow());
    info!(path = %config_path.display(), "Validating configuration file");

    let cfg = config::load_config(config_path)?;

    println!("{}", "✓ Configuration is valid".green());
    println!();
    println!("{}", "Summary:".bold());
    println!("  Project Types: {}", cfg.catalog.project_types.len());
    println!("  Features: {}", cfg.catalog.features.len());
    println!("  Timelines: {}", cfg.catalog.timelines.len());
    println!(
        "  AI Reasoning: {}",
        if cfg.gemini.active_api_key().is_some() {
            format!("enabled ({})", cfg.gemini.model).green()
        } else {
            "disabled (fallback only)".red()
        }
    );

    Ok(())
}

/// Sanitize secrets in configuration for safe display
fn sanitize_secrets(cfg: &Config) -> Config {
    let mut sanitized = cfg.clone();
    if let Some(key) = &cfg.gemini.api_key {
        sanitized.gemini.api_key = Some(SensitiveApiKey::new(key).to_string());
    }
    sanitized
}
