use super::render;
use anyhow::Result;
use colored::Colorize;
use devreon_estimator::config;
use devreon_estimator::pricing::Estimate;
use devreon_estimator::providers::build_provider;
use devreon_estimator::reasoning::Reasoning;
use devreon_estimator::session::{EstimatorSession, NextOutcome};
use serde::Serialize;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone)]
pub struct EstimateArgs {
    pub project_type: Option<String>,
    pub features: Vec<String>,
    pub timeline: Option<String>,
    pub offline: bool,
    pub json: bool,
    pub animate: bool,
}

#[derive(Serialize)]
struct EstimateOutput<'a> {
    project_type: &'a str,
    features: Vec<String>,
    timeline: &'a str,
    estimate: Estimate,
    reasoning: Option<&'a Reasoning>,
}

/// Execute the estimate command
///
/// Applies the flags to a fresh session, jumps to the result step and runs
/// a single "Get Estimate" action.
pub async fn execute(config_path: &Path, args: EstimateArgs) -> Result<()> {
    let cfg = config::load_config(config_path)?;
    let provider = build_provider(&cfg.gemini, args.offline);
    info!(provider = provider.provider_name(), "Running estimate");

    let mut session = EstimatorSession::new(cfg.catalog);
    if let Some(id) = &args.project_type {
        session.select_project_type(id)?;
    }
    for id in &args.features {
        session.set_feature(id, true)?;
    }
    if let Some(id) = &args.timeline {
        session.select_timeline(id)?;
    }

    while let NextOutcome::Advanced(_) = session.next() {}

    let estimate = if args.json {
        session.get_estimate(provider.as_ref()).await
    } else {
        render::run_estimate(&mut session, provider.as_ref()).await
    };

    if args.json {
        let selection = session.selection();
        let output = EstimateOutput {
            project_type: selection.project_type_name(),
            features: selection.feature_names(),
            timeline: selection.timeline_name(),
            estimate,
            reasoning: session.reasoning(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", "Your Estimate".green().bold());
    println!();
    render::show_figures(&session, args.animate).await?;
    if let Some(reasoning) = session.reasoning() {
        render::print_reasoning(reasoning);
    }

    Ok(())
}
