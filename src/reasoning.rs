//! Pricing justification text
//!
//! An estimate is explained either by the remote text-generation service or,
//! when that fails for any reason, by a deterministic local template.

use crate::pricing::{format_amount, Estimate, Selection};
use crate::providers::ReasoningProvider;
use serde::Serialize;
use tracing::{info, warn};

/// Inputs embedded in the prompt and in the fallback text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReasoningContext {
    pub project_type: String,
    pub features: Vec<String>,
    pub timeline: String,
    pub base_cost: u64,
    pub features_cost: u64,
    pub total: u64,
    pub total_max: u64,
}

impl ReasoningContext {
    pub fn new(selection: &Selection, estimate: &Estimate) -> Self {
        Self {
            project_type: selection.project_type_name().to_string(),
            features: selection.feature_names(),
            timeline: selection.timeline_name().to_string(),
            base_cost: estimate.base_cost,
            features_cost: estimate.features_cost,
            total: estimate.total,
            total_max: estimate.total_max,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReasoningSource {
    Ai,
    Fallback,
}

/// Rendered reasoning panel: a heading and one paragraph per line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reasoning {
    pub source: ReasoningSource,
    pub title: String,
    pub paragraphs: Vec<String>,
}

impl Reasoning {
    pub fn from_ai_text(text: &str) -> Self {
        Self {
            source: ReasoningSource::Ai,
            title: "🤖 AI Pricing Analysis".to_string(),
            paragraphs: split_paragraphs(text),
        }
    }

    /// Locally built explanation used whenever the service is unavailable
    pub fn fallback(ctx: &ReasoningContext) -> Self {
        let features = if ctx.features.is_empty() {
            "📌 No additional features selected - base package pricing applies.".to_string()
        } else {
            format!(
                "📌 Selected features ({}) add significant value and development hours.",
                ctx.features.join(", ")
            )
        };

        let timeline_impact = match ctx.timeline.as_str() {
            "Urgent" => "requires additional resources and priority allocation.",
            "Flexible" => "allows for optimized resource planning and cost savings.",
            _ => "follows our standard development workflow.",
        };

        Self {
            source: ReasoningSource::Fallback,
            title: "💡 Pricing Breakdown".to_string(),
            paragraphs: vec![
                format!(
                    "✅ {} projects require specialized expertise in UI/UX design, backend architecture, and security implementation.",
                    ctx.project_type
                ),
                features,
                format!("⏱️ {} timeline {}", ctx.timeline, timeline_impact),
                "💰 This estimate is competitive with Indian market rates for quality development."
                    .to_string(),
            ],
        }
    }
}

/// One paragraph per non-empty line
pub fn split_paragraphs(text: &str) -> Vec<String> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.to_string())
        .collect()
}

pub fn build_prompt(ctx: &ReasoningContext) -> String {
    let features = if ctx.features.is_empty() {
        "None selected".to_string()
    } else {
        ctx.features.join(", ")
    };

    format!(
        "You are a professional software development cost analyst for Devreon Devs, a premium web development company in India.

A client has requested a project estimate with the following specifications:

📋 PROJECT TYPE: {project_type}
💡 FEATURES REQUESTED: {features}
⏱️ TIMELINE: {timeline}

💰 COST BREAKDOWN:
- Base Project Cost: ₹{base}
- Additional Features: ₹{extra}
- Total Estimate: ₹{total} - ₹{total_max}

Please provide a brief, professional explanation (3-4 bullet points max) of why this project costs what it does. Consider:
1. Complexity of the project type
2. Development effort for each feature
3. Timeline impact on pricing
4. Market rates in India for similar projects

Format your response with emoji bullets (use ✅ or 💡 or 📌) and keep it concise and client-friendly. No markdown headers, just bullet points. Keep total response under 150 words.",
        project_type = ctx.project_type,
        features = features,
        timeline = ctx.timeline,
        base = format_amount(ctx.base_cost),
        extra = format_amount(ctx.features_cost),
        total = format_amount(ctx.total),
        total_max = format_amount(ctx.total_max),
    )
}

/// Ask the provider for reasoning, degrading to the local template on any failure
pub async fn request_reasoning(provider: &dyn ReasoningProvider, ctx: &ReasoningContext) -> Reasoning {
    if !provider.is_enabled() {
        info!(provider = provider.provider_name(), "Provider disabled, using fallback reasoning");
        return Reasoning::fallback(ctx);
    }

    let prompt = build_prompt(ctx);
    match provider.generate(&prompt).await {
        Ok(text) => Reasoning::from_ai_text(&text),
        Err(e) => {
            warn!(
                provider = provider.provider_name(),
                error_kind = e.kind(),
                error = %e,
                "Reasoning request failed, using fallback"
            );
            Reasoning::fallback(ctx)
        }
    }
}
