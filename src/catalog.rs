use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Base project kind; exactly one may be selected
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ProjectType {
    pub id: String,
    pub label: String,
    pub cost: u64,
}

/// Add-on feature; any number may be selected
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Feature {
    pub id: String,
    pub label: String,
    pub cost: u64,
}

/// Delivery timeline; scales the subtotal
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Timeline {
    pub id: String,
    pub label: String,
    pub multiplier: f64,
}

/// All options the estimator offers, grouped by step
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct OptionCatalog {
    pub project_types: Vec<ProjectType>,
    #[serde(default)]
    pub features: Vec<Feature>,
    pub timelines: Vec<Timeline>,
}

impl Default for OptionCatalog {
    fn default() -> Self {
        fn project(id: &str, label: &str, cost: u64) -> ProjectType {
            ProjectType {
                id: id.to_string(),
                label: label.to_string(),
                cost,
            }
        }
        fn feature(id: &str, label: &str, cost: u64) -> Feature {
            Feature {
                id: id.to_string(),
                label: label.to_string(),
                cost,
            }
        }
        fn timeline(id: &str, label: &str, multiplier: f64) -> Timeline {
            Timeline {
                id: id.to_string(),
                label: label.to_string(),
                multiplier,
            }
        }

        Self {
            project_types: vec![
                project("landing", "Landing Page", 15000),
                project("business", "Business Website", 35000),
                project("webapp", "Web Application", 50000),
                project("ecommerce", "E-Commerce Store", 75000),
                project("mobile", "Mobile App", 90000),
            ],
            features: vec![
                feature("cms", "CMS Integration", 8000),
                feature("payments", "Payment Gateway", 5000),
                feature("auth", "User Authentication", 6000),
                feature("seo", "SEO Optimization", 4000),
                feature("analytics", "Analytics Dashboard", 7000),
                feature("chatbot", "AI Chatbot", 12000),
            ],
            timelines: vec![
                timeline("urgent", "Urgent", 1.5),
                timeline("standard", "Standard", 1.0),
                timeline("flexible", "Flexible", 0.8),
            ],
        }
    }
}

impl OptionCatalog {
    pub fn project_type(&self, id: &str) -> Result<&ProjectType, AppError> {
        self.project_types
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| unknown("project type", id))
    }

    pub fn feature(&self, id: &str) -> Result<&Feature, AppError> {
        self.features
            .iter()
            .find(|f| f.id == id)
            .ok_or_else(|| unknown("feature", id))
    }

    pub fn timeline(&self, id: &str) -> Result<&Timeline, AppError> {
        self.timelines
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| unknown("timeline", id))
    }

    /// Check ids are unique per group and multipliers are positive
    pub fn validate(&self) -> Result<(), AppError> {
        if self.project_types.is_empty() {
            return Err(AppError::ConfigError(
                "Catalog must define at least one project type".to_string(),
            ));
        }
        if self.timelines.is_empty() {
            return Err(AppError::ConfigError(
                "Catalog must define at least one timeline".to_string(),
            ));
        }

        check_unique("project type", self.project_types.iter().map(|p| p.id.as_str()))?;
        check_unique("feature", self.features.iter().map(|f| f.id.as_str()))?;
        check_unique("timeline", self.timelines.iter().map(|t| t.id.as_str()))?;

        for t in &self.timelines {
            if !t.multiplier.is_finite() || t.multiplier <= 0.0 {
                return Err(AppError::ConfigError(format!(
                    "Timeline '{}' has invalid multiplier {}",
                    t.id, t.multiplier
                )));
            }
        }

        Ok(())
    }
}

fn unknown(group: &'static str, id: &str) -> AppError {
    AppError::UnknownOption {
        group,
        id: id.to_string(),
    }
}

fn check_unique<'a>(group: &str, ids: impl Iterator<Item = &'a str>) -> Result<(), AppError> {
    let mut seen = HashSet::new();
    for id in ids {
        if id.is_empty() {
            return Err(AppError::ConfigError(format!("Empty {} id", group)));
        }
        if !seen.insert(id) {
            return Err(AppError::ConfigError(format!(
                "Duplicate {} id: {}",
                group, id
            )));
        }
    }
    Ok(())
}
