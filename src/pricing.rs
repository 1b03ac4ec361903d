//! Linear pricing model for the estimator
//!
//! `total = round((base + features) * multiplier)` and the upper bound of the
//! quoted range is always `round(total * 1.2)`.

use crate::catalog::{Feature, ProjectType, Timeline};
use serde::Serialize;
use std::fmt;

/// Upper bound of the quoted range relative to `total`
pub const RANGE_FACTOR: f64 = 1.2;

/// Timeline name used when nothing is selected
pub const DEFAULT_TIMELINE_NAME: &str = "Standard";

/// Project type name used when nothing is selected
pub const UNSELECTED_PROJECT_NAME: &str = "Not selected";

/// The user's current choices across the three option groups
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    pub project_type: Option<ProjectType>,
    pub features: Vec<Feature>,
    pub timeline: Option<Timeline>,
}

impl Selection {
    pub fn multiplier(&self) -> f64 {
        self.timeline.as_ref().map(|t| t.multiplier).unwrap_or(1.0)
    }

    pub fn project_type_name(&self) -> &str {
        self.project_type
            .as_ref()
            .map(|p| p.label.as_str())
            .unwrap_or(UNSELECTED_PROJECT_NAME)
    }

    pub fn timeline_name(&self) -> &str {
        self.timeline
            .as_ref()
            .map(|t| t.label.as_str())
            .unwrap_or(DEFAULT_TIMELINE_NAME)
    }

    pub fn feature_names(&self) -> Vec<String> {
        self.features.iter().map(|f| f.label.clone()).collect()
    }
}

/// Signed percentage the timeline adds to or removes from the subtotal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum TimelineAdjustment {
    Increase(u32),
    Decrease(u32),
    None,
}

impl TimelineAdjustment {
    pub fn from_multiplier(multiplier: f64) -> Self {
        if multiplier > 1.0 {
            Self::Increase(((multiplier - 1.0) * 100.0).round() as u32)
        } else if multiplier < 1.0 {
            Self::Decrease(((1.0 - multiplier) * 100.0).round() as u32)
        } else {
            Self::None
        }
    }
}

impl fmt::Display for TimelineAdjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Increase(pct) => write!(f, "+{}%", pct),
            Self::Decrease(pct) => write!(f, "-{}%", pct),
            Self::None => write!(f, "0%"),
        }
    }
}

impl From<TimelineAdjustment> for String {
    fn from(adj: TimelineAdjustment) -> Self {
        adj.to_string()
    }
}

/// Price range derived from a [`Selection`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Estimate {
    pub base_cost: u64,
    pub features_cost: u64,
    pub subtotal: u64,
    pub multiplier: f64,
    pub total: u64,
    pub total_max: u64,
    pub timeline_adjustment: TimelineAdjustment,
}

/// Compute the estimate for a selection
///
/// A missing project type counts as zero cost; the calculation never fails.
pub fn calculate(selection: &Selection) -> Estimate {
    let base_cost = selection.project_type.as_ref().map(|p| p.cost).unwrap_or(0);
    let features_cost = selection
        .features
        .iter()
        .map(|f| f.cost)
        .fold(0u64, u64::saturating_add);
    let subtotal = base_cost.saturating_add(features_cost);
    let multiplier = selection.multiplier();

    let total = (subtotal as f64 * multiplier).round() as u64;
    let total_max = (total as f64 * RANGE_FACTOR).round() as u64;

    Estimate {
        base_cost,
        features_cost,
        subtotal,
        multiplier,
        total,
        total_max,
        timeline_adjustment: TimelineAdjustment::from_multiplier(multiplier),
    }
}

/// Group digits in threes: `75600` -> `"75,600"`
pub fn format_amount(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn format_rupees(amount: u64) -> String {
    format!("₹{}", format_amount(amount))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(cost: u64) -> ProjectType {
        ProjectType {
            id: "webapp".to_string(),
            label: "Web Application".to_string(),
            cost,
        }
    }

    fn feature(id: &str, cost: u64) -> Feature {
        Feature {
            id: id.to_string(),
            label: id.to_uppercase(),
            cost,
        }
    }

    fn timeline(label: &str, multiplier: f64) -> Timeline {
        Timeline {
            id: label.to_lowercase(),
            label: label.to_string(),
            multiplier,
        }
    }

    #[test]
    fn test_worked_example() {
        let selection = Selection {
            project_type: Some(project(50000)),
            features: vec![feature("cms", 8000), feature("payments", 5000)],
            timeline: Some(timeline("Fast", 1.2)),
        };

        let estimate = calculate(&selection);
        assert_eq!(estimate.base_cost, 50000);
        assert_eq!(estimate.features_cost, 13000);
        assert_eq!(estimate.subtotal, 63000);
        assert_eq!(estimate.total, 75600);
        assert_eq!(estimate.total_max, 90720);
        assert_eq!(estimate.timeline_adjustment.to_string(), "+20%");
    }

    #[test]
    fn test_huge_costs_saturate() {
        let selection = Selection {
            project_type: Some(project(i64::MAX as u64)),
            features: vec![
                feature("cms", i64::MAX as u64),
                feature("chatbot", i64::MAX as u64),
            ],
            timeline: Some(timeline("Urgent", 1.5)),
        };

        let estimate = calculate(&selection);
        assert_eq!(estimate.features_cost, u64::MAX);
        assert_eq!(estimate.subtotal, u64::MAX);
        assert_eq!(estimate.total, u64::MAX);
        assert_eq!(estimate.total_max, u64::MAX);
    }

    #[test]
    fn test_empty_selection_is_zero() {
        let estimate = calculate(&Selection::default());
        assert_eq!(estimate.base_cost, 0);
        assert_eq!(estimate.features_cost, 0);
        assert_eq!(estimate.total, 0);
        assert_eq!(estimate.total_max, 0);
        assert_eq!(estimate.multiplier, 1.0);
        assert_eq!(estimate.timeline_adjustment, TimelineAdjustment::None);
    }

    #[test]
    fn test_missing_project_type_still_prices_features() {
        let selection = Selection {
            project_type: None,
            features: vec![feature("seo", 4000)],
            timeline: None,
        };
        let estimate = calculate(&selection);
        assert_eq!(estimate.base_cost, 0);
        assert_eq!(estimate.total, 4000);
        assert_eq!(estimate.total_max, 4800);
    }

    #[test]
    fn test_timeline_adjustment_text() {
        assert_eq!(TimelineAdjustment::from_multiplier(1.0).to_string(), "0%");
        assert_eq!(TimelineAdjustment::from_multiplier(1.5).to_string(), "+50%");
        assert_eq!(TimelineAdjustment::from_multiplier(0.8).to_string(), "-20%");
        assert_eq!(TimelineAdjustment::from_multiplier(1.25).to_string(), "+25%");
    }

    #[test]
    fn test_invariants_hold_across_selections() {
        let multipliers = [0.8, 1.0, 1.15, 1.2, 1.5];
        let bases = [0, 15000, 35000, 50000, 90000];
        for &m in &multipliers {
            for &b in &bases {
                let selection = Selection {
                    project_type: Some(project(b)),
                    features: vec![feature("a", 7000), feature("b", 333)],
                    timeline: Some(timeline("T", m)),
                };
                let e = calculate(&selection);
                assert_eq!(e.total, ((e.base_cost + e.features_cost) as f64 * m).round() as u64);
                assert_eq!(e.total_max, (e.total as f64 * 1.2).round() as u64);
            }
        }
    }

    #[test]
    fn test_selection_default_names() {
        let selection = Selection::default();
        assert_eq!(selection.project_type_name(), "Not selected");
        assert_eq!(selection.timeline_name(), "Standard");
        assert!(selection.feature_names().is_empty());
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(0), "0");
        assert_eq!(format_amount(999), "999");
        assert_eq!(format_amount(1000), "1,000");
        assert_eq!(format_amount(90720), "90,720");
        assert_eq!(format_amount(1234567), "1,234,567");
        assert_eq!(format_rupees(63000), "₹63,000");
    }

    #[test]
    fn test_estimate_serializes_adjustment_as_text() {
        let estimate = calculate(&Selection {
            project_type: Some(project(1000)),
            features: vec![],
            timeline: Some(timeline("Urgent", 1.5)),
        });
        let json = serde_json::to_value(estimate).unwrap();
        assert_eq!(json["timeline_adjustment"], "+50%");
        assert_eq!(json["total"], 1500);
    }
}
