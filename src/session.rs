//! Estimator session: step navigation, selection state and reasoning requests
//!
//! One session owns exactly one [`Selection`] and tracks the latest
//! "Get Estimate" action with a [`RequestToken`]. Reasoning that arrives for
//! an older token is discarded.

use crate::animation::{AnimatedValue, Clock, CountUp, SystemClock};
use crate::catalog::OptionCatalog;
use crate::error::AppError;
use crate::pricing::{self, format_rupees, Estimate, Selection, TimelineAdjustment};
use crate::providers::ReasoningProvider;
use crate::reasoning::{request_reasoning, Reasoning, ReasoningContext};
use std::sync::Arc;
use tracing::{debug, info};

/// Project type, features, timeline, result
pub const TOTAL_STEPS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    ProjectType,
    Features,
    Timeline,
    Result,
}

impl StepKind {
    pub fn from_number(step: usize) -> Self {
        match step {
            1 => Self::ProjectType,
            2 => Self::Features,
            3 => Self::Timeline,
            _ => Self::Result,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::ProjectType => "Project Type",
            Self::Features => "Features",
            Self::Timeline => "Timeline",
            Self::Result => "Your Estimate",
        }
    }
}

/// What pressing "Next" did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextOutcome {
    /// Moved to this step
    Advanced(usize),
    /// Already on the last step; the caller should run the estimate
    Calculate,
}

/// Identifies one "Get Estimate" action; later actions get larger tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Everything needed to fetch reasoning for one estimate
#[derive(Debug, Clone, PartialEq)]
pub struct EstimateRequest {
    pub token: RequestToken,
    pub estimate: Estimate,
    pub context: ReasoningContext,
}

/// Figures as they should appear right now, mid-animation included
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayedFigures {
    pub total: u64,
    pub total_max: u64,
    pub base_cost: String,
    pub features_cost: String,
    pub timeline_adjustment: TimelineAdjustment,
}

#[derive(Debug, Clone, Copy)]
struct EstimateDisplay {
    estimate: Estimate,
    total: AnimatedValue,
    total_max: AnimatedValue,
}

impl EstimateDisplay {
    fn start(estimate: Estimate, clock: &dyn Clock) -> Self {
        Self {
            estimate,
            total: AnimatedValue::start(CountUp::estimate(estimate.total), clock),
            total_max: AnimatedValue::start(CountUp::estimate(estimate.total_max), clock),
        }
    }

    fn figures(&self, clock: &dyn Clock) -> DisplayedFigures {
        DisplayedFigures {
            total: self.total.value(clock),
            total_max: self.total_max.value(clock),
            base_cost: format_rupees(self.estimate.base_cost),
            features_cost: format_rupees(self.estimate.features_cost),
            timeline_adjustment: self.estimate.timeline_adjustment,
        }
    }
}

pub struct EstimatorSession {
    catalog: OptionCatalog,
    selection: Selection,
    current_step: usize,
    clock: Arc<dyn Clock>,
    display: Option<EstimateDisplay>,
    reasoning: Option<Reasoning>,
    latest_token: u64,
    in_flight: Option<RequestToken>,
}

impl EstimatorSession {
    pub fn new(catalog: OptionCatalog) -> Self {
        Self::with_clock(catalog, Arc::new(SystemClock::new()))
    }

    pub fn with_clock(catalog: OptionCatalog, clock: Arc<dyn Clock>) -> Self {
        Self {
            catalog,
            selection: Selection::default(),
            current_step: 1,
            clock,
            display: None,
            reasoning: None,
            latest_token: 0,
            in_flight: None,
        }
    }

    pub fn catalog(&self) -> &OptionCatalog {
        &self.catalog
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    // ---- step navigation ----

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn total_steps(&self) -> usize {
        TOTAL_STEPS
    }

    pub fn step_kind(&self) -> StepKind {
        StepKind::from_number(self.current_step)
    }

    pub fn is_final_step(&self) -> bool {
        self.current_step == TOTAL_STEPS
    }

    pub fn previous_enabled(&self) -> bool {
        self.current_step > 1
    }

    pub fn next_label(&self) -> &'static str {
        if self.is_final_step() {
            "🤖 Get AI Estimate"
        } else {
            "Next"
        }
    }

    /// Progress dot `dot` (1-based) is lit once that step has been reached
    pub fn step_reached(&self, dot: usize) -> bool {
        dot >= 1 && dot <= self.current_step
    }

    pub fn next(&mut self) -> NextOutcome {
        if self.current_step < TOTAL_STEPS {
            self.current_step += 1;
            NextOutcome::Advanced(self.current_step)
        } else {
            NextOutcome::Calculate
        }
    }

    /// Returns whether the step changed
    pub fn previous(&mut self) -> bool {
        if self.current_step > 1 {
            self.current_step -= 1;
            true
        } else {
            false
        }
    }

    // ---- selection ----

    /// Choose the project type; returns refreshed figures when already showing a result
    pub fn select_project_type(&mut self, id: &str) -> Result<Option<Estimate>, AppError> {
        let project = self.catalog.project_type(id)?.clone();
        self.selection.project_type = Some(project);
        Ok(self.selection_changed())
    }

    pub fn select_timeline(&mut self, id: &str) -> Result<Option<Estimate>, AppError> {
        let timeline = self.catalog.timeline(id)?.clone();
        self.selection.timeline = Some(timeline);
        Ok(self.selection_changed())
    }

    /// Check or uncheck a feature, keeping catalog order
    pub fn set_feature(&mut self, id: &str, selected: bool) -> Result<Option<Estimate>, AppError> {
        let feature = self.catalog.feature(id)?.clone();
        let present = self.selection.features.iter().any(|f| f.id == feature.id);

        match (selected, present) {
            (true, false) => {
                self.selection.features.push(feature);
                let catalog = &self.catalog;
                self.selection
                    .features
                    .sort_by_key(|f| catalog.features.iter().position(|c| c.id == f.id));
            }
            (false, true) => self.selection.features.retain(|f| f.id != feature.id),
            _ => return Ok(None),
        }

        Ok(self.selection_changed())
    }

    pub fn toggle_feature(&mut self, id: &str) -> Result<Option<Estimate>, AppError> {
        let present = self.selection.features.iter().any(|f| f.id == id);
        self.set_feature(id, !present)
    }

    /// Numbers-only refresh: on the result step after a first calculation.
    /// Never issues a reasoning request.
    fn selection_changed(&mut self) -> Option<Estimate> {
        if self.is_final_step() && self.display.is_some() {
            let estimate = self.calculate();
            debug!(total = estimate.total, "Selection changed, figures refreshed");
            Some(estimate)
        } else {
            None
        }
    }

    // ---- calculation ----

    /// Price the current selection and restart the number animation
    pub fn calculate(&mut self) -> Estimate {
        let estimate = pricing::calculate(&self.selection);
        self.display = Some(EstimateDisplay::start(estimate, self.clock.as_ref()));
        estimate
    }

    pub fn is_calculated(&self) -> bool {
        self.display.is_some()
    }

    pub fn estimate(&self) -> Option<Estimate> {
        self.display.map(|d| d.estimate)
    }

    pub fn displayed_figures(&self) -> Option<DisplayedFigures> {
        self.display.map(|d| d.figures(self.clock.as_ref()))
    }

    pub fn animation_finished(&self) -> bool {
        self.display.map_or(true, |d| {
            d.total.is_finished(self.clock.as_ref()) && d.total_max.is_finished(self.clock.as_ref())
        })
    }

    // ---- reasoning ----

    /// Start a "Get Estimate" action: price the selection and issue a new token
    pub fn begin_estimate(&mut self) -> EstimateRequest {
        let estimate = self.calculate();
        self.latest_token += 1;
        let token = RequestToken(self.latest_token);
        self.in_flight = Some(token);

        info!(
            token = token.value(),
            total = estimate.total,
            total_max = estimate.total_max,
            "Estimate requested"
        );

        EstimateRequest {
            token,
            estimate,
            context: ReasoningContext::new(&self.selection, &estimate),
        }
    }

    /// Apply reasoning if it belongs to the latest request; returns whether it was applied
    pub fn apply_reasoning(&mut self, token: RequestToken, reasoning: Reasoning) -> bool {
        if token.value() != self.latest_token {
            debug!(
                token = token.value(),
                latest = self.latest_token,
                "Dropping stale reasoning"
            );
            return false;
        }
        self.reasoning = Some(reasoning);
        self.in_flight = None;
        true
    }

    /// A reasoning request for the latest token is outstanding
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn reasoning(&self) -> Option<&Reasoning> {
        self.reasoning.as_ref()
    }

    /// Full "Get Estimate" action: price, fetch reasoning once, apply it
    pub async fn get_estimate(&mut self, provider: &dyn ReasoningProvider) -> Estimate {
        let request = self.begin_estimate();
        let reasoning = request_reasoning(provider, &request.context).await;
        self.apply_reasoning(request.token, reasoning);
        request.estimate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::ManualClock;
    use crate::reasoning::ReasoningSource;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct CountingProvider {
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingProvider {
        fn new(fail: bool) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail,
            }
        }
    }

    #[async_trait]
    impl ReasoningProvider for CountingProvider {
        fn provider_name(&self) -> &str {
            "counting"
        }

        async fn generate(&self, _prompt: &str) -> Result<String, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(AppError::MalformedResponse("forced".to_string()))
            } else {
                Ok("✅ Looks right".to_string())
            }
        }
    }

    fn session() -> EstimatorSession {
        EstimatorSession::new(OptionCatalog::default())
    }

    fn go_to_result(session: &mut EstimatorSession) {
        while let NextOutcome::Advanced(_) = session.next() {}
    }

    #[test]
    fn test_step_navigation() {
        let mut s = session();
        assert_eq!(s.current_step(), 1);
        assert!(!s.previous_enabled());
        assert!(!s.previous());
        assert_eq!(s.current_step(), 1);

        assert_eq!(s.next(), NextOutcome::Advanced(2));
        assert_eq!(s.next(), NextOutcome::Advanced(3));
        assert_eq!(s.next_label(), "Next");
        assert_eq!(s.next(), NextOutcome::Advanced(4));
        assert_eq!(s.step_kind(), StepKind::Result);
        assert_eq!(s.next_label(), "🤖 Get AI Estimate");
        assert_eq!(s.next(), NextOutcome::Calculate);
        assert_eq!(s.current_step(), 4);

        assert!(s.previous());
        assert_eq!(s.current_step(), 3);
        assert!(s.step_reached(3));
        assert!(!s.step_reached(4));
    }

    #[test]
    fn test_unknown_option_is_rejected() {
        let mut s = session();
        assert!(s.select_project_type("spaceship").is_err());
        assert!(s.selection().project_type.is_none());
    }

    #[test]
    fn test_features_keep_catalog_order() {
        let mut s = session();
        s.set_feature("chatbot", true).unwrap();
        s.set_feature("cms", true).unwrap();
        s.set_feature("cms", true).unwrap();
        let ids: Vec<_> = s.selection().features.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["cms", "chatbot"]);

        s.toggle_feature("cms").unwrap();
        assert_eq!(s.selection().features.len(), 1);
    }

    #[test]
    fn test_selection_change_before_result_does_not_calculate() {
        let mut s = session();
        assert_eq!(s.select_project_type("webapp").unwrap(), None);
        assert!(!s.is_calculated());
    }

    #[tokio::test]
    async fn test_get_estimate_with_no_project_type() {
        let mut s = session();
        go_to_result(&mut s);
        let provider = CountingProvider::new(false);

        let estimate = s.get_estimate(&provider).await;
        assert_eq!(estimate.base_cost, 0);
        assert_eq!(estimate.total, 0);
        assert_eq!(s.reasoning().unwrap().source, ReasoningSource::Ai);
        assert!(!s.is_loading());
    }

    #[tokio::test]
    async fn test_recalculation_does_not_refetch_reasoning() {
        let mut s = session();
        s.select_project_type("webapp").unwrap();
        go_to_result(&mut s);

        let provider = CountingProvider::new(false);
        let first = s.get_estimate(&provider).await;
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);

        let refreshed = s.set_feature("cms", true).unwrap().expect("figures refreshed");
        assert_eq!(refreshed.total, first.total + 8000);
        assert_eq!(s.estimate().unwrap().total, refreshed.total);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_provider_shows_fallback() {
        let mut s = session();
        go_to_result(&mut s);
        let provider = CountingProvider::new(true);

        s.get_estimate(&provider).await;
        let reasoning = s.reasoning().unwrap();
        assert_eq!(reasoning.source, ReasoningSource::Fallback);
        assert!(reasoning.paragraphs[0].starts_with("✅ Not selected projects"));
    }

    #[test]
    fn test_stale_reasoning_is_dropped() {
        let mut s = session();
        go_to_result(&mut s);

        let first = s.begin_estimate();
        let second = s.begin_estimate();
        assert!(second.token > first.token);

        let fresh = Reasoning::fallback(&second.context);
        assert!(s.apply_reasoning(second.token, fresh.clone()));

        // The older response arrives last and must not overwrite
        let stale = Reasoning::from_ai_text("old text");
        assert!(!s.apply_reasoning(first.token, stale));
        assert_eq!(s.reasoning(), Some(&fresh));
    }

    #[test]
    fn test_loading_tracks_latest_token() {
        let mut s = session();
        let first = s.begin_estimate();
        let second = s.begin_estimate();
        assert!(s.is_loading());

        assert!(!s.apply_reasoning(first.token, Reasoning::fallback(&first.context)));
        assert!(s.is_loading());
        assert!(s.apply_reasoning(second.token, Reasoning::fallback(&second.context)));
        assert!(!s.is_loading());
    }

    #[test]
    fn test_displayed_figures_animate_with_clock() {
        let clock = ManualClock::new();
        let mut s = EstimatorSession::with_clock(OptionCatalog::default(), Arc::new(clock.clone()));
        s.select_project_type("webapp").unwrap();
        s.set_feature("cms", true).unwrap();
        s.set_feature("payments", true).unwrap();
        s.calculate();

        let start = s.displayed_figures().unwrap();
        assert_eq!(start.total, 63000 / 30);
        assert_eq!(start.base_cost, "₹50,000");
        assert_eq!(start.features_cost, "₹13,000");
        assert!(!s.animation_finished());

        clock.advance(Duration::from_millis(1000));
        let done = s.displayed_figures().unwrap();
        assert_eq!(done.total, 63000);
        assert_eq!(done.total_max, 75600);
        assert!(s.animation_finished());
    }
}
