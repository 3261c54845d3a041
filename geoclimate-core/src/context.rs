//! Context store: the state a caller accumulates between prompts
//!
//! Four singleton slots (route, assessment, scenario, options) replace on write;
//! the comparison basket appends on write. The store is an explicit value owned
//! by the caller, one per session, and the advisor only ever reads it.

use crate::lane::RouteContext;
use crate::optimizer::OptimizerOption;
use crate::risk::RiskAssessment;
use crate::scenario::ScenarioContext;
use serde::{Deserialize, Serialize};

/// A scored lane kept in the comparison basket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct BasketEntry {
    pub route: RouteContext,
    pub assessment: RiskAssessment,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ContextStore {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    route: Option<RouteContext>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    assessment: Option<RiskAssessment>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    scenario: Option<ScenarioContext>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    options: Option<Vec<OptimizerOption>>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    basket: Vec<BasketEntry>,
}

impl ContextStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(&self) -> Option<&RouteContext> {
        self.route.as_ref()
    }

    pub fn assessment(&self) -> Option<&RiskAssessment> {
        self.assessment.as_ref()
    }

    pub fn scenario(&self) -> Option<&ScenarioContext> {
        self.scenario.as_ref()
    }

    /// Current optimizer options; `None` when never generated
    pub fn options(&self) -> Option<&[OptimizerOption]> {
        self.options.as_deref()
    }

    pub fn basket(&self) -> &[BasketEntry] {
        &self.basket
    }

    /// Current route and its assessment, only when both are present
    pub fn current_lane(&self) -> Option<(&RouteContext, &RiskAssessment)> {
        match (&self.route, &self.assessment) {
            (Some(route), Some(assessment)) => Some((route, assessment)),
            _ => None,
        }
    }

    /// Replace the current route and assessment
    pub fn set_lane(&mut self, route: RouteContext, assessment: RiskAssessment) {
        tracing::debug!(lane = %route.lane_label(), overall = assessment.overall, "stored current lane");
        self.route = Some(route);
        self.assessment = Some(assessment);
    }

    /// Replace the current scenario
    pub fn set_scenario(&mut self, scenario: ScenarioContext) {
        tracing::debug!(overall = scenario.stressed.overall, "stored scenario");
        self.scenario = Some(scenario);
    }

    /// Replace the option set wholesale
    pub fn set_options(&mut self, options: Vec<OptimizerOption>) {
        tracing::debug!(count = options.len(), "stored optimizer options");
        self.options = Some(options);
    }

    /// Append a lane to the comparison basket
    pub fn push_basket(&mut self, route: RouteContext, assessment: RiskAssessment) {
        self.basket.push(BasketEntry { route, assessment });
        tracing::debug!(size = self.basket.len(), "appended to comparison basket");
    }

    /// True when no slot holds a value and the basket is empty
    pub fn is_empty(&self) -> bool {
        self.route.is_none()
            && self.assessment.is_none()
            && self.scenario.is_none()
            && self.options.is_none()
            && self.basket.is_empty()
    }
}
