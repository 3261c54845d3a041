//! Closed prompt builders
//!
//! Prompts the tool generates for itself. Each format is matched by exactly one
//! classifier rule, so the wording avoids the trigger words of earlier rules.

use crate::context::{BasketEntry, ContextStore};
use crate::lane::RouteContext;
use crate::optimizer::OptimizerOption;
use crate::risk::RiskAssessment;
use crate::scenario::ScenarioContext;

/// Separator and heading placed before the strategy-room context appendix
pub const DASHBOARD_CONTEXT_HEADING: &str =
    "\n\n---\n**Context from the dashboard (for your reference):**\n";

fn scores(assessment: &RiskAssessment) -> String {
    format!(
        "Geo={:.1}, Climate={:.1}, Logistics={:.1}, Cyber={:.1}, Overall={:.1}",
        assessment.geopolitical,
        assessment.climate,
        assessment.logistics,
        assessment.cyber,
        assessment.overall
    )
}

/// Lane explanation prompt
pub fn explain_route_prompt(route: &RouteContext, assessment: &RiskAssessment) -> String {
    format!(
        "Route: {} via {}\nScores: {}\nExplain top drivers and mitigations.",
        route.endpoints(),
        route.mode.label(),
        scores(assessment)
    )
}

/// Stress test interpretation prompt
pub fn scenario_prompt(base: &RiskAssessment, scenario: &ScenarioContext) -> String {
    format!(
        "Base={}\nStressed={}\nExplain scenario.",
        scores(base),
        scores(&scenario.stressed)
    )
}

/// Basket comparison prompt
pub fn basket_prompt(basket: &[BasketEntry]) -> String {
    let mut prompt = String::from("Compare these routes:\n");
    for (i, entry) in basket.iter().enumerate() {
        prompt.push_str(&format!(
            "{}. {}: {}\n",
            i + 1,
            entry.route.lane_label(),
            scores(&entry.assessment)
        ));
    }
    prompt
}

/// Optimizer advice prompt
pub fn optimizer_prompt(
    route: &RouteContext,
    assessment: &RiskAssessment,
    options: &[OptimizerOption],
) -> String {
    let listed: Vec<String> = options
        .iter()
        .map(|o| {
            format!(
                "{} [{} via {}] {:.1}",
                o.label,
                o.route.endpoints(),
                o.route.mode.label(),
                o.assessment.overall
            )
        })
        .collect();
    format!(
        "Base={} via {}, Risks={}\nOptions={}\nAdvise best choice.",
        route.endpoints(),
        route.mode.label(),
        scores(assessment),
        listed.join("; ")
    )
}

/// Dashboard context for the strategy room; `None` without a lane or scenario
pub fn dashboard_context(context: &ContextStore) -> Option<String> {
    let mut parts = Vec::new();
    if let Some((route, assessment)) = context.current_lane() {
        parts.push(format!(
            "Last route: {}, scores: {}",
            route.lane_label(),
            scores(assessment)
        ));
    }
    if let Some(scenario) = context.scenario() {
        parts.push(format!("Scenario: {}", scenario.summary()));
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("\n"))
    }
}
