//! Intent classification for advisor prompts
//!
//! Selects exactly one intent per prompt by walking a fixed priority list.
//!
//! Global invariants enforced:
//! - Evaluation order is fixed; the first matching intent wins
//! - Matching is plain substring search on the lower-cased prompt
//! - Classification reads the context store and never writes it

use crate::context::ContextStore;
use crate::profiles::GAZETTEER;
use serde::{Deserialize, Serialize};

/// Safety wording for mode comparisons
pub const SAFETY_WORDS: &[&str] = &["safe", "safest", "lower risk", "least risk", "secure"];

/// Mode / transport wording for mode comparisons
pub const MODE_WORDS: &[&str] = &[
    "mode", "air", "sea", "ocean", "ship", "road", "truck", "rail", "freight",
];

/// Best-route wording
pub const BEST_ROUTE_WORDS: &[&str] = &["safest", "cheap", "cheapest", "best route", "optimal route"];

/// Topics the advisor declines to answer
pub const OUT_OF_DOMAIN_WORDS: &[&str] = &[
    "world cup",
    "cricket",
    "football",
    "soccer",
    "who won",
    "nba",
    "movie",
    "actor",
    "singer",
    "music",
    "president",
];

/// Phrases that let a prompt borrow the current route's endpoints
pub const ROUTE_REFERENCE_PHRASES: &[&str] =
    &["this route", "last route", "this lane", "last lane", "corridor"];

/// Phrases that pull the current lane into a strategy answer
pub const CURRENT_LANE_PHRASES: &[&str] = &[
    "this route",
    "last route",
    "this lane",
    "last lane",
    "current lane",
];

/// Advisor intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Intent {
    ExplainRoute,
    SafestModeComparison,
    ScenarioExplanation,
    RouteComparison,
    NetworkOptimizerAdvice,
    UniversalBestRoute,
    OutOfDomain,
    GeneralStrategy,
    DefaultExecutiveSummary,
}

impl Intent {
    /// Evaluation order. Reordering changes answers to ambiguous prompts.
    pub const PRIORITY: [Intent; 9] = [
        Intent::ExplainRoute,
        Intent::SafestModeComparison,
        Intent::ScenarioExplanation,
        Intent::RouteComparison,
        Intent::NetworkOptimizerAdvice,
        Intent::UniversalBestRoute,
        Intent::OutOfDomain,
        Intent::GeneralStrategy,
        Intent::DefaultExecutiveSummary,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::ExplainRoute => "explain-route",
            Intent::SafestModeComparison => "safest-mode-comparison",
            Intent::ScenarioExplanation => "scenario-explanation",
            Intent::RouteComparison => "route-comparison",
            Intent::NetworkOptimizerAdvice => "network-optimizer-advice",
            Intent::UniversalBestRoute => "universal-best-route",
            Intent::OutOfDomain => "out-of-domain",
            Intent::GeneralStrategy => "general-strategy",
            Intent::DefaultExecutiveSummary => "default-executive-summary",
        }
    }

    /// Trigger predicate for this intent
    fn matches(&self, signals: &PromptSignals) -> bool {
        let lower = signals.lower.as_str();
        match self {
            Intent::ExplainRoute => {
                lower.contains("route:") && lower.contains("scores:") && signals.has_current_lane
            }
            Intent::SafestModeComparison => {
                contains_any(lower, SAFETY_WORDS)
                    && contains_any(lower, MODE_WORDS)
                    && signals.lane.is_some()
            }
            Intent::ScenarioExplanation => lower.contains("base=") && lower.contains("stressed="),
            Intent::RouteComparison => {
                lower.contains("compare these routes")
                    || (lower.contains("lane") && lower.contains("overall"))
            }
            Intent::NetworkOptimizerAdvice => {
                lower.contains("options=") && lower.contains("advise best choice")
            }
            Intent::UniversalBestRoute => {
                contains_any(lower, BEST_ROUTE_WORDS) && signals.lane.is_some()
            }
            Intent::OutOfDomain => contains_any(lower, OUT_OF_DOMAIN_WORDS),
            Intent::GeneralStrategy => {
                lower.contains('?') || lower.contains("strategy") || lower.contains("plan")
            }
            Intent::DefaultExecutiveSummary => true,
        }
    }
}

/// Origin/destination pair resolved from a prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaneEndpoints {
    pub origin: String,
    pub destination: String,
}

/// Everything the classifier and renderers need to know about a prompt
#[derive(Debug, Clone)]
pub struct PromptSignals {
    pub lower: String,
    /// Gazetteer names found in the prompt, in gazetteer order
    pub locations: Vec<&'static str>,
    /// Endpoints from the prompt, or borrowed from the current route
    pub lane: Option<LaneEndpoints>,
    /// A current route and assessment both exist
    pub has_current_lane: bool,
}

impl PromptSignals {
    pub fn analyze(prompt: &str, context: &ContextStore) -> Self {
        let lower = prompt.to_lowercase();
        let locations = extract_locations(&lower);
        let lane = resolve_lane(&lower, &locations, context);
        PromptSignals {
            lower,
            locations,
            lane,
            has_current_lane: context.current_lane().is_some(),
        }
    }

    /// Whether the prompt explicitly points at the current route or lane
    pub fn references_current_lane(&self) -> bool {
        contains_any(&self.lower, CURRENT_LANE_PHRASES)
    }
}

/// Classify a prompt against the current context
pub fn classify(prompt: &str, context: &ContextStore) -> Intent {
    classify_signals(&PromptSignals::analyze(prompt, context))
}

/// Walk the priority list and return the first matching intent
pub fn classify_signals(signals: &PromptSignals) -> Intent {
    let intent = Intent::PRIORITY
        .into_iter()
        .find(|intent| intent.matches(signals))
        .unwrap_or(Intent::DefaultExecutiveSummary);
    tracing::debug!(intent = intent.as_str(), "classified prompt");
    intent
}

/// Find gazetteer names in text (case-insensitive substring match)
///
/// Results follow gazetteer order, not position in the text, and are de-duplicated.
/// Short names also match inside longer words ("uk" inside "ukraine").
pub fn extract_locations(text: &str) -> Vec<&'static str> {
    let lower = text.to_lowercase();
    let mut found: Vec<&'static str> = Vec::new();
    for name in GAZETTEER {
        if lower.contains(&name.to_lowercase()) && !found.contains(name) {
            found.push(name);
        }
    }
    found
}

/// Resolve (origin, destination) for a prompt
///
/// Two or more locations: the first two. Otherwise, when the prompt refers to
/// "this route", "last lane", a "corridor" and similar, the current route's endpoints.
pub fn resolve_lane(
    lower: &str,
    locations: &[&'static str],
    context: &ContextStore,
) -> Option<LaneEndpoints> {
    if let [origin, destination, ..] = locations {
        return Some(LaneEndpoints {
            origin: (*origin).to_string(),
            destination: (*destination).to_string(),
        });
    }
    match context.route() {
        Some(route) if contains_any(lower, ROUTE_REFERENCE_PHRASES) => Some(LaneEndpoints {
            origin: route.origin.clone(),
            destination: route.destination.clone(),
        }),
        _ => None,
    }
}

fn contains_any(text: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| text.contains(n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lane::{RouteContext, TransportMode, WeightingProfile};
    use crate::risk::compute_route_risk;
    use chrono::NaiveDate;

    fn store_with_lane() -> ContextStore {
        let route = RouteContext {
            origin: "China".to_string(),
            destination: "USA".to_string(),
            mode: TransportMode::Sea,
            departure_date: NaiveDate::from_ymd_opt(2024, 7, 15).unwrap(),
            weighting: WeightingProfile::Balanced,
            include_conflict: true,
        };
        let assessment = compute_route_risk(
            "China",
            "USA",
            TransportMode::Sea,
            route.departure_date,
            WeightingProfile::Balanced,
            true,
        );
        let mut store = ContextStore::new();
        store.set_lane(route, assessment);
        store
    }

    #[test]
    fn test_extract_locations_gazetteer_order() {
        let found = extract_locations("Shipping from USA to China and back to usa");
        assert_eq!(found, vec!["China", "USA"]);
    }

    #[test]
    fn test_extract_locations_substring_quirk() {
        let found = extract_locations("grain out of Ukraine");
        assert_eq!(found, vec!["UK", "Ukraine"]);
    }

    #[test]
    fn test_resolve_lane_prefers_prompt() {
        let store = store_with_lane();
        let lower = "safest mode from india to germany";
        let lane = resolve_lane(lower, &extract_locations(lower), &store).unwrap();
        assert_eq!(lane.origin, "Germany");
        assert_eq!(lane.destination, "India");
    }

    #[test]
    fn test_resolve_lane_falls_back_on_reference() {
        let store = store_with_lane();
        let lower = "is this corridor safe by air?";
        let lane = resolve_lane(lower, &extract_locations(lower), &store).unwrap();
        assert_eq!(lane.origin, "China");
        assert_eq!(lane.destination, "USA");

        let lower = "is it safe by air?";
        assert!(resolve_lane(lower, &extract_locations(lower), &store).is_none());
    }

    #[test]
    fn test_explain_route_requires_context() {
        let prompt = "Route: China → USA via SEA\nScores: Geo=45.0\nwho won the world cup";
        assert_eq!(classify(prompt, &store_with_lane()), Intent::ExplainRoute);
        assert_eq!(classify(prompt, &ContextStore::new()), Intent::OutOfDomain);
    }

    #[test]
    fn test_safety_mode_question() {
        let store = ContextStore::new();
        assert_eq!(
            classify("Safest mode between India and USA", &store),
            Intent::SafestModeComparison
        );
        // No mode wording: falls through to the best-route intent
        assert_eq!(
            classify("safest option between India and USA", &store),
            Intent::UniversalBestRoute
        );
        // No locations: falls through to strategy
        assert_eq!(
            classify("what is the safest mode?", &store),
            Intent::GeneralStrategy
        );
    }

    #[test]
    fn test_closed_formats() {
        let store = ContextStore::new();
        assert_eq!(
            classify("Base=Geo 45\nStressed=Geo 50\nExplain scenario.", &store),
            Intent::ScenarioExplanation
        );
        assert_eq!(
            classify("Compare these routes:\nChina → USA", &store),
            Intent::RouteComparison
        );
        assert_eq!(
            classify("which lane has the lowest overall score", &store),
            Intent::RouteComparison
        );
        assert_eq!(
            classify("Base=x, Risks=y\nOptions=z\nAdvise best choice.", &store),
            Intent::NetworkOptimizerAdvice
        );
    }

    #[test]
    fn test_cheapest_between_countries() {
        assert_eq!(
            classify("cheapest way from Brazil to Mexico", &ContextStore::new()),
            Intent::UniversalBestRoute
        );
    }

    #[test]
    fn test_out_of_domain_and_fallbacks() {
        let store = ContextStore::new();
        assert_eq!(classify("Who won the NBA finals?", &store), Intent::OutOfDomain);
        assert_eq!(classify("We need a resilience plan", &store), Intent::GeneralStrategy);
        assert_eq!(
            classify("Summarise the network", &store),
            Intent::DefaultExecutiveSummary
        );
        assert_eq!(classify("", &store), Intent::DefaultExecutiveSummary);
    }

    #[test]
    fn test_priority_list_is_complete() {
        assert_eq!(Intent::PRIORITY.len(), 9);
        assert_eq!(Intent::PRIORITY[0], Intent::ExplainRoute);
        assert_eq!(Intent::PRIORITY[8], Intent::DefaultExecutiveSummary);
    }
}
