//! GeoClimate core library - freight lane risk scoring and a rule-based advisor

#![deny(warnings)]

// Global invariants enforced in this crate:
// - Scoring and advising never fail; missing data degrades to defaults or a note
// - No global mutable state; the context store is owned by the caller
// - No randomness; the only clock read is `Advisor::for_today`
// - Identical input yields byte-for-byte identical output

pub mod advisor;
pub mod config;
pub mod context;
pub mod intent;
pub mod lane;
pub mod optimizer;
pub mod profiles;
pub mod prompts;
pub mod report;
pub mod risk;
pub mod scenario;
pub mod session;

pub use advisor::{Advisor, Answer};
pub use config::ResolvedConfig;
pub use context::ContextStore;
pub use intent::{classify, Intent};
pub use lane::{RouteContext, TransportMode, WeightingProfile};
pub use report::{render_json, LaneReport};
pub use risk::{RiskAssessment, RiskBand};
pub use scenario::{ScenarioContext, StressMultipliers};

use chrono::NaiveDate;

/// Score a lane with typed mode and weighting
pub fn compute_risk(
    origin: &str,
    destination: &str,
    mode: TransportMode,
    departure: NaiveDate,
    weighting: WeightingProfile,
    include_conflict: bool,
) -> RiskAssessment {
    risk::compute_route_risk(origin, destination, mode, departure, weighting, include_conflict)
}

/// Score a lane from a `RouteContext`
pub fn assess(route: &RouteContext) -> RiskAssessment {
    compute_risk(
        &route.origin,
        &route.destination,
        route.mode,
        route.departure_date,
        route.weighting,
        route.include_conflict,
    )
}

/// Answer a prompt against the context store using today's date
pub fn respond(system_prompt: &str, user_prompt: &str, context: &ContextStore) -> String {
    Advisor::for_today().respond(system_prompt, user_prompt, context)
}

/// Answer a prompt with "today" pinned
pub fn respond_on(
    today: NaiveDate,
    system_prompt: &str,
    user_prompt: &str,
    context: &ContextStore,
) -> String {
    Advisor::new(today).respond(system_prompt, user_prompt, context)
}
