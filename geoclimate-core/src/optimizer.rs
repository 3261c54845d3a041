//! Network optimizer: generate alternative lanes for a baseline route
//!
//! Alternatives reuse the baseline's departure date, weighting and conflict flag.

use crate::lane::{RouteContext, TransportMode};
use crate::risk::{compute_route_risk, RiskAssessment};
use serde::{Deserialize, Serialize};

/// Origins that are shifted to Singapore; every other origin shifts to the Netherlands
const SINGAPORE_FEEDERS: &[&str] = &["China", "India"];

/// One labelled alternative lane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct OptimizerOption {
    pub label: String,
    pub route: RouteContext,
    pub assessment: RiskAssessment,
}

impl OptimizerOption {
    fn scored(label: &str, route: RouteContext) -> Self {
        let assessment = compute_route_risk(
            &route.origin,
            &route.destination,
            route.mode,
            route.departure_date,
            route.weighting,
            route.include_conflict,
        );
        OptimizerOption {
            label: label.to_string(),
            route,
            assessment,
        }
    }
}

/// Alternative mode for a mode shift: sea lanes move to air, everything else to sea
pub fn shifted_mode(mode: TransportMode) -> TransportMode {
    if mode == TransportMode::Sea {
        TransportMode::Air
    } else {
        TransportMode::Sea
    }
}

/// Alternative origin hub for a region shift
pub fn shifted_origin(origin: &str) -> &'static str {
    if SINGAPORE_FEEDERS.contains(&origin) {
        "Singapore"
    } else {
        "Netherlands"
    }
}

/// Build the option set for a baseline route: a mode shift then a region shift
pub fn generate_alternatives(base: &RouteContext) -> Vec<OptimizerOption> {
    let mode_shift = RouteContext {
        mode: shifted_mode(base.mode),
        ..base.clone()
    };
    let region_shift = RouteContext {
        origin: shifted_origin(&base.origin).to_string(),
        ..base.clone()
    };

    vec![
        OptimizerOption::scored("Mode shift", mode_shift),
        OptimizerOption::scored("Region shift", region_shift),
    ]
}

/// Index of the option with the lowest overall score (first wins on ties)
pub fn lowest_risk(options: &[OptimizerOption]) -> Option<usize> {
    options
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, o)| match best {
            Some((_, score)) if score <= o.assessment.overall => best,
            _ => Some((i, o.assessment.overall)),
        })
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lane::WeightingProfile;
    use chrono::NaiveDate;

    fn route(origin: &str, mode: TransportMode) -> RouteContext {
        RouteContext {
            origin: origin.to_string(),
            destination: "USA".to_string(),
            mode,
            departure_date: NaiveDate::from_ymd_opt(2024, 7, 15).unwrap(),
            weighting: WeightingProfile::Balanced,
            include_conflict: true,
        }
    }

    #[test]
    fn test_sea_lane_shifts_to_air_and_singapore() {
        let options = generate_alternatives(&route("China", TransportMode::Sea));
        assert_eq!(options.len(), 2);
        assert_eq!(options[0].label, "Mode shift");
        assert_eq!(options[0].route.mode, TransportMode::Air);
        assert_eq!(options[0].route.origin, "China");
        assert_eq!(options[1].label, "Region shift");
        assert_eq!(options[1].route.origin, "Singapore");
        assert_eq!(options[1].route.mode, TransportMode::Sea);
    }

    #[test]
    fn test_non_sea_lane_shifts_to_sea_and_netherlands() {
        let options = generate_alternatives(&route("Germany", TransportMode::Rail));
        assert_eq!(options[0].route.mode, TransportMode::Sea);
        assert_eq!(options[1].route.origin, "Netherlands");
    }

    #[test]
    fn test_options_are_scored_with_route_settings() {
        let base = route("Ukraine", TransportMode::Road);
        let options = generate_alternatives(&base);
        // Mode shift keeps the conflict origin, region shift leaves it
        assert_eq!(options[0].assessment.conflict_bump, 10);
        assert_eq!(options[1].assessment.conflict_bump, 0);
    }

    #[test]
    fn test_lowest_risk() {
        let options = generate_alternatives(&route("China", TransportMode::Sea));
        let best = lowest_risk(&options).unwrap();
        let min = options
            .iter()
            .map(|o| o.assessment.overall)
            .fold(f64::INFINITY, f64::min);
        assert_eq!(options[best].assessment.overall, min);
        assert_eq!(lowest_risk(&[]), None);
    }
}
