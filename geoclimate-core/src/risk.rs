//! Lane risk scoring model
//!
//! Global invariants enforced:
//! - Scoring is total: unknown locations, modes or weightings degrade, never fail
//! - Deterministic: identical input yields bit-identical output
//! - Only `overall` is clamped to [0, 100]; sub-scores are rounded, never clamped

use crate::lane::{ModeAdjustment, TransportMode, WeightingProfile};
use crate::profiles;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Months (1-based) that receive the storm-season climate multiplier.
/// Northern-Hemisphere window applied to every lane regardless of hemisphere.
pub const STORM_SEASON_MONTHS: [u32; 4] = [6, 7, 8, 9];

pub const STORM_SEASON_CLIMATE_FACTOR: f64 = 1.15;
pub const CONFLICT_BUMP: u8 = 10;
pub const CONFLICT_GEO_FACTOR: f64 = 1.1;

/// Scored output for one lane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RiskAssessment {
    pub geopolitical: f64,
    pub climate: f64,
    pub logistics: f64,
    pub cyber: f64,
    pub overall: f64,
    pub conflict_bump: u8,
}

/// Named risk dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskDimension {
    Geopolitics,
    Climate,
    Logistics,
    Cyber,
}

impl RiskDimension {
    pub const ALL: [RiskDimension; 4] = [
        RiskDimension::Geopolitics,
        RiskDimension::Climate,
        RiskDimension::Logistics,
        RiskDimension::Cyber,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskDimension::Geopolitics => "Geopolitics",
            RiskDimension::Climate => "Climate",
            RiskDimension::Logistics => "Logistics",
            RiskDimension::Cyber => "Cyber",
        }
    }
}

impl RiskAssessment {
    pub fn dimension(&self, dim: RiskDimension) -> f64 {
        match dim {
            RiskDimension::Geopolitics => self.geopolitical,
            RiskDimension::Climate => self.climate,
            RiskDimension::Logistics => self.logistics,
            RiskDimension::Cyber => self.cyber,
        }
    }

    pub fn band(&self) -> RiskBand {
        assign_risk_band(self.overall)
    }

    /// Dimensions sorted by score descending; ties keep `RiskDimension::ALL` order
    pub fn ranked_dimensions(&self) -> Vec<(RiskDimension, f64)> {
        let mut dims: Vec<(RiskDimension, f64)> = RiskDimension::ALL
            .iter()
            .map(|d| (*d, self.dimension(*d)))
            .collect();
        dims.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        dims
    }

    /// `Geo 45.0, Climate 51.7, Logistics 60.4, Cyber 57.5`
    pub fn breakdown(&self) -> String {
        format!(
            "Geo {:.1}, Climate {:.1}, Logistics {:.1}, Cyber {:.1}",
            self.geopolitical, self.climate, self.logistics, self.cyber
        )
    }
}

/// Risk band classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskBand {
    Low,      // < 25
    Moderate, // 25-50
    High,     // 50-75
    Critical, // >= 75
}

impl RiskBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskBand::Low => "Low",
            RiskBand::Moderate => "Moderate",
            RiskBand::High => "High",
            RiskBand::Critical => "Critical",
        }
    }
}

impl fmt::Display for RiskBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Assign risk band from an overall score
pub fn assign_risk_band(score: f64) -> RiskBand {
    if score < 25.0 {
        RiskBand::Low
    } else if score < 50.0 {
        RiskBand::Moderate
    } else if score < 75.0 {
        RiskBand::High
    } else {
        RiskBand::Critical
    }
}

/// Round to one decimal place
///
/// Rounds the exact binary value (so 51.74999... stays 51.7), ties to even.
pub fn round1(value: f64) -> f64 {
    format!("{:.1}", value).parse().unwrap_or(value)
}

/// Round to one decimal and clamp to [0, 100]
pub fn clamp_overall(value: f64) -> f64 {
    round1(value).clamp(0.0, 100.0)
}

/// Weighted sum over (geo, climate, logistics, cyber)
pub fn weighted_sum(scores: [f64; 4], weights: [f64; 4]) -> f64 {
    scores
        .iter()
        .zip(weights.iter())
        .map(|(s, w)| s * w)
        .sum()
}

/// Score a lane
///
/// Steps:
/// 1. Average origin and destination baselines per dimension
/// 2. Apply mode adjustments to logistics/climate
/// 3. Storm season (months 6-9): climate x1.15
/// 4. Conflict origin (when enabled): geo x1.1 and +10 on overall
/// 5. overall = weighted sum + bump, rounded to one decimal, clamped to [0, 100]
pub fn compute_route_risk(
    origin: &str,
    destination: &str,
    mode: TransportMode,
    departure: NaiveDate,
    weighting: WeightingProfile,
    include_conflict: bool,
) -> RiskAssessment {
    score_lane(
        origin,
        destination,
        mode.adjustment(),
        departure,
        weighting,
        include_conflict,
    )
}

/// Name-based variant: mode and weighting names must match exactly.
/// Unknown modes get no adjustment, unknown weightings use Balanced.
pub fn compute_route_risk_by_name(
    origin: &str,
    destination: &str,
    mode: &str,
    departure: NaiveDate,
    weighting: &str,
    include_conflict: bool,
) -> RiskAssessment {
    let adjustment = TransportMode::from_name(mode)
        .map(|m| m.adjustment())
        .unwrap_or(ModeAdjustment::NONE);
    score_lane(
        origin,
        destination,
        adjustment,
        departure,
        WeightingProfile::parse_or_default(weighting),
        include_conflict,
    )
}

fn score_lane(
    origin: &str,
    destination: &str,
    adjustment: ModeAdjustment,
    departure: NaiveDate,
    weighting: WeightingProfile,
    include_conflict: bool,
) -> RiskAssessment {
    let from = profiles::profile(origin);
    let to = profiles::profile(destination);

    let mut geo = (from.geo + to.geo) / 2.0;
    let mut climate = (from.climate + to.climate) / 2.0;
    let mut logistics = (from.logistics + to.logistics) / 2.0;
    let cyber = (from.cyber + to.cyber) / 2.0;

    logistics *= adjustment.logistics;
    climate *= adjustment.climate;

    if STORM_SEASON_MONTHS.contains(&departure.month()) {
        climate *= STORM_SEASON_CLIMATE_FACTOR;
    }

    // Only the origin is checked against the conflict set
    let mut conflict_bump = 0;
    if include_conflict && profiles::is_conflict_origin(origin) {
        conflict_bump = CONFLICT_BUMP;
        geo *= CONFLICT_GEO_FACTOR;
    }

    let overall =
        weighted_sum([geo, climate, logistics, cyber], weighting.weights()) + f64::from(conflict_bump);

    let assessment = RiskAssessment {
        geopolitical: round1(geo),
        climate: round1(climate),
        logistics: round1(logistics),
        cyber: round1(cyber),
        overall: clamp_overall(overall),
        conflict_bump,
    };

    tracing::debug!(
        origin,
        destination,
        weighting = weighting.as_str(),
        overall = assessment.overall,
        conflict_bump,
        "scored lane"
    );

    assessment
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_reference_lane_china_usa_sea_summer() {
        let r = compute_route_risk(
            "China",
            "USA",
            TransportMode::Sea,
            date(2024, 7, 15),
            WeightingProfile::Balanced,
            true,
        );
        assert_eq!(r.geopolitical, 45.0);
        // 45 * 1.15 is 51.74999... in binary
        assert_eq!(r.climate, 51.7);
        assert_eq!(r.logistics, 60.4);
        assert_eq!(r.cyber, 57.5);
        assert_eq!(r.overall, 52.1);
        assert_eq!(r.conflict_bump, 0);
    }

    #[test]
    fn test_winter_has_no_storm_multiplier() {
        let r = compute_route_risk(
            "China",
            "USA",
            TransportMode::Rail,
            date(2024, 1, 10),
            WeightingProfile::Balanced,
            false,
        );
        assert_eq!(r.climate, 45.0);
        assert_eq!(r.logistics, 52.5);
    }

    #[test]
    fn test_conflict_bump_origin_only() {
        let d = date(2024, 3, 1);
        let forward = compute_route_risk(
            "Ukraine",
            "USA",
            TransportMode::Sea,
            d,
            WeightingProfile::Balanced,
            true,
        );
        let reverse = compute_route_risk(
            "USA",
            "Ukraine",
            TransportMode::Sea,
            d,
            WeightingProfile::Balanced,
            true,
        );
        assert_eq!(forward.conflict_bump, 10);
        assert_eq!(reverse.conflict_bump, 0);
        // geo: (90 + 30) / 2 = 60, x1.1 = 66
        assert_eq!(forward.geopolitical, 66.0);
        assert_eq!(reverse.geopolitical, 60.0);
    }

    #[test]
    fn test_conflict_disabled() {
        let r = compute_route_risk(
            "Russia",
            "Germany",
            TransportMode::Rail,
            date(2024, 3, 1),
            WeightingProfile::Balanced,
            false,
        );
        assert_eq!(r.conflict_bump, 0);
        assert_eq!(r.geopolitical, 55.0);
    }

    #[test]
    fn test_unknown_names_degrade() {
        let d = date(2024, 3, 1);
        let by_name = compute_route_risk_by_name("Nowhere", "Elsewhere", "hovercraft", d, "Weird", true);
        let rail = compute_route_risk(
            "Nowhere",
            "Elsewhere",
            TransportMode::Rail,
            d,
            WeightingProfile::Balanced,
            true,
        );
        assert_eq!(by_name, rail);
    }

    #[test]
    fn test_by_name_mode_is_case_sensitive() {
        let d = date(2024, 7, 15);
        let exact = compute_route_risk_by_name("China", "USA", "sea", d, "Balanced", true);
        let upper = compute_route_risk_by_name("China", "USA", "SEA", d, "Balanced", true);
        let unknown = compute_route_risk_by_name("China", "USA", "hovercraft", d, "Balanced", true);
        assert_eq!(exact.logistics, 60.4);
        assert_eq!(upper, unknown);
        assert_eq!(upper.logistics, 52.5);
    }

    #[test]
    fn test_overall_clamped_subscores_not() {
        // Gaza Strip origin in storm season with geo-heavy weighting stays within bounds
        let r = compute_route_risk(
            "Gaza Strip",
            "Ukraine",
            TransportMode::Sea,
            date(2024, 8, 1),
            WeightingProfile::GeoHeavy,
            true,
        );
        // geo: (92 + 90) / 2 = 91, x1.1 = 100.1 (sub-score is not clamped)
        assert_eq!(r.geopolitical, 100.1);
        assert!(r.overall <= 100.0);
        assert!(r.overall >= 0.0);
    }

    #[test]
    fn test_band_thresholds() {
        assert_eq!(assign_risk_band(24.9), RiskBand::Low);
        assert_eq!(assign_risk_band(25.0), RiskBand::Moderate);
        assert_eq!(assign_risk_band(50.0), RiskBand::High);
        assert_eq!(assign_risk_band(74.9), RiskBand::High);
        assert_eq!(assign_risk_band(75.0), RiskBand::Critical);
    }

    #[test]
    fn test_round1_uses_binary_value() {
        assert_eq!(round1(51.75), 51.8);
        assert_eq!(round1(60.375), 60.4);
        assert_eq!(round1(45.0 * 1.15), 51.7);
    }

    #[test]
    fn test_ranked_dimensions_stable_on_ties() {
        let r = RiskAssessment {
            geopolitical: 40.0,
            climate: 40.0,
            logistics: 50.0,
            cyber: 40.0,
            overall: 42.5,
            conflict_bump: 0,
        };
        let ranked: Vec<RiskDimension> = r.ranked_dimensions().into_iter().map(|(d, _)| d).collect();
        assert_eq!(
            ranked,
            vec![
                RiskDimension::Logistics,
                RiskDimension::Geopolitics,
                RiskDimension::Climate,
                RiskDimension::Cyber
            ]
        );
    }
}
