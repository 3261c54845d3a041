//! Scenario lab: stress a baseline assessment with per-dimension multipliers
//!
//! The stressed overall always uses the Balanced weights and no conflict bump,
//! whatever weighting produced the baseline.

use crate::risk::{clamp_overall, round1, weighted_sum, RiskAssessment, RiskDimension};
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Fixed weights for the stressed overall (geo, climate, logistics, cyber)
pub const STRESS_WEIGHTS: [f64; 4] = [0.35, 0.3, 0.25, 0.1];

/// Accepted multiplier range per dimension (inclusive)
pub const GEO_RANGE: (f64, f64) = (0.8, 1.6);
pub const CLIMATE_RANGE: (f64, f64) = (0.8, 1.8);
pub const LOGISTICS_RANGE: (f64, f64) = (0.8, 1.6);
pub const CYBER_RANGE: (f64, f64) = (0.8, 1.5);

/// Per-dimension stress multipliers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct StressMultipliers {
    pub geo: f64,
    pub climate: f64,
    pub logistics: f64,
    pub cyber: f64,
}

impl Default for StressMultipliers {
    fn default() -> Self {
        StressMultipliers {
            geo: 1.1,
            climate: 1.2,
            logistics: 1.1,
            cyber: 1.0,
        }
    }
}

impl StressMultipliers {
    pub const IDENTITY: StressMultipliers = StressMultipliers {
        geo: 1.0,
        climate: 1.0,
        logistics: 1.0,
        cyber: 1.0,
    };

    /// Check every multiplier against its accepted range
    pub fn validate(&self) -> Result<()> {
        for (name, value, (min, max)) in [
            ("geo", self.geo, GEO_RANGE),
            ("climate", self.climate, CLIMATE_RANGE),
            ("logistics", self.logistics, LOGISTICS_RANGE),
            ("cyber", self.cyber, CYBER_RANGE),
        ] {
            if !(min..=max).contains(&value) {
                anyhow::bail!(
                    "stress.{} must be between {} and {} (got {})",
                    name,
                    min,
                    max,
                    value
                );
            }
        }
        Ok(())
    }
}

/// A stressed variant of a baseline assessment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ScenarioContext {
    pub multipliers: StressMultipliers,
    pub stressed: RiskAssessment,
}

impl ScenarioContext {
    /// `Geo 49.5, Climate 62.0, Logistics 66.4, Cyber 57.5, Overall 58.3`
    pub fn summary(&self) -> String {
        format!(
            "{}, Overall {:.1}",
            self.stressed.breakdown(),
            self.stressed.overall
        )
    }
}

/// Apply multipliers to a baseline and recompute overall with `STRESS_WEIGHTS`
pub fn stress(base: &RiskAssessment, multipliers: StressMultipliers) -> ScenarioContext {
    let geopolitical = round1(base.geopolitical * multipliers.geo);
    let climate = round1(base.climate * multipliers.climate);
    let logistics = round1(base.logistics * multipliers.logistics);
    let cyber = round1(base.cyber * multipliers.cyber);

    let overall = weighted_sum([geopolitical, climate, logistics, cyber], STRESS_WEIGHTS);

    ScenarioContext {
        multipliers,
        stressed: RiskAssessment {
            geopolitical,
            climate,
            logistics,
            cyber,
            overall: clamp_overall(overall),
            conflict_bump: 0,
        },
    }
}

/// One row of a base-vs-stressed comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioRow {
    pub dimension: String,
    pub base: f64,
    pub stressed: f64,
}

/// Base vs stressed per dimension, followed by the overall row
pub fn compare(base: &RiskAssessment, scenario: &ScenarioContext) -> Vec<ScenarioRow> {
    let mut rows: Vec<ScenarioRow> = RiskDimension::ALL
        .iter()
        .map(|d| ScenarioRow {
            dimension: d.as_str().to_string(),
            base: base.dimension(*d),
            stressed: scenario.stressed.dimension(*d),
        })
        .collect();
    rows.push(ScenarioRow {
        dimension: "Overall".to_string(),
        base: base.overall,
        stressed: scenario.stressed.overall,
    });
    rows
}
