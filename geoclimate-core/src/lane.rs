//! Lane description types: transport modes, weighting profiles and route context

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Transport mode for a lane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Sea,
    Air,
    Road,
    Rail,
}

/// Multiplicative adjustments a mode applies to sub-scores
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeAdjustment {
    pub logistics: f64,
    pub climate: f64,
}

impl ModeAdjustment {
    pub const NONE: ModeAdjustment = ModeAdjustment {
        logistics: 1.0,
        climate: 1.0,
    };
}

impl TransportMode {
    /// All modes in comparison order
    pub const ALL: [TransportMode; 4] = [
        TransportMode::Sea,
        TransportMode::Air,
        TransportMode::Road,
        TransportMode::Rail,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Sea => "sea",
            TransportMode::Air => "air",
            TransportMode::Road => "road",
            TransportMode::Rail => "rail",
        }
    }

    /// Upper-case label used in rendered text
    pub fn label(&self) -> &'static str {
        match self {
            TransportMode::Sea => "SEA",
            TransportMode::Air => "AIR",
            TransportMode::Road => "ROAD",
            TransportMode::Rail => "RAIL",
        }
    }

    /// Exact lower-case mode name, as stored in routes; anything else is `None`
    pub fn from_name(name: &str) -> Option<TransportMode> {
        TransportMode::ALL.into_iter().find(|m| m.as_str() == name)
    }

    /// Lenient parse for user input (trimmed, case-insensitive); `None` for anything unrecognised
    pub fn parse(name: &str) -> Option<TransportMode> {
        match name.trim().to_ascii_lowercase().as_str() {
            "sea" => Some(TransportMode::Sea),
            "air" => Some(TransportMode::Air),
            "road" => Some(TransportMode::Road),
            "rail" => Some(TransportMode::Rail),
            _ => None,
        }
    }

    /// Fixed adjustments:
    /// - sea: logistics x1.15
    /// - air: logistics x0.9, climate x0.9
    /// - road: logistics x1.1
    /// - rail: none
    pub fn adjustment(&self) -> ModeAdjustment {
        match self {
            TransportMode::Sea => ModeAdjustment {
                logistics: 1.15,
                climate: 1.0,
            },
            TransportMode::Air => ModeAdjustment {
                logistics: 0.9,
                climate: 0.9,
            },
            TransportMode::Road => ModeAdjustment {
                logistics: 1.1,
                climate: 1.0,
            },
            TransportMode::Rail => ModeAdjustment::NONE,
        }
    }

    /// Static cost rank (lower is cheaper), independent of any risk score
    pub fn cost_rank(&self) -> u8 {
        match self {
            TransportMode::Sea => 1,
            TransportMode::Rail => 2,
            TransportMode::Road => 3,
            TransportMode::Air => 4,
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Weighting preset over (geo, climate, logistics, cyber)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WeightingProfile {
    #[default]
    #[serde(rename = "Balanced")]
    Balanced,
    #[serde(rename = "Geo-heavy")]
    GeoHeavy,
    #[serde(rename = "Climate-heavy")]
    ClimateHeavy,
    #[serde(rename = "Logistics-heavy")]
    LogisticsHeavy,
}

impl WeightingProfile {
    pub const ALL: [WeightingProfile; 4] = [
        WeightingProfile::Balanced,
        WeightingProfile::GeoHeavy,
        WeightingProfile::ClimateHeavy,
        WeightingProfile::LogisticsHeavy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WeightingProfile::Balanced => "Balanced",
            WeightingProfile::GeoHeavy => "Geo-heavy",
            WeightingProfile::ClimateHeavy => "Climate-heavy",
            WeightingProfile::LogisticsHeavy => "Logistics-heavy",
        }
    }

    /// Exact-name parse; `None` for anything unrecognised
    pub fn parse(name: &str) -> Option<WeightingProfile> {
        WeightingProfile::ALL
            .into_iter()
            .find(|w| w.as_str() == name.trim())
    }

    /// Exact-name lookup with the Balanced fallback used by the scoring model
    pub fn parse_or_default(name: &str) -> WeightingProfile {
        WeightingProfile::ALL
            .into_iter()
            .find(|w| w.as_str() == name)
            .unwrap_or_default()
    }

    /// Weights over (geo, climate, logistics, cyber)
    pub fn weights(&self) -> [f64; 4] {
        match self {
            WeightingProfile::Balanced => [0.35, 0.3, 0.25, 0.1],
            WeightingProfile::GeoHeavy => [0.45, 0.25, 0.2, 0.1],
            WeightingProfile::ClimateHeavy => [0.25, 0.45, 0.2, 0.1],
            WeightingProfile::LogisticsHeavy => [0.25, 0.2, 0.45, 0.1],
        }
    }
}

impl fmt::Display for WeightingProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The lane a caller last scored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RouteContext {
    pub origin: String,
    pub destination: String,
    pub mode: TransportMode,
    pub departure_date: NaiveDate,
    pub weighting: WeightingProfile,
    pub include_conflict: bool,
}

impl RouteContext {
    /// `origin → destination`
    pub fn endpoints(&self) -> String {
        format!("{} → {}", self.origin, self.destination)
    }

    /// `origin → destination (MODE)`
    pub fn lane_label(&self) -> String {
        format!("{} ({})", self.endpoints(), self.mode.label())
    }
}
