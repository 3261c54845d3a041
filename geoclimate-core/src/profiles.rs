//! Static risk reference data
//!
//! Baseline scores per location for each risk dimension, the gazetteer used for
//! location extraction, and the active conflict set.
//!
//! Global invariants enforced:
//! - Every dimension lookup resolves (named entry or the table's `default`)
//! - Table and gazetteer iteration order is fixed

use serde::{Deserialize, Serialize};

/// Key of the fallback row present in every table
pub const DEFAULT_KEY: &str = "default";

/// A single dimension table: `default` first, then named locations
pub type ProfileTable = &'static [(&'static str, f64)];

pub const GEO_RISK: ProfileTable = &[
    (DEFAULT_KEY, 35.0),
    ("Ukraine", 90.0),
    ("Russia", 85.0),
    ("Israel", 80.0),
    ("Gaza Strip", 92.0),
    ("China", 60.0),
    ("Taiwan", 70.0),
    ("USA", 30.0),
    ("Germany", 25.0),
    ("UK", 25.0),
    ("India", 40.0),
    ("Brazil", 45.0),
    ("South Africa", 40.0),
    ("Australia", 35.0),
    ("Bangladesh", 60.0),
    ("Philippines", 60.0),
    ("Pakistan", 55.0),
    ("Singapore", 20.0),
    ("Netherlands", 22.0),
    ("Mexico", 45.0),
    ("Canada", 20.0),
    ("Japan", 25.0),
    ("South Korea", 30.0),
];

pub const CLIMATE_RISK: ProfileTable = &[
    (DEFAULT_KEY, 40.0),
    ("Bangladesh", 85.0),
    ("Philippines", 80.0),
    ("Pakistan", 75.0),
    ("USA", 45.0),
    ("India", 65.0),
    ("Australia", 55.0),
    ("Brazil", 50.0),
    ("China", 45.0),
    ("Japan", 40.0),
    ("Mexico", 50.0),
];

pub const LOGISTICS_RISK: ProfileTable = &[
    (DEFAULT_KEY, 35.0),
    ("USA", 50.0),
    ("China", 55.0),
    ("Singapore", 40.0),
    ("Netherlands", 45.0),
    ("Germany", 40.0),
    ("UK", 45.0),
    ("India", 50.0),
    ("Brazil", 48.0),
    ("South Africa", 50.0),
    ("Mexico", 52.0),
];

pub const CYBER_RISK: ProfileTable = &[
    (DEFAULT_KEY, 40.0),
    ("USA", 55.0),
    ("European Union", 50.0),
    ("China", 60.0),
    ("India", 45.0),
    ("Japan", 50.0),
    ("Brazil", 42.0),
    ("UK", 48.0),
];

/// Locations the advisor recognises in free text, in ascending lexical order
pub const GAZETTEER: &[&str] = &[
    "Australia",
    "Bangladesh",
    "Brazil",
    "Canada",
    "China",
    "Gaza Strip",
    "Germany",
    "India",
    "Israel",
    "Japan",
    "Mexico",
    "Netherlands",
    "Pakistan",
    "Philippines",
    "Russia",
    "Singapore",
    "South Africa",
    "South Korea",
    "UK",
    "USA",
    "Ukraine",
];

/// Origins that trigger the conflict bump
pub const CONFLICT_ORIGINS: &[&str] = &["Ukraine", "Russia", "Israel", "Gaza Strip", "Taiwan"];

/// Baseline scores for one location across all four dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationProfile {
    pub geo: f64,
    pub climate: f64,
    pub logistics: f64,
    pub cyber: f64,
}

/// Look up a location in a table, falling back to the table's `default` row
pub fn lookup(table: ProfileTable, location: &str) -> f64 {
    table
        .iter()
        .find(|(name, _)| *name == location)
        .or_else(|| table.iter().find(|(name, _)| *name == DEFAULT_KEY))
        .map(|(_, score)| *score)
        .unwrap_or(0.0)
}

/// Resolve all four dimensions for a location
pub fn profile(location: &str) -> LocationProfile {
    LocationProfile {
        geo: lookup(GEO_RISK, location),
        climate: lookup(CLIMATE_RISK, location),
        logistics: lookup(LOGISTICS_RISK, location),
        cyber: lookup(CYBER_RISK, location),
    }
}

/// Whether a location is in the active conflict set (exact, case-sensitive)
pub fn is_conflict_origin(location: &str) -> bool {
    CONFLICT_ORIGINS.contains(&location)
}

/// Whether a name appears in the gazetteer
pub fn is_known_location(location: &str) -> bool {
    GAZETTEER.contains(&location)
}

/// One row of the global heat index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatIndexRow {
    pub location: String,
    pub geo: f64,
    pub climate: f64,
    pub heat: f64,
}

/// Composite geo/climate heat for every profiled location (geo table order)
///
/// Formula: heat = 0.6 * geo + 0.4 * climate
pub fn heat_index() -> Vec<HeatIndexRow> {
    GEO_RISK
        .iter()
        .filter(|(name, _)| *name != DEFAULT_KEY)
        .map(|(name, _)| {
            let geo = lookup(GEO_RISK, name);
            let climate = lookup(CLIMATE_RISK, name);
            HeatIndexRow {
                location: (*name).to_string(),
                geo,
                climate,
                heat: geo * 0.6 + climate * 0.4,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_lookup() {
        assert_eq!(lookup(GEO_RISK, "Ukraine"), 90.0);
        assert_eq!(lookup(CYBER_RISK, "European Union"), 50.0);
    }

    #[test]
    fn test_unknown_location_uses_default() {
        let p = profile("Atlantis");
        assert_eq!(p.geo, 35.0);
        assert_eq!(p.climate, 40.0);
        assert_eq!(p.logistics, 35.0);
        assert_eq!(p.cyber, 40.0);
    }

    #[test]
    fn test_partial_profile_mixes_named_and_default() {
        // Taiwan only has a geo entry
        let p = profile("Taiwan");
        assert_eq!(p.geo, 70.0);
        assert_eq!(p.climate, 40.0);
        assert_eq!(p.logistics, 35.0);
        assert_eq!(p.cyber, 40.0);
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert_eq!(lookup(GEO_RISK, "china"), 35.0);
    }

    #[test]
    fn test_gazetteer_sorted_and_unique() {
        let mut sorted = GAZETTEER.to_vec();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted, GAZETTEER.to_vec());
        assert_eq!(GAZETTEER.len(), 21);
        assert!(!is_known_location("Taiwan"));
    }

    #[test]
    fn test_conflict_set() {
        assert!(is_conflict_origin("Gaza Strip"));
        assert!(is_conflict_origin("Taiwan"));
        assert!(!is_conflict_origin("China"));
    }

    #[test]
    fn test_heat_index() {
        let rows = heat_index();
        assert_eq!(rows.len(), GEO_RISK.len() - 1);
        assert_eq!(rows[0].location, "Ukraine");
        // Bangladesh: 60 * 0.6 + 85 * 0.4 = 70
        let bd = rows.iter().find(|r| r.location == "Bangladesh").unwrap();
        assert!((bd.heat - 70.0).abs() < 1e-9);
    }
}
