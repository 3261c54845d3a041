//! Reporting and output generation
//!
//! Global invariants enforced:
//! - Deterministic output ordering (input order, never re-sorted here)
//! - Byte-for-byte identical output across runs

use crate::context::BasketEntry;
use crate::lane::RouteContext;
use crate::optimizer::{lowest_risk, OptimizerOption};
use crate::profiles::HeatIndexRow;
use crate::risk::RiskAssessment;
use crate::scenario::ScenarioRow;
use serde::{Deserialize, Serialize};

/// Lane snapshot in report format
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LaneReport {
    pub lane: String,
    pub departure_date: String,
    pub weighting: String,
    pub include_conflict: bool,
    pub band: String,
    pub risk: RiskAssessment,
}

impl LaneReport {
    pub fn new(route: &RouteContext, assessment: &RiskAssessment) -> Self {
        LaneReport {
            lane: route.lane_label(),
            departure_date: route.departure_date.format("%Y-%m-%d").to_string(),
            weighting: route.weighting.as_str().to_string(),
            include_conflict: route.include_conflict,
            band: assessment.band().as_str().to_string(),
            risk: *assessment,
        }
    }
}

/// Render a single lane as text
pub fn render_lane_text(report: &LaneReport) -> String {
    let mut output = String::new();
    output.push_str(&format!("Lane:       {}\n", report.lane));
    output.push_str(&format!("Departure:  {}\n", report.departure_date));
    output.push_str(&format!("Weighting:  {}\n", report.weighting));
    output.push_str(&format!(
        "Conflict:   {}\n",
        if report.include_conflict { "on" } else { "off" }
    ));
    output.push('\n');
    output.push_str(&format!("{:<12} {:>6}\n", "DIMENSION", "SCORE"));
    for (name, value) in [
        ("Geopolitics", report.risk.geopolitical),
        ("Climate", report.risk.climate),
        ("Logistics", report.risk.logistics),
        ("Cyber", report.risk.cyber),
    ] {
        output.push_str(&format!("{:<12} {:>6.1}\n", name, value));
    }
    output.push_str(&format!(
        "{:<12} {:>6.1}  ({})\n",
        "Overall", report.risk.overall, report.band
    ));
    if report.risk.conflict_bump > 0 {
        output.push_str(&format!(
            "Conflict bump applied: +{}\n",
            report.risk.conflict_bump
        ));
    }
    output
}

/// Render the comparison basket as a table
pub fn render_basket_text(basket: &[BasketEntry]) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "{:<32} {:>6} {:>8} {:>10} {:>6} {:>8}\n",
        "LANE", "GEO", "CLIMATE", "LOGISTICS", "CYBER", "OVERALL"
    ));
    for entry in basket {
        let risk = &entry.assessment;
        output.push_str(&format!(
            "{} {:>6.1} {:>8.1} {:>10.1} {:>6.1} {:>8.1}\n",
            truncate_or_pad(&entry.route.lane_label(), 32),
            risk.geopolitical,
            risk.climate,
            risk.logistics,
            risk.cyber,
            risk.overall
        ));
    }
    output
}

/// Render the baseline and its alternatives; the lowest-risk option is starred
pub fn render_options_text(
    base: &RouteContext,
    assessment: &RiskAssessment,
    options: &[OptimizerOption],
) -> String {
    let best = lowest_risk(options);
    let mut output = String::new();
    output.push_str(&format!(
        "Base: {} · Risk {:.1}\n\n",
        base.lane_label(),
        assessment.overall
    ));
    output.push_str(&format!(
        "{:<2} {:<14} {:<32} {:>8} {}\n",
        "", "OPTION", "LANE", "OVERALL", "BAND"
    ));
    for (i, option) in options.iter().enumerate() {
        let marker = if best == Some(i) { "*" } else { "" };
        output.push_str(&format!(
            "{:<2} {} {} {:>8.1} {}\n",
            marker,
            truncate_or_pad(&option.label, 14),
            truncate_or_pad(&option.route.lane_label(), 32),
            option.assessment.overall,
            option.assessment.band()
        ));
    }
    output
}

/// Render a base-vs-stressed comparison
pub fn render_scenario_text(rows: &[ScenarioRow]) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "{:<12} {:>6} {:>9} {:>7}\n",
        "DIMENSION", "BASE", "STRESSED", "DELTA"
    ));
    for row in rows {
        output.push_str(&format!(
            "{:<12} {:>6.1} {:>9.1} {:>+7.1}\n",
            row.dimension,
            row.base,
            row.stressed,
            row.stressed - row.base
        ));
    }
    output
}

/// Render the global heat index
pub fn render_heat_index_text(rows: &[HeatIndexRow]) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "{:<16} {:>6} {:>8} {:>6}\n",
        "LOCATION", "GEO", "CLIMATE", "HEAT"
    ));
    for row in rows {
        output.push_str(&format!(
            "{} {:>6.1} {:>8.1} {:>6.1}\n",
            truncate_or_pad(&row.location, 16),
            row.geo,
            row.climate,
            row.heat
        ));
    }
    output
}

/// Render any report value as pretty JSON
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "null".to_string())
}

/// Truncate or pad string to fixed width (in characters)
fn truncate_or_pad(s: &str, width: usize) -> String {
    if s.chars().count() > width {
        let head: String = s.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", head)
    } else {
        format!("{:<width$}", s, width = width)
    }
}
