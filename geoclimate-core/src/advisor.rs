//! Rule-based advisor: renders a markdown answer per classified intent
//!
//! Global invariants enforced:
//! - Every branch produces text; nothing here can fail
//! - Renderers read the context store and never write it
//! - The only clock input is the advisor's pinned `today`

use crate::context::ContextStore;
use crate::intent::{classify_signals, Intent, LaneEndpoints, PromptSignals};
use crate::lane::{RouteContext, TransportMode, WeightingProfile};
use crate::prompts::{dashboard_context, DASHBOARD_CONTEXT_HEADING};
use crate::risk::{compute_route_risk, RiskAssessment, RiskDimension};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Advisor answer with the intent that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub intent: Intent,
    pub text: String,
}

/// One mode's score in a mode comparison
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModeScore {
    pub mode: TransportMode,
    pub assessment: RiskAssessment,
}

/// Score every mode for a lane (Balanced weighting, conflict on) and sort safest first.
/// Ties keep `TransportMode::ALL` order.
pub fn rank_modes(origin: &str, destination: &str, date: NaiveDate) -> Vec<ModeScore> {
    let mut scores: Vec<ModeScore> = TransportMode::ALL
        .iter()
        .map(|mode| ModeScore {
            mode: *mode,
            assessment: compute_route_risk(
                origin,
                destination,
                *mode,
                date,
                WeightingProfile::Balanced,
                true,
            ),
        })
        .collect();
    scores.sort_by(|a, b| {
        a.assessment
            .overall
            .partial_cmp(&b.assessment.overall)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    scores
}

/// Cheapest mode by the static cost rank
pub fn cheapest_mode() -> TransportMode {
    TransportMode::ALL
        .into_iter()
        .min_by_key(|m| m.cost_rank())
        .unwrap_or(TransportMode::Sea)
}

/// Deterministic advisor pinned to a calendar date
#[derive(Debug, Clone, Copy)]
pub struct Advisor {
    today: NaiveDate,
}

impl Advisor {
    pub fn new(today: NaiveDate) -> Self {
        Advisor { today }
    }

    /// Advisor using the local calendar date
    pub fn for_today() -> Self {
        Advisor::new(chrono::Local::now().date_naive())
    }

    /// Answer a prompt. The system prompt is accepted for call-site compatibility
    /// with model-backed advisors and has no effect.
    pub fn respond(&self, _system_prompt: &str, user_prompt: &str, context: &ContextStore) -> String {
        self.answer(user_prompt, context).text
    }

    /// Strategy room: answer only the question, then append the dashboard context.
    /// The context is kept out of the classified text so it cannot trigger a closed format.
    pub fn strategy_room(&self, question: &str, context: &ContextStore) -> String {
        let mut answer = self.respond("You are a strategist.", question, context);
        if let Some(dashboard) = dashboard_context(context) {
            answer.push_str(DASHBOARD_CONTEXT_HEADING);
            answer.push_str(&dashboard);
        }
        answer
    }

    /// Classify and render
    pub fn answer(&self, user_prompt: &str, context: &ContextStore) -> Answer {
        let signals = PromptSignals::analyze(user_prompt, context);
        let intent = classify_signals(&signals);
        let text = self.render(intent, &signals, context);
        Answer { intent, text }
    }

    fn render(&self, intent: Intent, signals: &PromptSignals, context: &ContextStore) -> String {
        let lines = match (intent, context.current_lane(), signals.lane.as_ref()) {
            (Intent::ExplainRoute, Some((route, assessment)), _) => {
                explain_route(route, assessment)
            }
            (Intent::SafestModeComparison, _, Some(lane)) => self.safest_mode(lane),
            (Intent::ScenarioExplanation, _, _) => scenario_guidance(),
            (Intent::RouteComparison, _, _) => route_comparison(),
            (Intent::NetworkOptimizerAdvice, _, _) => optimizer_advice(),
            (Intent::UniversalBestRoute, _, Some(lane)) => self.best_route(lane),
            (Intent::OutOfDomain, _, _) => return out_of_domain(),
            (Intent::GeneralStrategy, _, _) => general_strategy(signals, context),
            (Intent::DefaultExecutiveSummary, _, _) => return executive_summary(),
            // Intents whose trigger guarantees context; kept total regardless
            (Intent::ExplainRoute, None, _) => vec![missing_lane_note()],
            (Intent::SafestModeComparison | Intent::UniversalBestRoute, _, None) => {
                vec![missing_lane_note()]
            }
        };
        finish(lines, context)
    }

    fn safest_mode(&self, lane: &LaneEndpoints) -> Vec<String> {
        let ranking = rank_modes(&lane.origin, &lane.destination, self.today);
        let mut lines = vec![
            format!(
                "**🧭 Safety-Focused Mode Comparison: {} → {}**",
                lane.origin, lane.destination
            ),
            String::new(),
            "**Mode ranking (lower score = safer):**".to_string(),
        ];
        for entry in &ranking {
            lines.push(format!(
                "- **{}** → overall risk **{:.1}/100** ({})",
                entry.mode.label(),
                entry.assessment.overall,
                entry.assessment.breakdown()
            ));
        }

        if let Some(best) = ranking.first() {
            lines.push(String::new());
            lines.push(format!(
                "**Recommended primary mode for safety:** **{}** with modeled risk **{:.1}/100**.",
                best.mode.label(),
                best.assessment.overall
            ));
            lines.push(String::new());
            lines.push("**Why this mode wins for safety:**".to_string());
            for reason in safety_reasons(best.mode) {
                lines.push(format!("- {}", reason));
            }
        }

        lines.push(String::new());
        lines.push("**Practical playbook:**".to_string());
        lines.push("- Use the safest mode for high-value or critical flows.".to_string());
        lines.push("- Keep a secondary mode as contingency.".to_string());
        lines.push("- Align SLAs, insurance and monitoring with risk.".to_string());
        lines
    }

    fn best_route(&self, lane: &LaneEndpoints) -> Vec<String> {
        let ranking = rank_modes(&lane.origin, &lane.destination, self.today);
        let cheapest = cheapest_mode();

        let mut lines = vec![format!(
            "**🌐 Route Assessment: {} → {}**",
            lane.origin, lane.destination
        )];
        if let Some(safest) = ranking.first() {
            lines.push(String::new());
            lines.push("### 🟢 Safest mode".to_string());
            lines.push(format!(
                "- **{}** with modeled risk **{:.1}/100**",
                safest.mode.label(),
                safest.assessment.overall
            ));
        }
        lines.push(String::new());
        lines.push("### 🟣 Cheapest mode".to_string());
        lines.push(format!(
            "- **{}** (lowest cost baseline in this model)",
            cheapest.label()
        ));
        lines.push(String::new());
        lines.push("### 🔄 Trade-off Summary".to_string());
        lines.push("- **Air** → safest + fastest, highest cost".to_string());
        lines.push("- **Sea** → cheapest, slowest, higher climate/logistics risk".to_string());
        lines.push("- **Rail** → stable for Asia–EU style land corridors".to_string());
        lines.push(
            "- **Road** → regional / last-mile rather than full intercontinental route".to_string(),
        );
        lines
    }
}

/// Canned explanation for what drives a dimension
pub fn driver_phrase(dim: RiskDimension) -> &'static str {
    match dim {
        RiskDimension::Geopolitics => {
            "geopolitical tensions, regulatory shifts or sanctions exposure"
        }
        RiskDimension::Climate => "weather volatility, storms, flooding and seasonal disruption",
        RiskDimension::Logistics => {
            "port congestion, infrastructure bottlenecks and capacity constraints"
        }
        RiskDimension::Cyber => "data security, ransomware and technology dependencies",
    }
}

/// Top three dimensions with their driver phrases
pub fn dominant_drivers(assessment: &RiskAssessment) -> Vec<String> {
    assessment
        .ranked_dimensions()
        .into_iter()
        .take(3)
        .map(|(dim, value)| {
            format!(
                "- **{} ({:.1}/100)** — driven by {}.",
                dim.as_str(),
                value,
                driver_phrase(dim)
            )
        })
        .collect()
}

fn mode_commentary(mode: TransportMode) -> &'static str {
    match mode {
        TransportMode::Sea => {
            "- **Sea freight notes:** Sensitive to port congestion, maritime chokepoints \
             (e.g. Suez, Red Sea) and seasonal storms along the route."
        }
        TransportMode::Air => {
            "- **Air freight notes:** Reduces logistics and climate exposure but increases cost; \
             capacity and belly-space constraints can still create volatility."
        }
        TransportMode::Road => {
            "- **Road freight notes:** Flexible rerouting is possible, but vulnerable to \
             border queues, regulatory checks and road infrastructure quality."
        }
        TransportMode::Rail => {
            "- **Rail notes:** Typically stable schedules and lower weather sensitivity, \
             but slower to reroute during disruption."
        }
    }
}

fn safety_reasons(mode: TransportMode) -> &'static [&'static str] {
    match mode {
        TransportMode::Air => &[
            "avoids maritime chokepoints and port queues",
            "reduces exposure to storms and congestion",
            "offers tighter transit-time control",
        ],
        TransportMode::Sea => &[
            "most cost-efficient for large volumes",
            "can shift ports/carriers during disruption",
        ],
        TransportMode::Road => &["flexible rerouting for regional flows"],
        TransportMode::Rail => &["stable schedules with lower weather sensitivity"],
    }
}

fn explain_route(route: &RouteContext, assessment: &RiskAssessment) -> Vec<String> {
    let mut lines = vec![
        format!(
            "**🌍 Lane Intelligence: {} ({})**",
            route.endpoints(),
            route.mode.label()
        ),
        String::new(),
        format!(
            "- **Overall risk:** **{:.1}/100** ({} band)",
            assessment.overall,
            assessment.band()
        ),
        format!("- **Breakdown:** {}.", assessment.breakdown()),
        String::new(),
        "**Top risk drivers for this lane:**".to_string(),
    ];
    lines.extend(dominant_drivers(assessment));
    lines.push(String::new());
    lines.push(mode_commentary(route.mode).to_string());
    lines.push(String::new());
    lines.push("**Mitigation playbook:**".to_string());
    lines.push(
        "- Design a **primary lane** and at least one **pre-agreed fallback route**.".to_string(),
    );
    lines.push("- Align **incoterms, SLAs and insurance** with the current risk level.".to_string());
    lines.push(
        "- Implement **lane-level monitoring** (ports, borders, weather, cyber).".to_string(),
    );
    lines.push(
        "- Use **multi-modal combinations** (e.g. sea + air, rail + truck) for critical flows."
            .to_string(),
    );
    lines
}

fn scenario_guidance() -> Vec<String> {
    [
        "**📊 Scenario Lab – Stress Test Interpretation**",
        "",
        "- The stressed scenario increases one or more risk dimensions versus the base case.",
        "- Focus on where the **percentage change** is greatest (often Climate or Logistics).",
        "",
        "**How to read it:**",
        "- If **Climate** jumps strongly, treat the lane as more sensitive to storms, floods \
         or heatwaves — adjust schedules and inventory buffers accordingly.",
        "- If **Logistics** spikes, assume port, terminal or carrier disruptions — prepare \
         alternative routings and backup capacity.",
        "- If **Geopolitics** rises, revisit sanctions, export controls and regulatory checks.",
        "- If **Cyber** rises, review TMS/WMS, partners’ security posture and incident response.",
        "",
        "**Resilience actions under stress:**",
        "- Build in additional lead-time for the stressed scenario.",
        "- Increase safety stock or strategic buffers at key nodes.",
        "- Pre-negotiate alternative carriers, ports and modes.",
        "- Run playbooks for extreme but plausible disruptions.",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn route_comparison() -> Vec<String> {
    [
        "**🔄 Multi-Route Comparison & Recommendation**",
        "",
        "- Prefer lanes with **lower overall risk** where service and cost are acceptable.",
        "- When routes have similar overall risk, choose the one with **lower Logistics and \
         Climate scores**, as these tend to drive day-to-day disruption.",
        "",
        "**Typical trade-off logic:**",
        "- Air vs Sea: air is safer for time-critical freight; sea wins on cost.",
        "- Europe vs Asia origin: European origins often bring lower geopolitical volatility \
         but may have longer transit and higher cost.",
        "- Singapore / Netherlands hubs: frequently provide more resilient infrastructure and \
         cyber posture than regional alternatives.",
        "",
        "Use low-risk routes for your **core, high-volume flows**, and keep a small share on \
         alternative lanes to preserve agility.",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn optimizer_advice() -> Vec<String> {
    [
        "**🎯 Network Optimizer – Recommended Configuration**",
        "",
        "- Select as your **primary option** the lane with the **lowest overall risk** that \
         still meets service and cost constraints.",
        "- Use the **second-best option** as a formal, contracted contingency with \
         pre-defined triggers (e.g. corridor closure, war-risk premiums, major port outage).",
        "",
        "**Design principles:**",
        "- Avoid concentration in a single corridor or single port cluster.",
        "- Mix geographies (e.g. Europe + Asia hubs) to diversify geopolitical risk.",
        "- Combine modes (sea + air, rail + truck) for strategic SKUs.",
        "- Align your sourcing strategy with the chosen network lanes.",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn out_of_domain() -> String {
    [
        "**ℹ️ General Knowledge Note**",
        "",
        "This AI assistant is focused on **supply chain, geopolitics, climate, logistics \
         and cyber risk**.",
        "",
        "The question you asked appears to be **outside this domain**, so I unfortunately \
         cannot provide an accurate answer.",
        "",
        "Try asking things like:",
        "- 'Safest mode between India and USA'",
        "- 'How would conflict in the Red Sea affect my supply chain?'",
        "- 'What's the best routing strategy for high-value cargo?'",
    ]
    .join("\n")
}

fn general_strategy(signals: &PromptSignals, context: &ContextStore) -> Vec<String> {
    let mut lines = vec![
        "**🤖 Strategic Advisory Response**".to_string(),
        String::new(),
        "**1. Situation framing**".to_string(),
    ];
    match &signals.lane {
        Some(lane) => lines.push(format!(
            "- You are moving freight between **{}** and **{}**, combining \
             geopolitical, climate, logistics and cyber risks.",
            lane.origin, lane.destination
        )),
        None => lines.push(
            "- You are balancing service, cost and risk across a multi-country supply network."
                .to_string(),
        ),
    }
    if let Some((route, assessment)) = context.current_lane() {
        if signals.references_current_lane() {
            lines.push(format!(
                "- Current lane in focus: **{}**, overall risk **{:.1}/100**.",
                route.lane_label(),
                assessment.overall
            ));
        }
    }

    lines.extend(
        [
            "",
            "**2. Immediate priorities (0–3 months)**",
            "- Identify your **top 5 critical lanes** by value and service sensitivity.",
            "- For each, define a **primary route** and at least one **fallback lane**.",
            "- Tighten **cyber hygiene** for core logistics systems and partners.",
            "- Adjust **sailing / flight windows** around known climate seasons \
             (monsoon, hurricanes, typhoons).",
            "",
            "**3. Medium-term moves (3–12 months)**",
            "- Stand up a **lane risk dashboard** with monthly geo/climate/logistics signals.",
            "- Build a **playbook library** for disruptions (port closure, strike, corridor conflict).",
            "- Pilot **multi-sourcing** and **multi-hub** strategies for key SKUs.",
            "- Introduce **predictive ETA and capacity monitoring** for high-risk lanes.",
            "",
            "**4. Long-term design (12+ months)**",
            "- Develop a **digital twin** of your end-to-end network for scenario simulation.",
            "- Align **sustainability, cost and resilience** targets per lane.",
            "- Institutionalize a **cross-functional risk council** \
             (Supply Chain, Finance, Risk, Commercial).",
        ]
        .iter()
        .map(|s| s.to_string()),
    );
    lines
}

fn executive_summary() -> String {
    [
        "**🌐 GeoClimate AI Command Center Analysis**",
        "",
        "**Executive Summary**",
        "This assessment highlights multiple opportunities to improve resilience, cost and \
         service across your global network. It considers geopolitics, climate, logistics and \
         cyber risk as an integrated system.",
        "",
        "**Key Insights**",
        "- **Route diversification** can reduce disruption exposure by 25–40% on critical lanes.",
        "- **Climate-aware scheduling** (monsoon, hurricane, typhoon seasons) significantly \
         improves on-time performance.",
        "- Strengthening **cyber security** for logistics platforms lowers the likelihood of \
         high-impact outages.",
        "",
        "**Recommended Actions**",
        "1. Identify your top risk-weighted lanes and define clear primary and backup routings.",
        "2. Use multi-modal options (sea + air, rail + truck) for high-value or time-critical flows.",
        "3. Implement monitoring of ports, corridors and weather to trigger pre-defined playbooks.",
        "4. Regularly review sourcing and network design as geopolitics and climate patterns evolve.",
        "",
        "Use the Route Analyzer, Scenario Lab and Network Optimizer together to turn this into \
         a living, adaptive supply chain design rather than a one-off study.",
    ]
    .join("\n")
}

fn missing_lane_note() -> String {
    "ℹ️ Run a lane first: no origin and destination could be resolved for this question."
        .to_string()
}

/// Footer describing the active lane, scenario and option set; empty when none exist
pub fn context_footer(context: &ContextStore) -> Vec<String> {
    let mut footer = Vec::new();
    if let Some((route, assessment)) = context.current_lane() {
        footer.push(format!(
            "**Current lane in tool:** {} via {} (overall risk {:.1}/100)",
            route.endpoints(),
            route.mode.label(),
            assessment.overall
        ));
    }
    if let Some(scenario) = context.scenario() {
        footer.push(format!("**Scenario context:** {}", scenario.summary()));
    }
    if let Some(options) = context.options() {
        if !options.is_empty() {
            footer.push(format!(
                "**Network options configured:** {} alternatives.",
                options.len()
            ));
        }
    }
    footer
}

fn finish(mut lines: Vec<String>, context: &ContextStore) -> String {
    for entry in context_footer(context) {
        lines.push(String::new());
        lines.push(entry);
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 15).unwrap()
    }

    #[test]
    fn test_rank_modes_sorted_ascending() {
        let ranking = rank_modes("China", "USA", date());
        assert_eq!(ranking.len(), 4);
        for pair in ranking.windows(2) {
            assert!(pair[0].assessment.overall <= pair[1].assessment.overall);
        }
        // Air lowers both logistics and climate, so it is the safest here
        assert_eq!(ranking[0].mode, TransportMode::Air);
    }

    #[test]
    fn test_cheapest_mode_is_sea() {
        assert_eq!(cheapest_mode(), TransportMode::Sea);
    }

    #[test]
    fn test_dominant_drivers_top_three() {
        let assessment = compute_route_risk(
            "China",
            "USA",
            TransportMode::Sea,
            date(),
            WeightingProfile::Balanced,
            true,
        );
        let drivers = dominant_drivers(&assessment);
        assert_eq!(drivers.len(), 3);
        assert!(drivers[0].starts_with("- **Logistics (60.4/100)**"));
        assert!(drivers[1].starts_with("- **Cyber (57.5/100)**"));
        assert!(drivers[2].starts_with("- **Climate (51.7/100)**"));
    }

    #[test]
    fn test_footer_empty_without_context() {
        assert!(context_footer(&ContextStore::new()).is_empty());
    }

    #[test]
    fn test_system_prompt_is_ignored() {
        let advisor = Advisor::new(date());
        let store = ContextStore::new();
        let a = advisor.respond("You are a strategist.", "plan for next year", &store);
        let b = advisor.respond("", "plan for next year", &store);
        assert_eq!(a, b);
    }
}
