use chrono::Utc;
use strokemap_analytics::scoring::{
    ADVANCED_GAP_MILES, ADVANCED_GAP_POINTS, EVT_GAP_MILES, EVT_GAP_POINTS, NON_PARTNER_POINTS,
    NO_CERTIFICATION_POINTS, PARTIAL_CAPABILITY_PENALTY,
};
use strokemap_analytics::{AnalysisContext, CoverageSummary};
use strokemap_core::CertificationTier;

use super::{fmt_miles, truncate, NAME_WIDTH};

/// Print the executive coverage summary with the top `top` expansion targets.
pub(crate) fn run_summary(ctx: &AnalysisContext, top: usize) {
    let summary = CoverageSummary::compute(ctx, top);
    let generated = Utc::now().format("%Y-%m-%d").to_string();
    for line in render(&summary, &generated) {
        println!("{line}");
    }
}

fn render(summary: &CoverageSummary<'_>, generated: &str) -> Vec<String> {
    let share = |count: usize| format!("{count} ({:.1}%)", summary.percent(count));

    let mut lines = vec![
        "Stroke Care Network Executive Summary".to_string(),
        format!("Generated: {generated}"),
        String::new(),
        "Network Overview".to_string(),
        format!("  Total hospitals:        {}", summary.total),
        format!("  Network partners:       {}", share(summary.partners)),
        format!("  Certified:              {}", share(summary.certified)),
        format!("  EVT capable (24/7):     {}", share(summary.evt_capable)),
        String::new(),
        "Certification Tiers".to_string(),
    ];
    for tier in CertificationTier::ALL {
        lines.push(format!(
            "  {:<4}{:<36}{}",
            tier.code(),
            tier.label(),
            summary.tier_count(tier)
        ));
    }

    lines.extend([
        String::new(),
        "Service Gaps".to_string(),
        format!("  No certification:       {}", share(summary.no_certification)),
        format!("  Not a partner:          {}", share(summary.not_partner)),
        format!("  EVT deserts (>100 mi):  {}", share(summary.evt_deserts)),
        format!("  Zero capability:        {}", share(summary.zero_capability)),
        String::new(),
        "Distance to Advanced Care".to_string(),
        format!("  <50 mi:                 {}", share(summary.bands.low)),
        format!("  50-100 mi:              {}", share(summary.bands.moderate)),
        format!("  >100 mi:                {}", share(summary.bands.high)),
        String::new(),
        "States".to_string(),
    ]);
    for state in &summary.states {
        lines.push(format!(
            "  {:<4}{} hospitals, {} certified, {} partners",
            state.state, state.hospitals, state.certified, state.partners
        ));
    }

    lines.push(String::new());
    lines.push(format!("Top {} Expansion Targets", summary.top.len()));
    for (position, candidate) in summary.top.iter().enumerate() {
        lines.push(format!(
            "  {:>2}. {:<42}{:<4}score {:<4}adv {}",
            position + 1,
            truncate(&candidate.hospital.name, NAME_WIDTH),
            candidate.hospital.state,
            candidate.score,
            fmt_miles(candidate.advanced_miles)
        ));
    }

    lines.extend([
        String::new(),
        "Methodology".to_string(),
        "  Distances are great-circle miles between hospital coordinates.".to_string(),
        format!("  +{NO_CERTIFICATION_POINTS} no stroke certification"),
        format!("  +{NON_PARTNER_POINTS} not a network partner"),
        format!("  +{ADVANCED_GAP_POINTS} more than {ADVANCED_GAP_MILES:.0} mi from an advanced center"),
        format!("  +{EVT_GAP_POINTS} more than {EVT_GAP_MILES:.0} mi from an EVT center"),
        format!("  -{PARTIAL_CAPABILITY_PENALTY} partial stroke capability (primary or acute stroke ready)"),
    ]);
    lines
}
