use serde::Serialize;
use strokemap_analytics::{AnalysisContext, DistanceBand, NearestFacility, ScoredCandidate};
use strokemap_core::Hospital;

use super::{fmt_flag, fmt_miles, fmt_tier, print_json, truncate, NAME_WIDTH};

/// Print the top `top` expansion candidates, optionally limited to one state.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub(crate) fn run_rank(
    ctx: &AnalysisContext,
    top: usize,
    state: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let mut ranked = match state {
        Some(state) => ctx.rank(
            ctx.hospitals()
                .iter()
                .filter(|h| h.state.eq_ignore_ascii_case(state.trim())),
        ),
        None => ctx.rank_candidates(),
    };
    ranked.truncate(top);

    if json {
        return print_json(&ranked);
    }
    if ranked.is_empty() {
        println!(
            "no hospitals to rank{}",
            state.map(|s| format!(" in state {s}")).unwrap_or_default()
        );
        return Ok(());
    }
    for line in rank_table(&ranked) {
        println!("{line}");
    }
    Ok(())
}

fn rank_table(ranked: &[ScoredCandidate<'_>]) -> Vec<String> {
    let mut lines = vec![format!(
        "{:<5}{:<7}{:<9}{:<4}{:<6}{:<9}{:<9}{:<9}NAME",
        "#", "SCORE", "CMS ID", "ST", "TIER", "PARTNER", "ADV MI", "EVT MI"
    )];
    for (position, candidate) in ranked.iter().enumerate() {
        let h = candidate.hospital;
        lines.push(format!(
            "{:<5}{:<7}{:<9}{:<4}{:<6}{:<9}{:<9}{:<9}{}",
            position + 1,
            candidate.score,
            h.cms_id,
            h.state,
            fmt_tier(h.tier()),
            fmt_flag(h.uw_partner),
            fmt_miles(candidate.advanced_miles),
            fmt_miles(candidate.evt_miles),
            truncate(&h.name, NAME_WIDTH)
        ));
    }
    lines
}

#[derive(Debug, Serialize)]
struct DesertRow<'a> {
    hospital: &'a Hospital,
    nearest_evt: Option<&'a NearestFacility>,
}

/// Print every EVT desert with its nearest EVT center, if any.
///
/// # Errors
///
/// Returns an error if a hospital is missing from the index or JSON
/// serialization fails.
pub(crate) fn run_deserts(ctx: &AnalysisContext, json: bool) -> anyhow::Result<()> {
    let mut rows = Vec::new();
    for hospital in ctx.evt_deserts() {
        let record = ctx.record(&hospital.cms_id)?;
        rows.push(DesertRow {
            hospital,
            nearest_evt: record.nearest_evt(),
        });
    }

    if json {
        return print_json(&rows);
    }
    println!(
        "{} of {} hospitals are more than 100 miles from an EVT center",
        rows.len(),
        ctx.hospitals().len()
    );
    if rows.is_empty() {
        return Ok(());
    }
    println!();
    println!("{:<9}{:<4}{:<9}{:<42}NEAREST EVT", "CMS ID", "ST", "EVT MI", "NAME");
    for row in &rows {
        let h = row.hospital;
        println!(
            "{:<9}{:<4}{:<9}{:<42}{}",
            h.cms_id,
            h.state,
            fmt_miles(row.nearest_evt.map(|f| f.miles)),
            truncate(&h.name, NAME_WIDTH),
            row.nearest_evt.map_or("none", |f| f.name.as_str())
        );
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct GapRow<'a> {
    hospital: &'a Hospital,
    advanced_miles: Option<f64>,
    band: DistanceBand,
    score: Option<i32>,
}

/// Print hospitals with neither certification nor partnership, the primary
/// outreach targets.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub(crate) fn run_zero_capability(ctx: &AnalysisContext, json: bool) -> anyhow::Result<()> {
    let rows: Vec<GapRow<'_>> = ctx
        .zero_capability()
        .into_iter()
        .map(|hospital| GapRow {
            hospital,
            advanced_miles: ctx
                .index()
                .get(&hospital.cms_id)
                .and_then(strokemap_analytics::DistanceRecord::nearest_advanced_distance),
            band: ctx.distance_band(hospital),
            score: ctx.expansion_score(hospital),
        })
        .collect();

    if json {
        return print_json(&rows);
    }
    println!(
        "{} hospitals have no stroke certification and no network partnership",
        rows.len()
    );
    if rows.is_empty() {
        return Ok(());
    }
    println!();
    println!(
        "{:<9}{:<4}{:<7}{:<9}{:<11}NAME",
        "CMS ID", "ST", "SCORE", "ADV MI", "BAND"
    );
    for row in &rows {
        let h = row.hospital;
        println!(
            "{:<9}{:<4}{:<7}{:<9}{:<11}{}",
            h.cms_id,
            h.state,
            row.score.map_or_else(|| "-".to_string(), |s| s.to_string()),
            fmt_miles(row.advanced_miles),
            row.band.label(),
            truncate(&h.name, NAME_WIDTH)
        );
    }
    Ok(())
}
