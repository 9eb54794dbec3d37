use strokemap_analytics::{distance_matrix, referral_pathways, AnalysisContext, MatrixSort};

use super::{fmt_flag, fmt_miles, fmt_tier, print_json, truncate, NAME_WIDTH};

/// Print the hospital-to-center distance matrix.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub(crate) fn run_matrix(ctx: &AnalysisContext, sort: MatrixSort, json: bool) -> anyhow::Result<()> {
    let rows = distance_matrix(ctx, sort);
    if json {
        return print_json(&rows);
    }

    println!(
        "{:<42}{:<4}{:<6}{:<9}{:<32}{:<9}{:<32}EVT MI",
        "NAME", "ST", "TIER", "PARTNER", "NEAREST ADVANCED", "ADV MI", "NEAREST EVT"
    );
    for row in &rows {
        let h = row.hospital;
        println!(
            "{:<42}{:<4}{:<6}{:<9}{:<32}{:<9}{:<32}{}",
            truncate(&h.name, NAME_WIDTH),
            h.state,
            fmt_tier(h.tier()),
            fmt_flag(h.uw_partner),
            truncate(row.nearest_advanced.unwrap_or("N/A"), 28),
            fmt_miles(row.advanced_miles),
            truncate(row.nearest_evt.unwrap_or("N/A"), 28),
            fmt_miles(row.evt_miles)
        );
    }
    Ok(())
}

/// Print referral links from each hospital to its nearest advanced center.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub(crate) fn run_pathways(ctx: &AnalysisContext, json: bool) -> anyhow::Result<()> {
    let pathways = referral_pathways(ctx);
    if json {
        return print_json(&pathways);
    }
    if pathways.is_empty() {
        println!("no referral pathways; the working set has no advanced centers");
        return Ok(());
    }

    println!("{:<42}{:<42}{:<9}BAND", "FROM", "TO", "MILES");
    for pathway in &pathways {
        println!(
            "{:<42}{:<42}{:<9.1}{}",
            truncate(&pathway.from.name, NAME_WIDTH),
            truncate(&pathway.to.name, NAME_WIDTH),
            pathway.miles,
            pathway.band.label()
        );
    }
    Ok(())
}

/// Print the transfer estimate from `cms_id` to the reference facility.
///
/// # Errors
///
/// Returns an error if the hospital is unknown or the reference facility is
/// not in the dataset.
pub(crate) fn run_transfer(ctx: &AnalysisContext, cms_id: &str) -> anyhow::Result<()> {
    let hospital = ctx.hospital(cms_id)?;
    let reference = ctx.reference_facility().ok_or_else(|| {
        anyhow::anyhow!(
            "reference facility {} is not in the dataset; transfer estimates unavailable",
            ctx.profile().reference_facility.describe()
        )
    })?;

    let Some(estimate) = ctx.transfer_estimate(hospital) else {
        println!("{} is the reference facility", hospital.name);
        return Ok(());
    };

    println!("From:        {} ({})", hospital.name, hospital.cms_id);
    println!("To:          {} ({})", reference.name, reference.cms_id);
    println!("Distance:    {:.1} mi (straight line)", estimate.distance_miles);
    println!("Ground:      ~{} min", estimate.ground_minutes);
    println!("Air:         ~{} min", estimate.air_minutes);
    Ok(())
}
