use strokemap_analytics::{
    AnalysisContext, CategoryFilter, DistanceRecord, HospitalFilter, HospitalPredicate, QuickFilter,
};
use strokemap_core::Hospital;

use super::{fmt_flag, fmt_miles, fmt_tier, print_json, truncate, NAME_WIDTH};

/// Everything the `filter` command can narrow by. All parts must match.
#[derive(Debug, Clone, Default)]
pub(crate) struct Selection {
    pub quick: Option<QuickFilter>,
    pub gaps: HospitalFilter,
    pub categories: CategoryFilter,
}

impl HospitalPredicate for Selection {
    fn matches(&self, hospital: &Hospital, record: &DistanceRecord) -> bool {
        self.quick
            .as_ref()
            .is_none_or(|quick| quick.matches(hospital, record))
            && self.gaps.matches(hospital, record)
            && self.categories.matches(hospital, record)
    }
}

/// Print hospitals matching `selection`, in dataset order.
///
/// # Errors
///
/// Returns an error if a hospital is missing from the index or JSON
/// serialization fails.
pub(crate) fn run_filter(
    ctx: &AnalysisContext,
    selection: &Selection,
    json: bool,
) -> anyhow::Result<()> {
    let matches = ctx.select(selection);
    if json {
        return print_json(&matches);
    }

    if let Some(quick) = &selection.quick {
        println!("Quick filter: {quick}");
    }
    println!(
        "{} of {} hospitals match",
        matches.len(),
        ctx.hospitals().len()
    );
    if matches.is_empty() {
        return Ok(());
    }
    println!();
    println!(
        "{:<9}{:<4}{:<6}{:<9}{:<9}{:<9}NAME",
        "CMS ID", "ST", "TIER", "PARTNER", "ADV MI", "EVT MI"
    );
    for h in matches {
        let record = ctx.record(&h.cms_id)?;
        println!(
            "{:<9}{:<4}{:<6}{:<9}{:<9}{:<9}{}",
            h.cms_id,
            h.state,
            fmt_tier(h.tier()),
            fmt_flag(h.uw_partner),
            fmt_miles(record.advanced.applicable_miles()),
            fmt_miles(record.evt.applicable_miles()),
            truncate(&h.name, NAME_WIDTH)
        );
    }
    Ok(())
}
