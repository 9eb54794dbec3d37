use serde::Serialize;
use strokemap_core::Hospital;

use crate::analyses::ReferralBand;
use crate::AnalysisContext;

/// Straight-line link from a hospital to its nearest advanced center.
#[derive(Debug, Clone, Serialize)]
pub struct ReferralPathway<'a> {
    pub from: &'a Hospital,
    pub to: &'a Hospital,
    pub miles: f64,
    pub band: ReferralBand,
}

/// One pathway per hospital that is not itself an advanced center and has
/// an advanced center to refer to. Dataset order.
#[must_use]
pub fn referral_pathways(ctx: &AnalysisContext) -> Vec<ReferralPathway<'_>> {
    let policy = ctx.policy();
    ctx.hospitals()
        .iter()
        .filter(|h| !policy.is_advanced_center(h))
        .filter_map(|from| {
            let nearest = ctx.index().get(&from.cms_id)?.nearest_advanced()?;
            let to = ctx.hospital(&nearest.cms_id).ok()?;
            Some(ReferralPathway {
                from,
                to,
                miles: nearest.miles,
                band: ReferralBand::classify(nearest.miles),
            })
        })
        .collect()
}
