use std::collections::BTreeMap;

use serde::Serialize;
use strokemap_core::CertificationTier;

use crate::analyses::{self, DistanceBand};
use crate::scoring::ScoredCandidate;
use crate::AnalysisContext;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BandCounts {
    pub low: usize,
    pub moderate: usize,
    pub high: usize,
}

impl BandCounts {
    fn add(&mut self, band: DistanceBand) {
        match band {
            DistanceBand::Low => self.low += 1,
            DistanceBand::Moderate => self.moderate += 1,
            DistanceBand::High => self.high += 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateCoverage {
    pub state: String,
    pub hospitals: usize,
    pub certified: usize,
    pub partners: usize,
}

/// Network-wide coverage figures for the executive summary.
#[derive(Debug, Clone, Serialize)]
pub struct CoverageSummary<'a> {
    pub total: usize,
    pub partners: usize,
    pub certified: usize,
    pub tier_counts: BTreeMap<CertificationTier, usize>,
    pub evt_capable: usize,
    pub no_certification: usize,
    pub not_partner: usize,
    pub evt_deserts: usize,
    pub zero_capability: usize,
    pub bands: BandCounts,
    pub states: Vec<StateCoverage>,
    pub top: Vec<ScoredCandidate<'a>>,
}

impl<'a> CoverageSummary<'a> {
    #[must_use]
    pub fn compute(ctx: &'a AnalysisContext, top_n: usize) -> Self {
        let hospitals = ctx.hospitals();

        let mut summary = Self {
            total: hospitals.len(),
            partners: 0,
            certified: 0,
            tier_counts: BTreeMap::new(),
            evt_capable: 0,
            no_certification: 0,
            not_partner: 0,
            evt_deserts: 0,
            zero_capability: 0,
            bands: BandCounts::default(),
            states: Vec::new(),
            top: Vec::new(),
        };

        for hospital in hospitals {
            if hospital.uw_partner {
                summary.partners += 1;
            } else {
                summary.not_partner += 1;
            }
            match hospital.tier() {
                Some(tier) => {
                    summary.certified += 1;
                    *summary.tier_counts.entry(tier).or_insert(0) += 1;
                }
                None => summary.no_certification += 1,
            }
            if hospital.has_elvo {
                summary.evt_capable += 1;
            }
            if analyses::is_zero_capability(hospital) {
                summary.zero_capability += 1;
            }
            if ctx.is_evt_desert(hospital) {
                summary.evt_deserts += 1;
            }
            summary.bands.add(ctx.distance_band(hospital));
        }

        summary.states = ctx
            .profile()
            .states_of_interest
            .iter()
            .map(|state| {
                let in_state = hospitals.iter().filter(|h| h.state.eq_ignore_ascii_case(state.trim()));
                let mut coverage = StateCoverage {
                    state: state.trim().to_uppercase(),
                    hospitals: 0,
                    certified: 0,
                    partners: 0,
                };
                for h in in_state {
                    coverage.hospitals += 1;
                    coverage.certified += usize::from(h.is_certified());
                    coverage.partners += usize::from(h.uw_partner);
                }
                coverage
            })
            .collect();

        let mut ranked = ctx.rank_candidates();
        ranked.truncate(top_n);
        summary.top = ranked;

        tracing::debug!(
            total = summary.total,
            evt_deserts = summary.evt_deserts,
            zero_capability = summary.zero_capability,
            "coverage summary computed"
        );
        summary
    }

    #[must_use]
    pub fn tier_count(&self, tier: CertificationTier) -> usize {
        self.tier_counts.get(&tier).copied().unwrap_or(0)
    }

    /// `part` as a percentage of all hospitals; zero for an empty dataset.
    #[must_use]
    pub fn percent(&self, part: usize) -> f64 {
        percent(part, self.total)
    }
}

#[allow(clippy::cast_precision_loss)] // hospital counts are far below 2^52
fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    part as f64 * 100.0 / total as f64
}
