use std::collections::HashMap;

use strokemap_core::{AnalysisProfile, Hospital, TierPolicy};

use crate::analyses::{self, DistanceBand, TransferEstimate};
use crate::filters::HospitalPredicate;
use crate::index::{DistanceRecord, NearestFacilityIndex};
use crate::scoring::{self, ScoredCandidate};
use crate::AnalyticsError;

/// The session's working set and everything derived from it.
///
/// Built once after the dataset loads; read-only afterwards. Every analysis
/// borrows from here instead of recomputing distances.
#[derive(Debug, Clone)]
pub struct AnalysisContext {
    hospitals: Vec<Hospital>,
    positions: HashMap<String, usize>,
    index: NearestFacilityIndex,
    profile: AnalysisProfile,
    reference: Option<usize>,
}

impl AnalysisContext {
    #[must_use]
    pub fn build(hospitals: Vec<Hospital>, profile: AnalysisProfile) -> Self {
        let positions = hospitals
            .iter()
            .enumerate()
            .map(|(i, h)| (h.cms_id.clone(), i))
            .collect();
        let index = NearestFacilityIndex::build(&hospitals, &profile.tiers);

        let reference = hospitals
            .iter()
            .position(|h| profile.reference_facility.matches(h));
        match reference {
            Some(i) => tracing::debug!(
                cms_id = %hospitals[i].cms_id,
                name = %hospitals[i].name,
                "reference facility resolved"
            ),
            None => tracing::warn!(
                reference = %profile.reference_facility.describe(),
                "reference facility not in dataset; transfer estimates unavailable"
            ),
        }

        Self {
            hospitals,
            positions,
            index,
            profile,
            reference,
        }
    }

    #[must_use]
    pub fn hospitals(&self) -> &[Hospital] {
        &self.hospitals
    }

    #[must_use]
    pub fn index(&self) -> &NearestFacilityIndex {
        &self.index
    }

    #[must_use]
    pub fn profile(&self) -> &AnalysisProfile {
        &self.profile
    }

    #[must_use]
    pub fn policy(&self) -> &TierPolicy {
        &self.profile.tiers
    }

    /// Look up a hospital by `cmsId`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::UnknownHospital`] if no such hospital is loaded.
    pub fn hospital(&self, cms_id: &str) -> Result<&Hospital, AnalyticsError> {
        self.positions
            .get(cms_id)
            .map(|&i| &self.hospitals[i])
            .ok_or_else(|| AnalyticsError::UnknownHospital(cms_id.to_string()))
    }

    /// Distance record for `cmsId`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::UnknownHospital`] if no such hospital is loaded.
    pub fn record(&self, cms_id: &str) -> Result<&DistanceRecord, AnalyticsError> {
        self.index
            .get(cms_id)
            .ok_or_else(|| AnalyticsError::UnknownHospital(cms_id.to_string()))
    }

    #[must_use]
    pub fn reference_facility(&self) -> Option<&Hospital> {
        self.reference.map(|i| &self.hospitals[i])
    }

    /// Rank the whole working set.
    #[must_use]
    pub fn rank_candidates(&self) -> Vec<ScoredCandidate<'_>> {
        self.rank(&self.hospitals)
    }

    /// Rank a subset of the working set (e.g. one state).
    pub fn rank<'a, I>(&'a self, hospitals: I) -> Vec<ScoredCandidate<'a>>
    where
        I: IntoIterator<Item = &'a Hospital>,
    {
        scoring::rank_candidates(hospitals, &self.index, &self.profile.tiers)
    }

    #[must_use]
    pub fn expansion_score(&self, hospital: &Hospital) -> Option<i32> {
        self.index
            .get(&hospital.cms_id)
            .map(|record| scoring::expansion_score(hospital, record, &self.profile.tiers))
    }

    #[must_use]
    pub fn is_evt_desert(&self, hospital: &Hospital) -> bool {
        self.index
            .get(&hospital.cms_id)
            .is_some_and(analyses::is_evt_desert)
    }

    #[must_use]
    pub fn is_zero_capability(&self, hospital: &Hospital) -> bool {
        analyses::is_zero_capability(hospital)
    }

    #[must_use]
    pub fn distance_band(&self, hospital: &Hospital) -> DistanceBand {
        DistanceBand::classify(
            self.index
                .get(&hospital.cms_id)
                .and_then(DistanceRecord::nearest_advanced_distance),
        )
    }

    /// Transfer estimate to the reference facility; `None` when the
    /// reference is missing from the dataset or is `hospital` itself.
    #[must_use]
    pub fn transfer_estimate(&self, hospital: &Hospital) -> Option<TransferEstimate> {
        let reference = self.reference_facility()?;
        analyses::transfer_estimate(hospital, reference)
    }

    #[must_use]
    pub fn evt_deserts(&self) -> Vec<&Hospital> {
        self.hospitals
            .iter()
            .filter(|h| self.is_evt_desert(h))
            .collect()
    }

    #[must_use]
    pub fn zero_capability(&self) -> Vec<&Hospital> {
        self.hospitals
            .iter()
            .filter(|h| analyses::is_zero_capability(h))
            .collect()
    }

    /// Hospitals matching `predicate`, in dataset order.
    pub fn select<P>(&self, predicate: &P) -> Vec<&Hospital>
    where
        P: HospitalPredicate + ?Sized,
    {
        self.hospitals
            .iter()
            .filter(|h| {
                self.index
                    .get(&h.cms_id)
                    .is_some_and(|record| predicate.matches(h, record))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{certified, evt_center, hospital, lat_for_miles};
    use strokemap_core::{CertificationTier, ReferenceFacility};

    fn harborview() -> Hospital {
        Hospital {
            name: "HARBORVIEW MEDICAL CENTER".to_string(),
            uw_partner: true,
            ..evt_center("500064", 47.6, -122.3)
        }
    }

    fn sample() -> AnalysisContext {
        let hospitals = vec![
            harborview(),
            hospital("rural", 47.6 + lat_for_miles(150.0), -122.3),
            certified("psc", 47.6 + lat_for_miles(30.0), -122.3, CertificationTier::Primary),
        ];
        AnalysisContext::build(hospitals, AnalysisProfile::default())
    }

    #[test]
    fn lookups_by_cms_id() {
        let ctx = sample();
        assert_eq!(ctx.hospital("psc").unwrap().cms_id, "psc");
        assert!(ctx.record("rural").is_ok());
        assert!(matches!(
            ctx.hospital("missing"),
            Err(AnalyticsError::UnknownHospital(ref id)) if id == "missing"
        ));
        assert!(ctx.record("missing").is_err());
    }

    #[test]
    fn resolves_reference_by_default_name() {
        let ctx = sample();
        assert_eq!(ctx.reference_facility().unwrap().cms_id, "500064");
    }

    #[test]
    fn transfer_estimates_skip_reference_itself() {
        let ctx = sample();
        let hmc = ctx.hospital("500064").unwrap();
        assert!(ctx.transfer_estimate(hmc).is_none());
        let rural = ctx.hospital("rural").unwrap();
        let estimate = ctx.transfer_estimate(rural).unwrap();
        assert_eq!(estimate.ground_minutes, 150);
        assert_eq!(estimate.air_minutes, 60);
    }

    #[test]
    fn missing_reference_degrades_to_no_estimates() {
        let profile = AnalysisProfile {
            reference_facility: ReferenceFacility {
                name: None,
                cms_id: Some("does-not-exist".to_string()),
            },
            ..AnalysisProfile::default()
        };
        let ctx = AnalysisContext::build(vec![harborview(), hospital("a", 46.0, -120.0)], profile);
        assert!(ctx.reference_facility().is_none());
        assert!(ctx
            .hospitals()
            .iter()
            .all(|h| ctx.transfer_estimate(h).is_none()));
    }

    #[test]
    fn deserts_and_zero_capability_sets() {
        let ctx = sample();
        let deserts: Vec<&str> = ctx.evt_deserts().iter().map(|h| h.cms_id.as_str()).collect();
        // Harborview is the only EVT center, so it has no other EVT center at all.
        assert_eq!(deserts, vec!["500064", "rural"]);
        let zero: Vec<&str> = ctx
            .zero_capability()
            .iter()
            .map(|h| h.cms_id.as_str())
            .collect();
        assert_eq!(zero, vec!["rural"]);
    }

    #[test]
    fn bands_and_scores_read_from_index() {
        let ctx = sample();
        let rural = ctx.hospital("rural").unwrap();
        assert_eq!(ctx.distance_band(rural), DistanceBand::High);
        assert_eq!(ctx.expansion_score(rural), Some(8));
        let psc = ctx.hospital("psc").unwrap();
        assert_eq!(ctx.distance_band(psc), DistanceBand::Low);
        // non-partner +2, partial tier -1
        assert_eq!(ctx.expansion_score(psc), Some(1));
    }

    #[test]
    fn ranking_whole_set_puts_rural_first() {
        let ctx = sample();
        let ranked = ctx.rank_candidates();
        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].hospital.cms_id, "rural");
    }
}
