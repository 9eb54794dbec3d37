//! Expansion-priority scoring.
//!
//! The score is a plain additive rule so every point in the output can be
//! traced back to one attribute:
//!
//! | condition                                   | points |
//! |---------------------------------------------|--------|
//! | no certification tier                       | +3     |
//! | not a network partner                       | +2     |
//! | nearest advanced center > 75 mi             | +2     |
//! | nearest EVT center > 100 mi                 | +1     |
//! | holds one of the partial-capability tiers   | −1     |
//!
//! An absent distance (no other qualifying facility) counts as infinitely far.

use serde::Serialize;
use strokemap_core::{Hospital, TierPolicy};

use crate::index::{DistanceRecord, NearestFacilityIndex};

pub const NO_CERTIFICATION_POINTS: i32 = 3;
pub const NON_PARTNER_POINTS: i32 = 2;
pub const ADVANCED_GAP_POINTS: i32 = 2;
pub const ADVANCED_GAP_MILES: f64 = 75.0;
pub const EVT_GAP_POINTS: i32 = 1;
pub const EVT_GAP_MILES: f64 = 100.0;
pub const PARTIAL_CAPABILITY_PENALTY: i32 = 1;

#[must_use]
pub fn expansion_score(hospital: &Hospital, record: &DistanceRecord, policy: &TierPolicy) -> i32 {
    let mut score = 0;
    if !hospital.is_certified() {
        score += NO_CERTIFICATION_POINTS;
    }
    if !hospital.uw_partner {
        score += NON_PARTNER_POINTS;
    }
    if record.advanced.exceeds(ADVANCED_GAP_MILES) {
        score += ADVANCED_GAP_POINTS;
    }
    if record.evt.exceeds(EVT_GAP_MILES) {
        score += EVT_GAP_POINTS;
    }
    if policy.is_partial(hospital.tier()) {
        score -= PARTIAL_CAPABILITY_PENALTY;
    }
    score
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoredCandidate<'a> {
    pub hospital: &'a Hospital,
    pub score: i32,
    pub advanced_miles: Option<f64>,
    pub evt_miles: Option<f64>,
}

/// Score `hospitals` and order them by descending score. The sort is
/// stable, so equal scores keep their input order.
///
/// Hospitals without an index record are skipped with a warning; that only
/// happens when `hospitals` did not come from the indexed working set.
pub fn rank_candidates<'a, I>(
    hospitals: I,
    index: &NearestFacilityIndex,
    policy: &TierPolicy,
) -> Vec<ScoredCandidate<'a>>
where
    I: IntoIterator<Item = &'a Hospital>,
{
    let mut scored: Vec<ScoredCandidate<'a>> = hospitals
        .into_iter()
        .filter_map(|hospital| {
            let Some(record) = index.get(&hospital.cms_id) else {
                tracing::warn!(cms_id = %hospital.cms_id, "hospital missing from index; not ranked");
                return None;
            };
            Some(ScoredCandidate {
                hospital,
                score: expansion_score(hospital, record, policy),
                advanced_miles: record.nearest_advanced_distance(),
                evt_miles: record.nearest_evt_distance(),
            })
        })
        .collect();

    scored.sort_by(|left, right| right.score.cmp(&left.score));
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{NearestFacility, Proximity};
    use crate::test_support::{certified, evt_center, hospital, lat_for_miles};
    use strokemap_core::CertificationTier;

    fn at(miles: f64) -> Proximity {
        Proximity::Nearest(NearestFacility {
            cms_id: "x".to_string(),
            name: "X".to_string(),
            miles,
        })
    }

    fn record(advanced: f64, evt: f64) -> DistanceRecord {
        DistanceRecord {
            advanced: at(advanced),
            evt: at(evt),
        }
    }

    #[test]
    fn uncertified_remote_non_partner_scores_eight() {
        let h = hospital("1", 47.0, -122.0);
        let score = expansion_score(&h, &record(80.0, 120.0), &TierPolicy::default());
        assert_eq!(score, 8);
    }

    #[test]
    fn primary_partner_close_to_care_scores_minus_one() {
        let h = Hospital {
            uw_partner: true,
            ..certified("1", 47.0, -122.0, CertificationTier::Primary)
        };
        let score = expansion_score(&h, &record(10.0, 30.0), &TierPolicy::default());
        assert_eq!(score, -1);
    }

    #[test]
    fn thresholds_are_strict() {
        let h = Hospital {
            uw_partner: true,
            ..certified("1", 47.0, -122.0, CertificationTier::Comprehensive)
        };
        let policy = TierPolicy::default();
        assert_eq!(expansion_score(&h, &record(75.0, 100.0), &policy), 0);
        assert_eq!(expansion_score(&h, &record(75.1, 100.0), &policy), 2);
        assert_eq!(expansion_score(&h, &record(75.0, 100.1), &policy), 1);
    }

    #[test]
    fn absent_distances_count_as_far() {
        let h = Hospital {
            uw_partner: true,
            ..certified("1", 47.0, -122.0, CertificationTier::Comprehensive)
        };
        let record = DistanceRecord {
            advanced: Proximity::Member {
                nearest_other: None,
            },
            evt: Proximity::Unreachable,
        };
        assert_eq!(expansion_score(&h, &record, &TierPolicy::default()), 3);
    }

    #[test]
    fn acute_stroke_ready_also_takes_penalty() {
        let h = certified("1", 47.0, -122.0, CertificationTier::AcuteStrokeReady);
        // non-partner +2, far from both +3, partial -1
        let score = expansion_score(&h, &record(200.0, 200.0), &TierPolicy::default());
        assert_eq!(score, 4);
    }

    #[test]
    fn ranking_is_descending_and_stable() {
        let hospitals = vec![
            Hospital {
                uw_partner: true,
                ..certified("csc", 47.0, -122.0, CertificationTier::Comprehensive)
            },
            hospital("first", 47.0 + lat_for_miles(10.0), -122.0),
            evt_center("evt", 47.0 + lat_for_miles(5.0), -122.0),
            hospital("second", 47.0 - lat_for_miles(10.0), -122.0),
            hospital("remote", 47.0 + lat_for_miles(300.0), -122.0),
        ];
        let policy = TierPolicy::default();
        let index = NearestFacilityIndex::build(&hospitals, &policy);
        let ranked = rank_candidates(&hospitals, &index, &policy);

        let order: Vec<&str> = ranked.iter().map(|c| c.hospital.cms_id.as_str()).collect();
        assert_eq!(order[0], "remote");
        let first = order.iter().position(|id| *id == "first").unwrap();
        let second = order.iter().position(|id| *id == "second").unwrap();
        assert!(first < second, "equal scores must keep input order: {order:?}");
        assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn candidate_carries_both_distances() {
        let hospitals = vec![
            evt_center("evt", 47.0, -122.0),
            hospital("subject", 47.0 + lat_for_miles(60.0), -122.0),
        ];
        let policy = TierPolicy::default();
        let index = NearestFacilityIndex::build(&hospitals, &policy);
        let ranked = rank_candidates(&hospitals[1..], &index, &policy);
        assert_eq!(ranked.len(), 1);
        let candidate = &ranked[0];
        assert!((candidate.advanced_miles.unwrap() - 60.0).abs() < 1e-6);
        assert!((candidate.evt_miles.unwrap() - 60.0).abs() < 1e-6);
        assert_eq!(candidate.score, 5);
    }

    #[test]
    fn hospitals_outside_index_are_skipped() {
        let indexed = vec![hospital("1", 47.0, -122.0)];
        let policy = TierPolicy::default();
        let index = NearestFacilityIndex::build(&indexed, &policy);
        let stranger = hospital("2", 46.0, -121.0);
        assert!(rank_candidates([&stranger], &index, &policy).is_empty());
    }
}
