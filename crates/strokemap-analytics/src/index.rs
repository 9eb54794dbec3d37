//! Nearest-facility index: for every hospital, the closest advanced center
//! and the closest round-the-clock EVT center, computed once.
//!
//! A hospital is never its own nearest neighbor. Self-membership in a
//! category is tagged explicitly (see [`Proximity::Member`]) instead of
//! being inferred from a zero or infinite distance.

use std::collections::HashMap;

use serde::Serialize;
use strokemap_core::{Hospital, TierPolicy};

use crate::distance::great_circle_distance;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearestFacility {
    pub cms_id: String,
    pub name: String,
    pub miles: f64,
}

/// Relationship between a hospital and one facility category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Proximity {
    /// The hospital is outside the category; this is the closest member.
    Nearest(NearestFacility),
    /// The hospital itself belongs to the category. `nearest_other` is the
    /// closest other member, if any.
    Member {
        nearest_other: Option<NearestFacility>,
    },
    /// No qualifying facility exists in the working set.
    Unreachable,
}

impl Proximity {
    /// Closest qualifying facility other than the subject.
    #[must_use]
    pub fn nearest(&self) -> Option<&NearestFacility> {
        match self {
            Proximity::Nearest(facility) => Some(facility),
            Proximity::Member { nearest_other } => nearest_other.as_ref(),
            Proximity::Unreachable => None,
        }
    }

    /// Self-excluded distance; `None` means no other facility (infinitely far).
    #[must_use]
    pub fn miles(&self) -> Option<f64> {
        self.nearest().map(|f| f.miles)
    }

    /// Whether the self-excluded distance is strictly beyond `threshold`.
    /// An absent distance is beyond every threshold.
    #[must_use]
    pub fn exceeds(&self, threshold: f64) -> bool {
        self.miles().is_none_or(|miles| miles > threshold)
    }

    #[must_use]
    pub fn is_member(&self) -> bool {
        matches!(self, Proximity::Member { .. })
    }

    /// Distance for display and threshold filters: `None` ("N/A") for
    /// members and for unreachable categories.
    #[must_use]
    pub fn applicable_miles(&self) -> Option<f64> {
        match self {
            Proximity::Nearest(facility) => Some(facility.miles),
            Proximity::Member { .. } | Proximity::Unreachable => None,
        }
    }

    fn resolve(nearest: Option<NearestFacility>, is_member: bool) -> Self {
        match (nearest, is_member) {
            (nearest_other, true) => Proximity::Member { nearest_other },
            (Some(facility), false) => Proximity::Nearest(facility),
            (None, false) => Proximity::Unreachable,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistanceRecord {
    pub advanced: Proximity,
    pub evt: Proximity,
}

impl DistanceRecord {
    #[must_use]
    pub fn nearest_advanced_distance(&self) -> Option<f64> {
        self.advanced.miles()
    }

    #[must_use]
    pub fn nearest_advanced(&self) -> Option<&NearestFacility> {
        self.advanced.nearest()
    }

    #[must_use]
    pub fn nearest_evt_distance(&self) -> Option<f64> {
        self.evt.miles()
    }

    #[must_use]
    pub fn nearest_evt(&self) -> Option<&NearestFacility> {
        self.evt.nearest()
    }
}

/// Precomputed [`DistanceRecord`] per `cmsId`.
#[derive(Debug, Clone, Default)]
pub struct NearestFacilityIndex {
    records: HashMap<String, DistanceRecord>,
    advanced_centers: usize,
    evt_centers: usize,
}

impl NearestFacilityIndex {
    /// Brute-force O(N·M) scan of each category subset. Fine for the
    /// low-hundreds of hospitals and tens of centers this targets.
    #[must_use]
    pub fn build(hospitals: &[Hospital], policy: &TierPolicy) -> Self {
        let advanced: Vec<&Hospital> = hospitals
            .iter()
            .filter(|h| policy.is_advanced_center(h))
            .collect();
        let evt: Vec<&Hospital> = hospitals.iter().filter(|h| h.has_elvo).collect();

        let records: HashMap<String, DistanceRecord> = hospitals
            .iter()
            .map(|hospital| {
                let record = DistanceRecord {
                    advanced: Proximity::resolve(
                        nearest_excluding_self(hospital, &advanced),
                        policy.is_advanced_center(hospital),
                    ),
                    evt: Proximity::resolve(
                        nearest_excluding_self(hospital, &evt),
                        hospital.has_elvo,
                    ),
                };
                (hospital.cms_id.clone(), record)
            })
            .collect();

        tracing::info!(
            hospitals = records.len(),
            advanced_centers = advanced.len(),
            evt_centers = evt.len(),
            "nearest-facility index built"
        );
        if advanced.is_empty() {
            tracing::warn!("no advanced centers in working set; all advanced distances are absent");
        }
        if evt.is_empty() {
            tracing::warn!("no EVT centers in working set; all EVT distances are absent");
        }

        Self {
            records,
            advanced_centers: advanced.len(),
            evt_centers: evt.len(),
        }
    }

    #[must_use]
    pub fn get(&self, cms_id: &str) -> Option<&DistanceRecord> {
        self.records.get(cms_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn advanced_center_count(&self) -> usize {
        self.advanced_centers
    }

    #[must_use]
    pub fn evt_center_count(&self) -> usize {
        self.evt_centers
    }
}

/// Closest candidate other than `subject`; ties keep the earlier candidate.
fn nearest_excluding_self(subject: &Hospital, candidates: &[&Hospital]) -> Option<NearestFacility> {
    let mut best: Option<(&Hospital, f64)> = None;
    for &candidate in candidates {
        if candidate.cms_id == subject.cms_id {
            continue;
        }
        let miles = great_circle_distance(
            subject.latitude,
            subject.longitude,
            candidate.latitude,
            candidate.longitude,
        );
        if best.is_none_or(|(_, best_miles)| miles < best_miles) {
            best = Some((candidate, miles));
        }
    }
    best.map(|(facility, miles)| NearestFacility {
        cms_id: facility.cms_id.clone(),
        name: facility.name.clone(),
        miles,
    })
}

#[cfg(test)]
#[path = "index_test.rs"]
mod tests;
