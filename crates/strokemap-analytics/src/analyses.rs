//! Derived classifications over a hospital and its precomputed
//! [`DistanceRecord`]. None of these touch the index build.

use serde::Serialize;
use strokemap_core::Hospital;

use crate::distance::great_circle_distance;
use crate::index::DistanceRecord;

/// A hospital farther than this from any EVT center is an EVT desert.
pub const EVT_DESERT_MILES: f64 = 100.0;

pub const GROUND_SPEED_MPH: f64 = 60.0;
pub const AIR_SPEED_MPH: f64 = 150.0;

/// Strictly more than 100 miles from the nearest EVT center.
#[must_use]
pub fn is_evt_desert(record: &DistanceRecord) -> bool {
    record.evt.exceeds(EVT_DESERT_MILES)
}

/// No certification tier and no network partnership.
#[must_use]
pub fn is_zero_capability(hospital: &Hospital) -> bool {
    !hospital.is_certified() && !hospital.uw_partner
}

/// Severity tier for distance to the nearest advanced center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceBand {
    /// Under 50 miles.
    Low,
    /// 50 to 100 miles inclusive.
    Moderate,
    /// Over 100 miles, or no facility at all.
    High,
}

impl DistanceBand {
    #[must_use]
    pub fn classify(miles: Option<f64>) -> Self {
        match miles {
            Some(m) if m < 50.0 => DistanceBand::Low,
            Some(m) if m <= 100.0 => DistanceBand::Moderate,
            _ => DistanceBand::High,
        }
    }

    #[must_use]
    pub fn for_record(record: &DistanceRecord) -> Self {
        Self::classify(record.nearest_advanced_distance())
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            DistanceBand::Low => "<50 mi",
            DistanceBand::Moderate => "50-100 mi",
            DistanceBand::High => ">100 mi",
        }
    }
}

/// Four-step band used when drawing referral pathways.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferralBand {
    Short,
    Medium,
    Long,
    Remote,
}

impl ReferralBand {
    #[must_use]
    pub fn classify(miles: f64) -> Self {
        if miles < 50.0 {
            ReferralBand::Short
        } else if miles <= 100.0 {
            ReferralBand::Medium
        } else if miles <= 150.0 {
            ReferralBand::Long
        } else {
            ReferralBand::Remote
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ReferralBand::Short => "<50 mi",
            ReferralBand::Medium => "50-100 mi",
            ReferralBand::Long => "100-150 mi",
            ReferralBand::Remote => ">150 mi",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TransferEstimate {
    pub distance_miles: f64,
    pub ground_minutes: u32,
    pub air_minutes: u32,
}

/// Straight-line transfer estimate to the reference facility. `None` when
/// the subject is the reference facility itself.
#[must_use]
pub fn transfer_estimate(hospital: &Hospital, reference: &Hospital) -> Option<TransferEstimate> {
    if hospital.cms_id == reference.cms_id {
        return None;
    }
    let distance_miles = great_circle_distance(
        hospital.latitude,
        hospital.longitude,
        reference.latitude,
        reference.longitude,
    );
    Some(TransferEstimate {
        distance_miles,
        ground_minutes: round_to_five_minutes(distance_miles / GROUND_SPEED_MPH * 60.0),
        air_minutes: round_to_five_minutes(distance_miles / AIR_SPEED_MPH * 60.0),
    })
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // non-negative, far below u32::MAX
fn round_to_five_minutes(minutes: f64) -> u32 {
    ((minutes / 5.0).round() * 5.0) as u32
}
