//! Hospital selection filters.
//!
//! Three flavours, all evaluated against the precomputed index:
//! [`HospitalFilter`] (conjunctive service-gap criteria),
//! [`QuickFilter`] (one-click cohorts), and [`CategoryFilter`]
//! (tier/partner/EVT checkboxes plus free-text search).

use std::str::FromStr;

use strokemap_core::{CertificationTier, Hospital};

use crate::analyses::{is_evt_desert, is_zero_capability};
use crate::index::{DistanceRecord, Proximity};
use crate::AnalyticsError;

pub trait HospitalPredicate {
    fn matches(&self, hospital: &Hospital, record: &DistanceRecord) -> bool;
}

/// Conjunction of service-gap criteria. Unset fields do not filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HospitalFilter {
    pub not_partner: bool,
    pub no_certification: bool,
    pub zero_capability: bool,
    /// Keep hospitals strictly farther than this from an advanced center.
    pub min_advanced_miles: Option<f64>,
    /// Keep hospitals strictly farther than this from an EVT center.
    pub min_evt_miles: Option<f64>,
    pub state: Option<String>,
}

impl HospitalPredicate for HospitalFilter {
    fn matches(&self, hospital: &Hospital, record: &DistanceRecord) -> bool {
        if self.zero_capability && !is_zero_capability(hospital) {
            return false;
        }
        if self.not_partner && hospital.uw_partner {
            return false;
        }
        if self.no_certification && hospital.is_certified() {
            return false;
        }
        if !beyond(&record.advanced, self.min_advanced_miles) {
            return false;
        }
        if !beyond(&record.evt, self.min_evt_miles) {
            return false;
        }
        if let Some(state) = self.state.as_deref() {
            if !hospital.state.eq_ignore_ascii_case(state.trim()) {
                return false;
            }
        }
        true
    }
}

/// A threshold of zero or less disables the check. Otherwise the distance
/// must be known, not a self-membership, and strictly above the threshold.
fn beyond(proximity: &Proximity, threshold: Option<f64>) -> bool {
    match threshold {
        Some(t) if t > 0.0 => proximity.applicable_miles().is_some_and(|miles| miles > t),
        _ => true,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuickFilter {
    State(String),
    NoCertification,
    PartnersOnly,
    EvtDesert,
    /// Zero-capability hospitals: the primary outreach targets.
    ExpansionTargets,
}

impl HospitalPredicate for QuickFilter {
    fn matches(&self, hospital: &Hospital, record: &DistanceRecord) -> bool {
        match self {
            QuickFilter::State(state) => hospital.state.eq_ignore_ascii_case(state),
            QuickFilter::NoCertification => !hospital.is_certified(),
            QuickFilter::PartnersOnly => hospital.uw_partner,
            QuickFilter::EvtDesert => is_evt_desert(record),
            QuickFilter::ExpansionTargets => is_zero_capability(hospital),
        }
    }
}

impl FromStr for QuickFilter {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        match normalized.as_str() {
            "no-cert" | "no-certification" => Ok(QuickFilter::NoCertification),
            "partners" | "partners-only" | "uw-only" => Ok(QuickFilter::PartnersOnly),
            "evt-desert" | "evt-deserts" => Ok(QuickFilter::EvtDesert),
            "expansion" | "expansion-targets" => Ok(QuickFilter::ExpansionTargets),
            code if code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic()) => {
                Ok(QuickFilter::State(code.to_uppercase()))
            }
            _ => Err(AnalyticsError::UnknownQuickFilter(s.to_string())),
        }
    }
}

impl std::fmt::Display for QuickFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuickFilter::State(state) => write!(f, "{state} only"),
            QuickFilter::NoCertification => write!(f, "No certification"),
            QuickFilter::PartnersOnly => write!(f, "Network partners only"),
            QuickFilter::EvtDesert => write!(f, "EVT deserts (>100 mi)"),
            QuickFilter::ExpansionTargets => write!(f, "Expansion targets"),
        }
    }
}

/// Checkbox-style category selection. Active checkboxes combine with OR;
/// with none active every hospital passes. The search term always applies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryFilter {
    pub tiers: Vec<CertificationTier>,
    pub partners: bool,
    pub evt: bool,
    pub search: Option<String>,
}

impl CategoryFilter {
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.tiers.is_empty() || self.partners || self.evt
    }
}

impl HospitalPredicate for CategoryFilter {
    fn matches(&self, hospital: &Hospital, _record: &DistanceRecord) -> bool {
        if let Some(term) = self.search.as_deref() {
            if !hospital.matches_search(term) {
                return false;
            }
        }
        if !self.is_active() {
            return true;
        }
        hospital.tier().is_some_and(|t| self.tiers.contains(&t))
            || (self.partners && hospital.uw_partner)
            || (self.evt && hospital.has_elvo)
    }
}

/// Both filters must match.
impl<A, B> HospitalPredicate for (A, B)
where
    A: HospitalPredicate,
    B: HospitalPredicate,
{
    fn matches(&self, hospital: &Hospital, record: &DistanceRecord) -> bool {
        self.0.matches(hospital, record) && self.1.matches(hospital, record)
    }
}

#[cfg(test)]
#[path = "filters_test.rs"]
mod tests;
