//! Expansion-planning analytics over the stroke-care hospital network.
//!
//! Everything hangs off [`AnalysisContext`], which is built once from the
//! loaded hospitals and never mutated afterwards.

pub mod analyses;
pub mod context;
pub mod distance;
pub mod error;
pub mod filters;
pub mod index;
pub mod matrix;
pub mod pathways;
pub mod scoring;
pub mod summary;

pub use analyses::{
    is_evt_desert, is_zero_capability, transfer_estimate, DistanceBand, ReferralBand,
    TransferEstimate,
};
pub use context::AnalysisContext;
pub use distance::great_circle_distance;
pub use error::AnalyticsError;
pub use filters::{CategoryFilter, HospitalFilter, HospitalPredicate, QuickFilter};
pub use index::{DistanceRecord, NearestFacility, NearestFacilityIndex, Proximity};
pub use matrix::{distance_matrix, MatrixRow, MatrixSort};
pub use pathways::{referral_pathways, ReferralPathway};
pub use scoring::{expansion_score, rank_candidates, ScoredCandidate};
pub use summary::{BandCounts, CoverageSummary, StateCoverage};

#[cfg(test)]
pub(crate) mod test_support;
