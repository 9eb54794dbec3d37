use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("no hospital with cmsId '{0}' in the working set")]
    UnknownHospital(String),

    #[error("unknown quick filter '{0}'; expected a state code, no-cert, partners, evt-desert, or expansion")]
    UnknownQuickFilter(String),

    #[error("unknown matrix sort '{0}'; expected name, state, advanced, or evt")]
    UnknownMatrixSort(String),
}
