//! Domain types, dataset loading, and configuration for the stroke-care
//! network analytics.

pub mod app_config;
pub mod config;
pub mod dataset;
pub mod error;
pub mod hospital;
pub mod profile;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use dataset::{load_hospitals, parse_hospitals, LoadReport, RejectedRecord};
pub use error::{ConfigError, DatasetError, RecordError};
pub use hospital::{CertificationTier, Hospital};
pub use profile::{load_profile, AnalysisProfile, ReferenceFacility, TierPolicy};
