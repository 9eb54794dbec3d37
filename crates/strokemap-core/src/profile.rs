//! Analysis profile: which certification tiers count as advanced or partial
//! capability, which facility anchors transfer estimates, and which states
//! get their own summary rows.
//!
//! The built-in defaults describe the Pacific Northwest telestroke network;
//! a YAML file can override any section.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{CertificationTier, ConfigError, Hospital};

pub const DEFAULT_REFERENCE_FACILITY: &str = "HARBORVIEW MEDICAL CENTER";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierPolicy {
    /// Tiers whose holders count as advanced centers.
    pub advanced: Vec<CertificationTier>,
    /// Lowest tiers; holders already have partial stroke capability.
    pub partial: Vec<CertificationTier>,
}

impl Default for TierPolicy {
    fn default() -> Self {
        Self {
            advanced: vec![
                CertificationTier::Comprehensive,
                CertificationTier::ThrombectomyCapable,
            ],
            partial: vec![
                CertificationTier::AcuteStrokeReady,
                CertificationTier::Primary,
            ],
        }
    }
}

impl TierPolicy {
    #[must_use]
    pub fn is_advanced(&self, tier: Option<CertificationTier>) -> bool {
        tier.is_some_and(|t| self.advanced.contains(&t))
    }

    #[must_use]
    pub fn is_partial(&self, tier: Option<CertificationTier>) -> bool {
        tier.is_some_and(|t| self.partial.contains(&t))
    }

    #[must_use]
    pub fn is_advanced_center(&self, hospital: &Hospital) -> bool {
        self.is_advanced(hospital.tier())
    }
}

/// Identifies the flagship facility. `cms_id` wins when both keys are set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceFacility {
    pub name: Option<String>,
    pub cms_id: Option<String>,
}

impl Default for ReferenceFacility {
    fn default() -> Self {
        Self {
            name: Some(DEFAULT_REFERENCE_FACILITY.to_string()),
            cms_id: None,
        }
    }
}

impl ReferenceFacility {
    #[must_use]
    pub fn matches(&self, hospital: &Hospital) -> bool {
        if let Some(id) = self.cms_id.as_deref() {
            return hospital.cms_id == id.trim();
        }
        self.name
            .as_deref()
            .is_some_and(|name| hospital.name.trim().eq_ignore_ascii_case(name.trim()))
    }

    /// Human-readable label for reports.
    #[must_use]
    pub fn describe(&self) -> String {
        match (self.name.as_deref(), self.cms_id.as_deref()) {
            (Some(name), Some(id)) => format!("{name} ({id})"),
            (Some(name), None) => name.to_string(),
            (None, Some(id)) => format!("cmsId {id}"),
            (None, None) => "unconfigured".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisProfile {
    pub tiers: TierPolicy,
    pub reference_facility: ReferenceFacility,
    pub states_of_interest: Vec<String>,
}

impl Default for AnalysisProfile {
    fn default() -> Self {
        Self {
            tiers: TierPolicy::default(),
            reference_facility: ReferenceFacility::default(),
            states_of_interest: vec!["WA".to_string(), "ID".to_string(), "AK".to_string()],
        }
    }
}

/// Load and validate an analysis profile from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_profile(path: &Path) -> Result<AnalysisProfile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ProfileFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_profile(&content)
}

/// Parse and validate an analysis profile from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` if the text cannot be parsed or fails validation.
pub fn parse_profile(content: &str) -> Result<AnalysisProfile, ConfigError> {
    let profile: AnalysisProfile = serde_yaml::from_str(content)?;
    validate_profile(&profile)?;
    Ok(profile)
}

fn validate_profile(profile: &AnalysisProfile) -> Result<(), ConfigError> {
    let tiers = &profile.tiers;
    if tiers.advanced.is_empty() {
        return Err(ConfigError::Validation(
            "tiers.advanced must list at least one tier".to_string(),
        ));
    }
    if tiers.partial.is_empty() {
        return Err(ConfigError::Validation(
            "tiers.partial must list at least one tier".to_string(),
        ));
    }
    if let Some(tier) = tiers.advanced.iter().find(|t| tiers.partial.contains(t)) {
        return Err(ConfigError::Validation(format!(
            "tier {tier} cannot be both advanced and partial"
        )));
    }

    let reference = &profile.reference_facility;
    let blank = |v: &Option<String>| v.as_deref().is_none_or(|s| s.trim().is_empty());
    if blank(&reference.name) && blank(&reference.cms_id) {
        return Err(ConfigError::Validation(
            "reference_facility needs a name or cms_id".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for state in &profile.states_of_interest {
        let code = state.trim().to_uppercase();
        if code.is_empty() {
            return Err(ConfigError::Validation(
                "states_of_interest entries must be non-empty".to_string(),
            ));
        }
        if !seen.insert(code) {
            return Err(ConfigError::Validation(format!(
                "duplicate state in states_of_interest: '{state}'"
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hospital(cms_id: &str, name: &str) -> Hospital {
        Hospital {
            cms_id: cms_id.to_string(),
            name: name.to_string(),
            address: String::new(),
            state: "WA".to_string(),
            zip: String::new(),
            latitude: 47.6,
            longitude: -122.3,
            stroke_certification_type: None,
            certifying_body: None,
            has_elvo: false,
            uw_partner: false,
            data_sources: vec![],
        }
    }

    #[test]
    fn default_policy_matches_network_tiers() {
        let policy = TierPolicy::default();
        assert!(policy.is_advanced(Some(CertificationTier::Comprehensive)));
        assert!(policy.is_advanced(Some(CertificationTier::ThrombectomyCapable)));
        assert!(!policy.is_advanced(Some(CertificationTier::Primary)));
        assert!(!policy.is_advanced(None));
        assert!(policy.is_partial(Some(CertificationTier::Primary)));
        assert!(policy.is_partial(Some(CertificationTier::AcuteStrokeReady)));
        assert!(!policy.is_partial(None));
    }

    #[test]
    fn empty_yaml_yields_defaults() {
        let profile = parse_profile("{}").unwrap();
        assert_eq!(profile, AnalysisProfile::default());
    }

    #[test]
    fn partial_yaml_overrides_one_section() {
        let yaml = "states_of_interest: [WA, OR]\n";
        let profile = parse_profile(yaml).unwrap();
        assert_eq!(profile.states_of_interest, vec!["WA", "OR"]);
        assert_eq!(profile.tiers, TierPolicy::default());
    }

    #[test]
    fn yaml_tiers_use_source_codes() {
        let yaml = "tiers:\n  advanced: [CSC]\n  partial: [ASR, PSC, TSC]\n";
        let profile = parse_profile(yaml).unwrap();
        assert_eq!(profile.tiers.advanced, vec![CertificationTier::Comprehensive]);
        assert!(profile
            .tiers
            .is_partial(Some(CertificationTier::ThrombectomyCapable)));
    }

    #[test]
    fn validate_rejects_overlapping_tiers() {
        let yaml = "tiers:\n  advanced: [CSC, PSC]\n  partial: [PSC]\n";
        let err = parse_profile(yaml).unwrap_err();
        assert!(err.to_string().contains("both advanced and partial"));
    }

    #[test]
    fn validate_rejects_empty_advanced() {
        let yaml = "tiers:\n  advanced: []\n  partial: [PSC]\n";
        let err = parse_profile(yaml).unwrap_err();
        assert!(err.to_string().contains("tiers.advanced"));
    }

    #[test]
    fn validate_rejects_blank_reference() {
        let yaml = "reference_facility:\n  name: \"  \"\n";
        let err = parse_profile(yaml).unwrap_err();
        assert!(err.to_string().contains("reference_facility"));
    }

    #[test]
    fn validate_rejects_duplicate_states() {
        let yaml = "states_of_interest: [WA, wa]\n";
        let err = parse_profile(yaml).unwrap_err();
        assert!(err.to_string().contains("duplicate state"));
    }

    #[test]
    fn unknown_tier_code_is_a_parse_error() {
        let yaml = "tiers:\n  advanced: [LVO]\n";
        assert!(matches!(
            parse_profile(yaml),
            Err(ConfigError::ProfileFileParse(_))
        ));
    }

    #[test]
    fn reference_matches_by_name_case_insensitively() {
        let reference = ReferenceFacility::default();
        assert!(reference.matches(&hospital("500064", "Harborview Medical Center")));
        assert!(!reference.matches(&hospital("500064", "Valley Medical Center")));
    }

    #[test]
    fn reference_cms_id_takes_precedence() {
        let reference = ReferenceFacility {
            name: Some(DEFAULT_REFERENCE_FACILITY.to_string()),
            cms_id: Some("500008".to_string()),
        };
        assert!(reference.matches(&hospital("500008", "UW MEDICAL CENTER")));
        assert!(!reference.matches(&hospital("500064", DEFAULT_REFERENCE_FACILITY)));
    }

    #[test]
    fn load_profile_from_repo_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("config")
            .join("profile.yaml");
        let result = load_profile(&path);
        assert!(result.is_ok(), "failed to load profile.yaml: {result:?}");
        assert_eq!(result.unwrap(), AnalysisProfile::default());
    }

    #[test]
    fn load_profile_missing_file_is_io_error() {
        let err = load_profile(Path::new("/nonexistent/profile.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::ProfileFileIo { .. }));
    }
}
