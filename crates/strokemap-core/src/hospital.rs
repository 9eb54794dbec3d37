use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::RecordError;

/// Stroke certification tiers recognised in the dataset, highest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CertificationTier {
    #[serde(rename = "CSC")]
    Comprehensive,
    #[serde(rename = "TSC")]
    ThrombectomyCapable,
    #[serde(rename = "PSC")]
    Primary,
    #[serde(rename = "ASR")]
    AcuteStrokeReady,
}

impl CertificationTier {
    pub const ALL: [CertificationTier; 4] = [
        CertificationTier::Comprehensive,
        CertificationTier::ThrombectomyCapable,
        CertificationTier::Primary,
        CertificationTier::AcuteStrokeReady,
    ];

    /// Short code used in the source data (`CSC`, `TSC`, `PSC`, `ASR`).
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            CertificationTier::Comprehensive => "CSC",
            CertificationTier::ThrombectomyCapable => "TSC",
            CertificationTier::Primary => "PSC",
            CertificationTier::AcuteStrokeReady => "ASR",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            CertificationTier::Comprehensive => "Comprehensive Stroke Center",
            CertificationTier::ThrombectomyCapable => "Thrombectomy-Capable Stroke Center",
            CertificationTier::Primary => "Primary Stroke Center",
            CertificationTier::AcuteStrokeReady => "Acute Stroke Ready Hospital",
        }
    }
}

impl std::fmt::Display for CertificationTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for CertificationTier {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        CertificationTier::ALL
            .into_iter()
            .find(|tier| tier.code().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| RecordError::UnknownTier(trimmed.to_string()))
    }
}

/// A hospital in the working set. Always carries coordinates; records
/// without them never make it past the loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hospital {
    pub cms_id: String,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip: String,
    pub latitude: f64,
    pub longitude: f64,
    pub stroke_certification_type: Option<CertificationTier>,
    pub certifying_body: Option<String>,
    #[serde(rename = "hasELVO")]
    pub has_elvo: bool,
    pub uw_partner: bool,
    #[serde(default)]
    pub data_sources: Vec<String>,
}

impl Hospital {
    #[must_use]
    pub fn tier(&self) -> Option<CertificationTier> {
        self.stroke_certification_type
    }

    #[must_use]
    pub fn is_certified(&self) -> bool {
        self.stroke_certification_type.is_some()
    }

    /// Case-insensitive substring match against name and address.
    #[must_use]
    pub fn matches_search(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&needle) || self.address.to_lowercase().contains(&needle)
    }
}
