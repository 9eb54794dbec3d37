//! Decoding of the geocoded hospital payload into the working set.
//!
//! Records without both coordinates are excluded silently (counted only).
//! Records that cannot be interpreted are rejected one at a time; a bad
//! record never fails the batch.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::{CertificationTier, DatasetError, Hospital, RecordError};

/// Wire shape of a single record, before validation. `cmsId` is read
/// separately so rejections can name the record.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawHospital {
    name: Option<String>,
    address: Option<String>,
    state: Option<String>,
    zip: Option<Value>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    stroke_certification_type: Option<String>,
    certifying_body: Option<String>,
    #[serde(rename = "hasELVO")]
    has_elvo: Option<bool>,
    uw_partner: Option<bool>,
    data_sources: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRecord {
    /// Zero-based position in the source array.
    pub position: usize,
    pub cms_id: Option<String>,
    pub error: RecordError,
}

#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub hospitals: Vec<Hospital>,
    pub total_records: usize,
    pub missing_coordinates: usize,
    pub rejected: Vec<RejectedRecord>,
}

/// Read and decode the dataset file at `path`.
///
/// # Errors
///
/// Returns [`DatasetError::Io`] if the file cannot be read and
/// [`DatasetError::Parse`] if it is not a JSON array.
pub fn load_hospitals(path: &Path) -> Result<LoadReport, DatasetError> {
    let content = std::fs::read_to_string(path).map_err(|e| DatasetError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_hospitals(&content)
}

/// Decode a JSON array of hospital records.
///
/// # Errors
///
/// Returns [`DatasetError::Parse`] if the payload is not a JSON array.
/// Individual bad records are reported in [`LoadReport::rejected`].
pub fn parse_hospitals(payload: &str) -> Result<LoadReport, DatasetError> {
    let records: Vec<Value> = serde_json::from_str(payload)?;

    let mut report = LoadReport {
        total_records: records.len(),
        ..LoadReport::default()
    };
    let mut seen_ids = HashSet::new();

    for (position, value) in records.into_iter().enumerate() {
        match decode_record(value) {
            Ok(Decoded::Hospital(hospital)) => {
                if seen_ids.insert(hospital.cms_id.clone()) {
                    report.hospitals.push(hospital);
                } else {
                    reject(
                        &mut report,
                        position,
                        Some(hospital.cms_id.clone()),
                        RecordError::DuplicateCmsId(hospital.cms_id),
                    );
                }
            }
            Ok(Decoded::MissingCoordinates) => report.missing_coordinates += 1,
            Err((cms_id, error)) => reject(&mut report, position, cms_id, error),
        }
    }

    tracing::info!(
        total = report.total_records,
        loaded = report.hospitals.len(),
        missing_coordinates = report.missing_coordinates,
        rejected = report.rejected.len(),
        "hospital dataset decoded"
    );

    Ok(report)
}

fn reject(report: &mut LoadReport, position: usize, cms_id: Option<String>, error: RecordError) {
    tracing::warn!(
        position,
        cms_id = cms_id.as_deref().unwrap_or("-"),
        error = %error,
        "skipping hospital record"
    );
    report.rejected.push(RejectedRecord {
        position,
        cms_id,
        error,
    });
}

enum Decoded {
    Hospital(Hospital),
    MissingCoordinates,
}

fn decode_record(value: Value) -> Result<Decoded, (Option<String>, RecordError)> {
    let cms_id = value.get("cmsId").and_then(scalar_to_string);

    let raw: RawHospital = serde_json::from_value(value)
        .map_err(|e| (cms_id.clone(), RecordError::Malformed(e.to_string())))?;

    let (Some(latitude), Some(longitude)) = (raw.latitude, raw.longitude) else {
        return Ok(Decoded::MissingCoordinates);
    };

    let Some(cms_id) = cms_id else {
        return Err((None, RecordError::MissingCmsId));
    };

    let stroke_certification_type = match raw.stroke_certification_type.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(code) => Some(
            code.parse::<CertificationTier>()
                .map_err(|e| (Some(cms_id.clone()), e))?,
        ),
    };

    Ok(Decoded::Hospital(Hospital {
        cms_id,
        name: raw.name.unwrap_or_default(),
        address: raw.address.unwrap_or_default(),
        state: raw.state.unwrap_or_default().trim().to_uppercase(),
        zip: raw.zip.as_ref().and_then(scalar_to_string).unwrap_or_default(),
        latitude,
        longitude,
        stroke_certification_type,
        certifying_body: raw.certifying_body.filter(|b| !b.trim().is_empty()),
        has_elvo: raw.has_elvo.unwrap_or(false),
        uw_partner: raw.uw_partner.unwrap_or(false),
        data_sources: raw.data_sources.unwrap_or_default(),
    }))
}

/// Identifiers arrive as strings or bare numbers; `"None"` and blanks mean absent.
fn scalar_to_string(value: &Value) -> Option<String> {
    let s = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    if s.is_empty() || s == "None" {
        None
    } else {
        Some(s)
    }
}

#[cfg(test)]
#[path = "dataset_test.rs"]
mod tests;
