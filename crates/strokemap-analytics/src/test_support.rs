use strokemap_core::{CertificationTier, Hospital};

/// Minimal hospital for unit tests; tweak fields with struct update syntax.
pub(crate) fn hospital(cms_id: &str, lat: f64, lon: f64) -> Hospital {
    Hospital {
        cms_id: cms_id.to_string(),
        name: format!("HOSPITAL {cms_id}"),
        address: String::new(),
        state: "WA".to_string(),
        zip: String::new(),
        latitude: lat,
        longitude: lon,
        stroke_certification_type: None,
        certifying_body: None,
        has_elvo: false,
        uw_partner: false,
        data_sources: vec![],
    }
}

pub(crate) fn certified(cms_id: &str, lat: f64, lon: f64, tier: CertificationTier) -> Hospital {
    Hospital {
        stroke_certification_type: Some(tier),
        ..hospital(cms_id, lat, lon)
    }
}

pub(crate) fn evt_center(cms_id: &str, lat: f64, lon: f64) -> Hospital {
    Hospital {
        stroke_certification_type: Some(CertificationTier::Comprehensive),
        has_elvo: true,
        ..hospital(cms_id, lat, lon)
    }
}

/// Latitude offset (degrees, along a meridian) that spans `miles`.
pub(crate) fn lat_for_miles(miles: f64) -> f64 {
    miles / (crate::distance::EARTH_RADIUS_MILES * std::f64::consts::PI / 180.0)
}
