use super::*;

#[test]
fn parses_complete_record() {
    let payload = r#"[
        {
            "cmsId": "500064",
            "name": "HARBORVIEW MEDICAL CENTER",
            "address": "325 9TH AVE SEATTLE",
            "state": "wa",
            "zip": 98104,
            "latitude": 47.6043,
            "longitude": -122.3236,
            "strokeCertificationType": "CSC",
            "certifyingBody": "TJC",
            "hasELVO": true,
            "uwPartner": true,
            "dataSources": ["CMS", "WA DOH"]
        }
    ]"#;
    let report = parse_hospitals(payload).unwrap();
    assert_eq!(report.total_records, 1);
    assert!(report.rejected.is_empty());
    let h = &report.hospitals[0];
    assert_eq!(h.cms_id, "500064");
    assert_eq!(h.state, "WA");
    assert_eq!(h.zip, "98104");
    assert_eq!(h.tier(), Some(CertificationTier::Comprehensive));
    assert!(h.has_elvo);
    assert!(h.uw_partner);
    assert_eq!(h.data_sources, vec!["CMS", "WA DOH"]);
}

#[test]
fn missing_coordinates_are_excluded_not_rejected() {
    let payload = r#"[
        {"cmsId": "1", "name": "A", "latitude": 47.0, "longitude": -122.0},
        {"cmsId": "2", "name": "B", "latitude": null, "longitude": -122.0},
        {"cmsId": "3", "name": "C", "latitude": 46.0},
        {"name": "D"}
    ]"#;
    let report = parse_hospitals(payload).unwrap();
    assert_eq!(report.hospitals.len(), 1);
    assert_eq!(report.missing_coordinates, 3);
    assert!(report.rejected.is_empty());
}

#[test]
fn non_numeric_coordinate_rejects_only_that_record() {
    let payload = r#"[
        {"cmsId": "1", "name": "A", "latitude": "north", "longitude": -122.0},
        {"cmsId": "2", "name": "B", "latitude": 47.0, "longitude": -122.0}
    ]"#;
    let report = parse_hospitals(payload).unwrap();
    assert_eq!(report.hospitals.len(), 1);
    assert_eq!(report.hospitals[0].cms_id, "2");
    assert_eq!(report.rejected.len(), 1);
    let rejected = &report.rejected[0];
    assert_eq!(rejected.position, 0);
    assert_eq!(rejected.cms_id.as_deref(), Some("1"));
    assert!(matches!(rejected.error, RecordError::Malformed(_)));
}

#[test]
fn unknown_tier_is_rejected() {
    let payload = r#"[
        {"cmsId": "9", "name": "X", "latitude": 47.0, "longitude": -122.0,
         "strokeCertificationType": "LVO"}
    ]"#;
    let report = parse_hospitals(payload).unwrap();
    assert!(report.hospitals.is_empty());
    assert_eq!(
        report.rejected[0].error,
        RecordError::UnknownTier("LVO".to_string())
    );
}

#[test]
fn blank_tier_and_flags_default_to_absent() {
    let payload = r#"[
        {"cmsId": "9", "name": "X", "latitude": 47.0, "longitude": -122.0,
         "strokeCertificationType": "", "certifyingBody": "",
         "hasELVO": null, "dataSources": null}
    ]"#;
    let report = parse_hospitals(payload).unwrap();
    let h = &report.hospitals[0];
    assert!(h.tier().is_none());
    assert!(h.certifying_body.is_none());
    assert!(!h.has_elvo);
    assert!(!h.uw_partner);
    assert!(h.data_sources.is_empty());
}

#[test]
fn missing_or_placeholder_cms_id_is_rejected() {
    let payload = r#"[
        {"name": "A", "latitude": 47.0, "longitude": -122.0},
        {"cmsId": "None", "name": "B", "latitude": 47.0, "longitude": -122.0}
    ]"#;
    let report = parse_hospitals(payload).unwrap();
    assert!(report.hospitals.is_empty());
    assert_eq!(report.rejected.len(), 2);
    assert!(report
        .rejected
        .iter()
        .all(|r| r.error == RecordError::MissingCmsId));
}

#[test]
fn numeric_cms_id_is_accepted() {
    let payload = r#"[{"cmsId": 500129, "name": "A", "latitude": 47.0, "longitude": -122.0}]"#;
    let report = parse_hospitals(payload).unwrap();
    assert_eq!(report.hospitals[0].cms_id, "500129");
}

#[test]
fn duplicate_cms_id_keeps_first_record() {
    let payload = r#"[
        {"cmsId": "500007", "name": "ISLAND HOSPITAL", "latitude": 48.5, "longitude": -122.6},
        {"cmsId": "500007", "name": "MULTICARE ALLENMORE HOSPITAL", "latitude": 47.2, "longitude": -122.5}
    ]"#;
    let report = parse_hospitals(payload).unwrap();
    assert_eq!(report.hospitals.len(), 1);
    assert_eq!(report.hospitals[0].name, "ISLAND HOSPITAL");
    assert_eq!(
        report.rejected[0].error,
        RecordError::DuplicateCmsId("500007".to_string())
    );
    assert_eq!(report.rejected[0].position, 1);
}

#[test]
fn non_array_payload_is_fatal() {
    let err = parse_hospitals(r#"{"hospitals": []}"#).unwrap_err();
    assert!(matches!(err, DatasetError::Parse(_)));
}

#[test]
fn load_missing_file_is_io_error() {
    let err = load_hospitals(Path::new("/nonexistent/hospitals.json")).unwrap_err();
    assert!(matches!(err, DatasetError::Io { .. }));
}
