use super::*;

use emprof_core::{ProfileData, ProfileStatus};
use serde_json::json;

fn completed_profile() -> Profile {
    let mut p = Profile::new("https://acme.com".to_owned());
    p.status = ProfileStatus::Completed;
    p.data = Some(
        serde_json::from_value::<ProfileData>(json!({
            "domain": "acme.com",
            "name": "Acme",
            "qualityScore": 92.0,
            "colors": [{"hex": "#ff0000"}, {"hex": "#00ff00"}],
            "logos": [{"type": "icon"}],
            "fonts": [{"name": "Inter"}, {"name": "Mono"}],
            "links": [{"url": "https://x.com/acme"}]
        }))
        .unwrap(),
    );
    p
}

#[test]
fn json_export_is_an_importable_array() {
    let profiles = vec![completed_profile(), Profile::new("https://b.com".to_owned())];
    let exported = export_json(&profiles).unwrap();
    let imported = import_json(&exported).unwrap();
    assert_eq!(imported.len(), 2);
    assert_eq!(imported[0].id, profiles[0].id);
    assert_eq!(imported[0].data.as_ref().unwrap().name.as_deref(), Some("Acme"));
}

#[test]
fn profile_text_export_carries_url_status_and_payload() {
    let text = export_profile_text(&completed_profile()).unwrap();
    assert!(text.starts_with("URL: https://acme.com\nStatus: completed\n\n"));
    assert!(text.contains("\"name\": \"Acme\""));
}

#[test]
fn csv_header_matches_the_fixed_column_set() {
    let out = export_csv(&[]);
    assert_eq!(
        out,
        "\"ID\",\"URL\",\"Domain\",\"Name\",\"Status\",\"Created\",\"Colors\",\"Logo Count\",\"Fonts\",\"Links\",\"Quality Score\"\n"
    );
}

#[test]
fn csv_joins_list_fields_and_counts_logos() {
    let profile = completed_profile();
    let out = export_csv(&[profile]);
    let row = out.lines().nth(1).unwrap();
    assert!(row.contains("\"#ff0000; #00ff00\""));
    assert!(row.contains("\"1\""));
    assert!(row.contains("\"Inter; Mono\""));
    assert!(row.contains("\"https://x.com/acme\""));
    assert!(row.contains("\"92\""));
}

#[test]
fn csv_renders_absent_data_as_empty_fields() {
    let profile = Profile::new("https://bare.com".to_owned());
    let out = export_csv(&[profile]);
    let row = out.lines().nth(1).unwrap();
    assert!(row.ends_with(",\"\",\"0\",\"\",\"\",\"\""));
}

#[test]
fn csv_doubles_embedded_quotes() {
    let mut profile = Profile::new("https://bare.com".to_owned());
    profile.url = "https://bare.com/\"q\"".to_owned();
    let out = export_csv(&[profile]);
    assert!(out.contains("\"https://bare.com/\"\"q\"\"\""));
}

#[test]
fn import_rejects_invalid_json() {
    assert!(matches!(
        import_json("{not json").unwrap_err(),
        BackupError::Parse(_)
    ));
}

#[test]
fn import_rejects_a_non_array_document() {
    assert!(matches!(
        import_json("{\"profiles\": []}").unwrap_err(),
        BackupError::NotAnArray
    ));
}

#[test]
fn import_rejects_elements_that_are_not_profile_shaped() {
    let err = import_json("[{\"id\": 1}]").unwrap_err();
    assert!(matches!(err, BackupError::Parse(_)));
}

#[test]
fn import_accepts_date_only_backups_from_earlier_releases() {
    let imported = import_json(
        r#"[
            {"id":"1","url":"a.com","status":"completed","createdAt":"2024-01-01"},
            {"id":"2","url":"b.com","status":"failed","createdAt":"2024-02-01"}
        ]"#,
    )
    .unwrap();
    assert_eq!(imported.len(), 2);
    assert_eq!(imported[1].status, ProfileStatus::Failed);
}
